use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::errors::SourceError;
use crate::domain::orders::{OrderRecord, group_by_company};
use crate::domain::ports::OrderSource;
use crate::domain::surveillance::{
    DetectorConfig, ScanPolicy, WindowStats, WindowTotals, is_time_ordered, window_around,
};

/// Outcome of classifying every company in an order log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_companies: usize,
    pub excessive: BTreeSet<String>,
    pub well_behaved: usize,
    /// Companies never involved, in first-seen order
    pub well_behaved_companies: Vec<String>,
    /// First triggering window per excessive company, in first-seen company order
    pub findings: Vec<WindowStats>,
}

/// Flags companies whose cancelled quantity exceeds the configured share of
/// their order flow within any window.
pub struct ExcessiveCancellationDetector {
    config: DetectorConfig,
}

impl ExcessiveCancellationDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// True if any anchor's window over `orders` is excessive.
    ///
    /// `orders` must be the sequence of a single company, in input order.
    pub fn is_company_excessive(&self, orders: &[OrderRecord]) -> bool {
        (0..orders.len()).any(|anchor| {
            let totals = self.measure(orders, anchor);
            totals.is_excessive(self.config.max_cancel_ratio())
        })
    }

    /// Stats of the first excessive window for `company`, if any.
    pub fn find_excessive_window(
        &self,
        company: &str,
        orders: &[OrderRecord],
    ) -> Option<WindowStats> {
        let (anchor, totals) = (0..orders.len())
            .map(|anchor| (anchor, self.measure(orders, anchor)))
            .find(|(_, totals)| totals.is_excessive(self.config.max_cancel_ratio()))?;

        let stats = WindowStats::new(company, anchor, totals, orders.len());
        info!(
            company = %stats.company,
            anchor_index = stats.anchor_index,
            window_len = stats.window_len,
            cancel_quantity = stats.cancel_quantity,
            total_quantity = stats.total_quantity,
            cancel_ratio = ?stats.cancel_ratio,
            company_orders = stats.company_order_count,
            "CancellationDetector: Excessive cancellations for {}",
            company
        );
        Some(stats)
    }

    pub fn companies_involved_in_excessive_cancellations(
        &self,
        records: &[OrderRecord],
    ) -> BTreeSet<String> {
        group_by_company(records)
            .iter()
            .filter(|(company, orders)| {
                self.warn_if_unordered(company, orders);
                self.is_company_excessive(orders)
            })
            .map(|(company, _)| company.to_string())
            .collect()
    }

    pub fn total_well_behaved_companies(&self, records: &[OrderRecord]) -> usize {
        group_by_company(records)
            .iter()
            .filter(|(company, orders)| {
                self.warn_if_unordered(company, orders);
                !self.is_company_excessive(orders)
            })
            .count()
    }

    /// Classifies every company in one pass.
    pub fn analyze(&self, records: &[OrderRecord]) -> AnalysisReport {
        let group = group_by_company(records);
        let mut report = AnalysisReport {
            total_companies: group.len(),
            ..AnalysisReport::default()
        };

        for (company, orders) in group.iter() {
            self.warn_if_unordered(company, orders);
            match self.find_excessive_window(company, orders) {
                Some(stats) => {
                    report.excessive.insert(company.to_string());
                    report.findings.push(stats);
                }
                None => {
                    debug!("CancellationDetector: {} is well behaved", company);
                    report.well_behaved += 1;
                    report.well_behaved_companies.push(company.to_string());
                }
            }
        }

        info!(
            "CancellationDetector: {} companies analysed, {} excessive, {} well behaved",
            report.total_companies,
            report.excessive.len(),
            report.well_behaved
        );
        report
    }

    pub fn companies_involved_from(
        &self,
        source: &dyn OrderSource,
    ) -> Result<BTreeSet<String>, SourceError> {
        let records = source.load()?;
        Ok(self.companies_involved_in_excessive_cancellations(&records))
    }

    pub fn total_well_behaved_from(&self, source: &dyn OrderSource) -> Result<usize, SourceError> {
        let records = source.load()?;
        Ok(self.total_well_behaved_companies(&records))
    }

    pub fn analyze_from(&self, source: &dyn OrderSource) -> Result<AnalysisReport, SourceError> {
        let records = source.load()?;
        Ok(self.analyze(&records))
    }

    /// Logs once for `company` when the contiguous scan would see out-of-order times.
    /// Returns true if it warned.
    fn warn_if_unordered(&self, company: &str, orders: &[OrderRecord]) -> bool {
        if self.config.scan() != ScanPolicy::Contiguous || is_time_ordered(orders) {
            return false;
        }
        warn!(
            "CancellationDetector: Orders for {} are not in time order; windows may be \
             incomplete, use the exhaustive scan",
            company
        );
        true
    }

    fn measure(&self, orders: &[OrderRecord], anchor: usize) -> WindowTotals {
        let window = window_around(orders, anchor, self.config.window(), self.config.scan());
        WindowTotals::measure(&window)
    }
}

impl Default for ExcessiveCancellationDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
