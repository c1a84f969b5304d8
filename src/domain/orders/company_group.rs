use crate::domain::orders::types::OrderRecord;
use std::collections::HashMap;

/// Order records keyed by company, each sequence kept in input order.
///
/// Built once from a parsed order log and read-only afterwards. Companies are
/// iterated in the order they first appear in the input.
#[derive(Debug, Clone, Default)]
pub struct CompanyGroup {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<OrderRecord>)>,
}

impl CompanyGroup {
    pub fn from_records(records: impl IntoIterator<Item = OrderRecord>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<OrderRecord>)> = Vec::new();

        for record in records {
            match index.get(&record.company) {
                Some(&slot) => groups[slot].1.push(record),
                None => {
                    index.insert(record.company.clone(), groups.len());
                    groups.push((record.company.clone(), vec![record]));
                }
            }
        }

        Self { index, groups }
    }

    /// Company identifiers in first-seen order
    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(company, _)| company.as_str())
    }

    pub fn orders(&self, company: &str) -> Option<&[OrderRecord]> {
        self.index
            .get(company)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OrderRecord])> {
        self.groups
            .iter()
            .map(|(company, orders)| (company.as_str(), orders.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups `records` by company, preserving per-company input order.
pub fn group_by_company(records: &[OrderRecord]) -> CompanyGroup {
    CompanyGroup::from_records(records.iter().cloned())
}
