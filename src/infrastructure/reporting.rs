//! Rendering of detector results.
//!
//! Provides plain-text, JSON and CSV output for the command-line front end.

use crate::application::surveillance::AnalysisReport;
use crate::domain::surveillance::WindowStats;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::json;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Renders the set of companies involved in excessive cancellations.
pub fn render_involved(companies: &BTreeSet<String>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(companies
            .iter()
            .map(|company| format!("{}\n", company))
            .collect()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(companies).context("Failed to serialize companies")
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["company"])?;
            for company in companies {
                writer.write_record([company])?;
            }
            finish_csv(writer)
        }
    }
}

/// Renders the number of well-behaved companies.
pub fn render_well_behaved(count: usize, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n", count)),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({ "well_behaved": count }))
            .context("Failed to serialize count"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["well_behaved"])?;
            writer.write_record([count.to_string()])?;
            finish_csv(writer)
        }
    }
}

/// Renders the full analysis report.
pub fn render_report(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report_table(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record([
                "company",
                "status",
                "anchor_index",
                "window_len",
                "cancel_quantity",
                "total_quantity",
                "cancel_ratio",
            ])?;
            for finding in &report.findings {
                writer.write_record([
                    finding.company.clone(),
                    "excessive".to_string(),
                    finding.anchor_index.to_string(),
                    finding.window_len.to_string(),
                    finding.cancel_quantity.to_string(),
                    finding.total_quantity.to_string(),
                    format_ratio(finding),
                ])?;
            }
            for company in &report.well_behaved_companies {
                writer.write_record([company.as_str(), "well_behaved", "", "", "", "", ""])?;
            }
            finish_csv(writer)
        }
    }
}

fn report_table(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(72)));
    out.push_str("EXCESSIVE CANCELLATION REPORT\n");
    out.push_str(&format!("{}\n", "=".repeat(72)));
    out.push_str(&format!("Companies analysed:  {}\n", report.total_companies));
    out.push_str(&format!("Excessive:           {}\n", report.excessive.len()));
    out.push_str(&format!("Well behaved:        {}\n", report.well_behaved));

    if !report.findings.is_empty() {
        out.push_str(&format!("{}\n", "-".repeat(72)));
        out.push_str(&format!(
            "{:<28} | {:>6} | {:>6} | {:>10} | {:>10}\n",
            "Company", "Anchor", "Orders", "Cancelled", "Ratio"
        ));
        out.push_str(&format!("{}\n", "-".repeat(72)));
        for finding in &report.findings {
            out.push_str(&format!(
                "{:<28} | {:>6} | {:>6} | {:>10} | {:>10}\n",
                finding.company,
                finding.anchor_index,
                finding.window_len,
                format!("{}/{}", finding.cancel_quantity, finding.total_quantity),
                format_ratio(finding)
            ));
        }
    }

    out.push_str(&format!("{}\n", "=".repeat(72)));
    out
}

fn format_ratio(finding: &WindowStats) -> String {
    finding
        .cancel_ratio
        .map(|ratio| ratio.round_dp(4).to_string())
        .unwrap_or_default()
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
