use chrono::NaiveDate;
use consensus_core::PortfolioReport;
use serde::{Deserialize, Serialize};

/// Flat, column-oriented view of a report for spreadsheet-style download.
///
/// The per-holding vectors are parallel and follow the allocation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub categories: Vec<String>,
    pub tickers: Vec<String>,
    pub cagr: Vec<f64>,
    pub allocation_percent: Vec<f64>,
    pub expected_return: Vec<f64>,
    /// URLs of the sources attached to each holding's asset
    pub source_urls: Vec<Vec<String>>,
    /// Trust scores of the report's verified sources
    pub trust_scores: Vec<f64>,
    pub report_date: NaiveDate,
}

impl ExportData {
    pub fn from_report(report: &PortfolioReport) -> Self {
        let allocations = &report.portfolio.allocations;

        let source_urls = allocations
            .iter()
            .map(|allocation| {
                report
                    .top_assets
                    .iter()
                    .find(|asset| asset.ticker == allocation.ticker)
                    .map(|asset| asset.sources.iter().map(|s| s.url.clone()).collect())
                    .unwrap_or_default()
            })
            .collect();

        Self {
            categories: allocations.iter().map(|a| a.category.clone()).collect(),
            tickers: allocations.iter().map(|a| a.ticker.clone()).collect(),
            cagr: allocations.iter().map(|a| a.cagr).collect(),
            allocation_percent: allocations.iter().map(|a| a.allocation).collect(),
            expected_return: allocations.iter().map(|a| a.expected_return).collect(),
            source_urls,
            trust_scores: report.sources.iter().map(|s| s.trust_score).collect(),
            report_date: report.metadata.report_date,
        }
    }
}
