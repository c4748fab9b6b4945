//! Output formatter trait

use super::report::AnalysisReport;

/// Renders an analysis run for one of the output formats
pub trait OutputFormatter {
    /// Terminal report with markdown rendered
    fn format_report(&self, report: &AnalysisReport) -> String;

    /// Model text exactly as returned
    fn format_raw(&self, report: &AnalysisReport) -> String;

    /// `{ "analysis": ..., "answers": [...] }`
    fn format_json(&self, report: &AnalysisReport) -> String;
}
