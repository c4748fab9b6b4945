//! Console output formatter
//!
//! Gemini answers in markdown. The report format renders the subset it
//! actually uses (headers, bullets, numbered lists, bold, inline code) and
//! highlights bold spans, which is where the model puts equipment tags.

use super::formatter::OutputFormatter;
use super::report::AnalysisReport;
use colored::Colorize;
use pid_domain::OutputFormat;
use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+?)\*\*").ok());
static INLINE_CODE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"`([^`]+)`").ok());
static NUMBERED: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").ok());

/// Formats analyses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn terminal colors on or off for the whole process
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Render in the requested format
    pub fn render(format: OutputFormat, report: &AnalysisReport) -> String {
        match format {
            OutputFormat::Report => Self::format_report(report),
            OutputFormat::Raw => Self::format_raw(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    pub fn format_report(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("P&ID Analysis"));
        output.push_str("\n\n");
        output.push_str(&Self::render_markdown(&report.analysis));
        output.push('\n');

        for answered in &report.answers {
            output.push_str(&Self::section_header(&format!("Q: {}", answered.question)));
            output.push_str(&Self::render_markdown(&answered.answer));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_raw(report: &AnalysisReport) -> String {
        let mut output = report.analysis.clone();
        for answered in &report.answers {
            output.push_str("\n\n");
            output.push_str(&answered.answer);
        }
        output
    }

    pub fn format_json(report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render one markdown message for the terminal
    pub fn render_markdown(text: &str) -> String {
        text.lines()
            .map(Self::render_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_line(line: &str) -> String {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if let Some(title) = trimmed.strip_prefix('#') {
            let title = title.trim_start_matches('#').trim();
            return Self::strip_inline(title).cyan().bold().to_string();
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            return format!("{}  {} {}", indent, "•".cyan(), Self::inline(item));
        }

        if let Some(caps) = NUMBERED.as_ref().and_then(|re| re.captures(trimmed)) {
            return format!(
                "{}  {} {}",
                indent,
                format!("{}.", &caps[1]).cyan(),
                Self::inline(&caps[2])
            );
        }

        format!("{}{}", indent, Self::inline(trimmed))
    }

    /// Highlight bold spans and dim inline code
    fn inline(text: &str) -> String {
        let text = match BOLD.as_ref() {
            Some(re) => re
                .replace_all(text, |caps: &regex::Captures| {
                    caps[1].yellow().bold().to_string()
                })
                .into_owned(),
            None => text.to_string(),
        };
        match INLINE_CODE.as_ref() {
            Some(re) => re
                .replace_all(&text, |caps: &regex::Captures| caps[1].dimmed().to_string())
                .into_owned(),
            None => text,
        }
    }

    /// Drop markdown markers without styling
    fn strip_inline(text: &str) -> String {
        text.replace("**", "").replace('`', "")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> String {
        Self::format_report(report)
    }

    fn format_raw(&self, report: &AnalysisReport) -> String {
        Self::format_raw(report)
    }

    fn format_json(&self, report: &AnalysisReport) -> String {
        Self::format_json(report)
    }
}
