//! Output formatting for analyses and answers

pub mod console;
pub mod formatter;
pub mod messages;
pub mod report;

pub use console::ConsoleFormatter;
pub use formatter::OutputFormatter;
pub use report::{AnalysisReport, AnsweredQuestion};
