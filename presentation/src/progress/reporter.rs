//! Progress indication while an exchange is in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pid_domain::ExchangeKind;
use std::time::Duration;

/// Spinner shown while waiting on the model
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Start a spinner for `kind`. With `enabled == false` nothing is drawn.
    pub fn start(kind: ExchangeKind, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(Self::message(kind));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.bold.cyan} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn message(kind: ExchangeKind) -> &'static str {
        match kind {
            ExchangeKind::Seeding => "Analyzing Diagram",
            ExchangeKind::FollowUp => "Thinking",
        }
    }

    /// Stop the spinner, leaving a status line on success.
    pub fn finish(mut self, success: bool) {
        let Some(bar) = self.bar.take() else {
            return;
        };
        if success {
            bar.finish_and_clear();
        } else {
            bar.abandon_with_message(format!("{}", "failed".red()));
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar
            && !bar.is_finished()
        {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ProgressReporter::message(ExchangeKind::Seeding),
            "Analyzing Diagram"
        );
        assert_eq!(ProgressReporter::message(ExchangeKind::FollowUp), "Thinking");
    }

    #[test]
    fn test_disabled_reporter_is_inert() {
        let reporter = ProgressReporter::start(ExchangeKind::Seeding, false);
        assert!(reporter.bar.is_none());
        reporter.finish(true);
    }
}
