//! Non-interactive run: analyze one diagram, then answer queued questions

use crate::output::{AnalysisReport, messages};
use crate::progress::ProgressReporter;
use pid_application::{AnalysisSessionManager, SessionError};
use pid_domain::{DiagramImage, ExchangeKind};
use tracing::warn;

/// Analyze `image` and ask each of `questions` in order on the same session.
///
/// A failed follow-up is recorded with the standard apology so later
/// questions still run; only a failed analysis aborts the run.
pub async fn run_one_shot(
    manager: &AnalysisSessionManager,
    image: DiagramImage,
    questions: &[String],
    show_progress: bool,
) -> Result<AnalysisReport, SessionError> {
    let progress = ProgressReporter::start(ExchangeKind::Seeding, show_progress);
    let analysis = manager.begin_analysis(image).await;
    progress.finish(analysis.is_ok());

    let mut report = AnalysisReport::new(analysis?);

    for question in questions.iter().filter(|q| !q.trim().is_empty()) {
        let progress = ProgressReporter::start(ExchangeKind::FollowUp, show_progress);
        let result = manager.ask_follow_up(question).await;
        progress.finish(result.is_ok());

        let answer = match result {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Follow-up '{}' failed: {}", question, e);
                messages::FOLLOW_UP_FAILED.to_string()
            }
        };
        report.push_answer(question.as_str(), answer);
    }

    Ok(report)
}
