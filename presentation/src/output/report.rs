//! Result of a one-shot run: the analysis plus answered follow-ups

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis: String,
    pub answers: Vec<AnsweredQuestion>,
}

impl AnalysisReport {
    pub fn new(analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            answers: Vec::new(),
        }
    }

    pub fn push_answer(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.answers.push(AnsweredQuestion {
            question: question.into(),
            answer: answer.into(),
        });
    }
}
