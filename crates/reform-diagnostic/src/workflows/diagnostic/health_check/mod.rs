//! Step 1: the hidden workload health check.
//!
//! Answers are recorded against the static question bank by option index, and
//! a [`DiagnosticResult`] only exists once every question has an answer.

mod category;
mod questions;

pub use category::{HealthCategory, CAUTION_THRESHOLD, DANGER_THRESHOLD};
pub use questions::{
    find_question, max_total_score, question_bank, Question, QuestionId, QuestionOption,
    QUESTION_BANK,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question {0} is not part of the health check")]
    UnknownQuestion(u8),
    #[error("question {question} has no option #{option_index}")]
    UnknownOption { question: u8, option_index: usize },
}

/// A single answer as submitted by a quiz view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    pub question_id: QuestionId,
    pub option_index: usize,
}

/// The user's answers keyed by question; re-answering overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    scores: BTreeMap<QuestionId, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_selections<I>(selections: I) -> Result<Self, AnswerError>
    where
        I: IntoIterator<Item = AnswerSelection>,
    {
        let mut answers = Self::new();
        for selection in selections {
            answers.record(selection.question_id, selection.option_index)?;
        }
        Ok(answers)
    }

    /// Record (or overwrite) the answer to `question_id`, returning the score it carries.
    pub fn record(&mut self, question_id: QuestionId, option_index: usize) -> Result<u8, AnswerError> {
        let question =
            find_question(question_id).ok_or(AnswerError::UnknownQuestion(question_id.0))?;
        let option = question
            .option(option_index)
            .ok_or(AnswerError::UnknownOption {
                question: question_id.0,
                option_index,
            })?;

        self.scores.insert(question_id, option.score);
        Ok(option.score)
    }

    pub fn score_for(&self, question_id: QuestionId) -> Option<u8> {
        self.scores.get(&question_id).copied()
    }

    pub fn answered(&self) -> usize {
        self.scores.len()
    }

    pub fn is_complete(&self) -> bool {
        self.scores.len() == QUESTION_BANK.len()
    }

    pub fn progress(&self) -> HealthCheckProgress {
        HealthCheckProgress {
            answered: self.answered(),
            total: QUESTION_BANK.len(),
        }
    }

    pub fn total_score(&self) -> u8 {
        self.scores.values().sum()
    }

    /// `None` until all six questions are answered.
    pub fn result(&self) -> Option<DiagnosticResult> {
        if !self.is_complete() {
            return None;
        }

        Some(DiagnosticResult::from_total(self.total_score()))
    }
}

/// Progress counter shown while the quiz is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthCheckProgress {
    pub answered: usize,
    pub total: usize,
}

/// Derived outcome of a completed answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiagnosticResult")]
pub struct DiagnosticResult {
    total_score: u8,
    category: HealthCategory,
}

impl DiagnosticResult {
    /// Callers outside the crate obtain results from a complete [`AnswerSet`]
    /// or a validated deserialization, so the score never exceeds the bank maximum.
    pub(crate) fn from_total(total_score: u8) -> Self {
        debug_assert!(total_score <= max_total_score());
        Self {
            total_score,
            category: HealthCategory::classify(total_score),
        }
    }

    pub fn total_score(&self) -> u8 {
        self.total_score
    }

    pub fn category(&self) -> HealthCategory {
        self.category
    }

    pub fn view(&self) -> DiagnosticResultView {
        DiagnosticResultView {
            total_score: self.total_score,
            category: self.category,
            label: self.category.label(),
            message: self.category.message(),
            explanation: self.category.explanation(),
        }
    }
}

#[derive(Deserialize)]
struct RawDiagnosticResult {
    total_score: u8,
    category: HealthCategory,
}

impl TryFrom<RawDiagnosticResult> for DiagnosticResult {
    type Error = String;

    fn try_from(raw: RawDiagnosticResult) -> Result<Self, Self::Error> {
        if raw.total_score > max_total_score() {
            return Err(format!(
                "total_score {} exceeds the maximum of {}",
                raw.total_score,
                max_total_score()
            ));
        }

        let result = Self::from_total(raw.total_score);
        if result.category != raw.category {
            return Err(format!(
                "category {:?} does not match total_score {}",
                raw.category, raw.total_score
            ));
        }
        Ok(result)
    }
}

/// Presentation payload with the fixed category copy attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticResultView {
    pub total_score: u8,
    pub category: HealthCategory,
    pub label: &'static str,
    pub message: &'static str,
    pub explanation: &'static str,
}
