// src/quiz.rs

//! Quiz engine: an immutable question bank plus a small state machine
//! over answer selection, submission, and reset.
//!
//! The bank is fixed data for the process lifetime; nothing adds, removes,
//! or reorders questions at runtime. The built-in bank is embedded as JSON
//! and shared by value with the export serializer, which writes the same
//! data into the standalone artifact.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// One multiple-choice question. This shape is the full data contract
/// between the externally supplied bank, the quiz engine, and the export
/// serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable unique identifier.
    pub id: u32,
    /// Prompt text.
    pub prompt: String,
    /// Ordered option texts.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct: usize,
    /// Explanation revealed after submission.
    pub explanation: String,
}

/// An immutable, ordered set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

static BUILTIN_BANK: Lazy<QuestionBank> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/questions.json"))
        .expect("embedded question bank is valid JSON")
});

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in six-question bank on quadratic functions.
    pub fn builtin() -> &'static QuestionBank {
        &BUILTIN_BANK
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Errors a caller can react to when driving a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("unknown question id {0}")]
    UnknownQuestion(u32),
    #[error("option {option} out of range for question {question} ({len} options)")]
    OptionOutOfRange { question: u32, option: usize, len: usize },
}

/// Visual affordance for one option row after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    /// The correct option, highlighted whether or not it was selected.
    Correct,
    /// A selected option that is not the correct one.
    WrongSelection,
    /// Everything else.
    Neutral,
}

/// Mutable quiz state over an immutable bank: selected answers per
/// question id and the submission flag that gates feedback.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    answers: HashMap<u32, usize>,
    submitted: bool,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank, answers: HashMap::new(), submitted: false }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// The selected option for a question, if any.
    pub fn selection(&self, question_id: u32) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    /// Selects (or re-selects) an option. Does not touch the submission
    /// flag, so selecting after "check answers" updates the stored answer
    /// while feedback stays visible.
    pub fn select(&mut self, question_id: u32, option: usize) -> Result<(), QuizError> {
        let question = self
            .bank
            .get(question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question: question_id,
                option,
                len: question.options.len(),
            });
        }
        self.answers.insert(question_id, option);
        Ok(())
    }

    /// "Check answers": reveals feedback. Answer state is untouched.
    pub fn submit(&mut self) {
        self.submitted = true;
    }

    /// Returns to the initial state: no selections, feedback hidden.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.submitted = false;
    }

    /// Count of exactly-correct selections. Recomputed on demand, never
    /// cached across a reset.
    pub fn score(&self) -> usize {
        self.bank
            .questions()
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct))
            .count()
    }

    /// Per-option feedback; `None` until the session is submitted.
    pub fn feedback(&self, question_id: u32, option: usize) -> Option<OptionFeedback> {
        if !self.submitted {
            return None;
        }
        let question = self.bank.get(question_id)?;
        if option >= question.options.len() {
            return None;
        }
        let feedback = if option == question.correct {
            OptionFeedback::Correct
        } else if self.selection(question_id) == Some(option) {
            OptionFeedback::WrongSelection
        } else {
            OptionFeedback::Neutral
        };
        Some(feedback)
    }

    /// Explanation text for a question, revealed for every question after
    /// submission regardless of whether it was answered.
    pub fn explanation(&self, question_id: u32) -> Option<&str> {
        if !self.submitted {
            return None;
        }
        self.bank.get(question_id).map(|q| q.explanation.as_str())
    }
}
