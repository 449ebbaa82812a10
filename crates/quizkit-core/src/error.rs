//! Engine error types.
//!
//! Build-time failures are fatal for the question they concern but never for
//! its siblings; evaluation-time input failures are recovered locally as a
//! score of 0.0. The types here let callers classify without string matching.

use thiserror::Error;

use crate::model::QuestionKind;

/// A question could not be turned into a runnable unit.
///
/// Raised at unit-build time, before any rendering. The remaining valid
/// questions of a group still build.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    /// A choice question with no selectable options.
    #[error("question {id}: {kind} question has no options")]
    MissingOptions { id: String, kind: QuestionKind },

    /// A scored question with no correct answer.
    #[error("question {id}: {kind} question has no correct answer")]
    MissingAnswer { id: String, kind: QuestionKind },

    /// The answer's shape does not fit the question kind (e.g. a choice
    /// list on a numeric question).
    #[error("question {id}: answer does not match {kind} question")]
    AnswerMismatch { id: String, kind: QuestionKind },

    /// An unknown question kind from an external source.
    #[error("unsupported question kind: {0}")]
    UnsupportedKind(String),
}

impl BuildError {
    /// The id of the question this error concerns, if any.
    pub fn question_id(&self) -> Option<&str> {
        match self {
            BuildError::MissingOptions { id, .. }
            | BuildError::MissingAnswer { id, .. }
            | BuildError::AnswerMismatch { id, .. } => Some(id),
            BuildError::UnsupportedKind(_) => None,
        }
    }
}

/// A group could not be constructed at all.
#[derive(Debug, Clone, Error)]
pub enum GroupError {
    /// `passing_threshold` outside [0, 1].
    #[error("passing threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    /// No question in the package survived unit building.
    #[error("no valid questions to display")]
    EmptyGroup,
}

/// The answer state could not be interpreted at evaluation time.
///
/// Always recoverable: callers score the question 0.0 and carry on. Never
/// propagated into group aggregation as a fatal error.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// Free-text input that does not parse as a number.
    #[error("could not parse {0:?} as a number")]
    NotNumeric(String),

    /// Answer state of a shape the question kind cannot consume.
    #[error("answer state does not fit a {0} question")]
    WrongShape(QuestionKind),
}
