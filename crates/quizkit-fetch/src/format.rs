//! FaceIT wire-format conversion.
//!
//! The question bank's JSON distinguishes single- from multi-answer
//! multiple choice by the length of the answer list, sends numeric answers
//! as strings, and marks no-input questions as `TEXT`. All of that is
//! normalized here into the core model; the rest of the system never sees
//! the wire shapes.

use serde::Deserialize;

use quizkit_core::error::BuildError;
use quizkit_core::model::{CorrectAnswer, Pool, Question, QuestionKind, QuestionPackage};

/// Response body of a `fetch_questions` call.
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    pub status: String,
    #[serde(default)]
    pub questions: Vec<WireQuestion>,
}

/// One question as the bank sends it.
#[derive(Debug, Deserialize)]
pub struct WireQuestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub body: String,
    /// Selectable options.
    #[serde(default)]
    pub answers: Option<Vec<String>>,
    /// Correct answer: a list for choice questions, a bare string for
    /// numeric ones.
    #[serde(default)]
    pub answer: Option<WireAnswer>,
    #[serde(default)]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireAnswer {
    Many(Vec<String>),
    One(String),
}

impl WireAnswer {
    fn into_list(self) -> Vec<String> {
        match self {
            WireAnswer::Many(list) => list,
            WireAnswer::One(one) => vec![one],
        }
    }
}

/// Convert one wire question. `index` is used to synthesize an id, since
/// the bank does not send one.
pub fn convert_question(index: usize, wire: WireQuestion) -> Result<Question, BuildError> {
    let id = format!("q{}", index + 1);
    let notes = wire.notes.unwrap_or_default();

    match wire.kind.as_str() {
        "MULTIPLE_CHOICE" => {
            let options = wire.answers.unwrap_or_default();
            if options.is_empty() {
                return Err(BuildError::MissingOptions {
                    id,
                    kind: QuestionKind::MultiChoice,
                });
            }
            let correct = match wire.answer {
                Some(answer) => answer.into_list(),
                None => Vec::new(),
            };
            // A single correct answer means single choice.
            let kind = if correct.len() == 1 {
                QuestionKind::SingleChoice
            } else {
                QuestionKind::MultiChoice
            };
            if correct.is_empty() {
                return Err(BuildError::MissingAnswer { id, kind });
            }
            Ok(Question {
                id,
                kind,
                prompt: wire.body,
                options,
                answer: Some(CorrectAnswer::Choices(correct)),
                tolerance: None,
                notes,
                pool: Pool::Initial,
            })
        }

        "NUMERIC" => {
            let answer = match wire.answer {
                Some(WireAnswer::One(text)) => {
                    text.trim().parse::<f64>().map_err(|_| {
                        BuildError::AnswerMismatch {
                            id: id.clone(),
                            kind: QuestionKind::Numeric,
                        }
                    })?
                }
                Some(WireAnswer::Many(_)) => {
                    return Err(BuildError::AnswerMismatch {
                        id,
                        kind: QuestionKind::Numeric,
                    });
                }
                None => {
                    return Err(BuildError::MissingAnswer {
                        id,
                        kind: QuestionKind::Numeric,
                    });
                }
            };
            Ok(Question {
                id,
                kind: QuestionKind::Numeric,
                prompt: wire.body,
                options: vec![],
                answer: Some(CorrectAnswer::Number(answer)),
                tolerance: None,
                notes,
                pool: Pool::Initial,
            })
        }

        "TEXT" => Ok(Question {
            id,
            kind: QuestionKind::TextReveal,
            prompt: wire.body,
            options: vec![],
            answer: None,
            tolerance: None,
            notes,
            pool: Pool::Initial,
        }),

        other => Err(BuildError::UnsupportedKind(other.to_string())),
    }
}

/// Convert a whole response into a package.
///
/// Unconvertible questions are reported individually; the package is still
/// built from the valid remainder. The wire format carries no threshold,
/// so the caller supplies one.
pub fn package_from_wire(
    response: WireResponse,
    name: &str,
    passing_threshold: f64,
) -> (QuestionPackage, Vec<BuildError>) {
    let mut questions = Vec::new();
    let mut rejected = Vec::new();

    for (index, wire) in response.questions.into_iter().enumerate() {
        match convert_question(index, wire) {
            Ok(question) => questions.push(question),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unconvertible question");
                rejected.push(e);
            }
        }
    }

    let package = QuestionPackage {
        name: name.to_string(),
        description: String::new(),
        questions,
        passing_threshold,
        additional_material: None,
        status: Some(response.status),
    };
    (package, rejected)
}
