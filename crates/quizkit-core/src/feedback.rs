//! Feedback composition.
//!
//! A composer turns a score into a user-facing payload. Composers are
//! swappable per question kind through [`default_composer`]; any type
//! implementing [`FeedbackCompose`] works, so custom question kinds never
//! touch the group controller.

use serde::{Deserialize, Serialize};

use crate::eval::AnswerState;
use crate::model::{Question, QuestionKind};

/// User-facing feedback for one question check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Text to display next to the question's control.
    pub text: String,
    /// Whether the answer was fully correct. Drives styling.
    pub is_correct: bool,
}

/// Score-to-feedback composition for one question.
///
/// Gets the answer state alongside the score, so a composer can tell an
/// unanswered question apart from a wrongly answered one.
pub trait FeedbackCompose {
    fn compose(&self, question: &Question, state: &AnswerState, score: f64) -> FeedbackPayload;
}

/// Default policy: correct means a perfect score, and the question's notes
/// are shown only then. An empty answer gets its own message instead of
/// being called wrong.
#[derive(Debug, Clone, Default)]
pub struct StandardComposer;

impl FeedbackCompose for StandardComposer {
    fn compose(&self, question: &Question, state: &AnswerState, score: f64) -> FeedbackPayload {
        let is_correct = score == 1.0;
        let text = if is_correct {
            let mut text = String::from("Correct!");
            for note in &question.notes {
                text.push('\n');
                text.push_str(note);
            }
            text
        } else if *state == AnswerState::Empty {
            String::from("No answer selected!")
        } else {
            String::from("Wrong answer!")
        };
        FeedbackPayload { text, is_correct }
    }
}

/// Composer for no-input questions: always correct, and the payload is the
/// suggested solution itself.
#[derive(Debug, Clone, Default)]
pub struct RevealComposer;

impl FeedbackCompose for RevealComposer {
    fn compose(&self, question: &Question, _state: &AnswerState, _score: f64) -> FeedbackPayload {
        let text = if question.notes.is_empty() {
            String::from("This question has no suggested solution.")
        } else {
            question.notes.join("\n")
        };
        FeedbackPayload {
            text,
            is_correct: true,
        }
    }
}

/// Dispatch table from question kind to its default composer.
pub fn default_composer(kind: QuestionKind) -> Box<dyn FeedbackCompose> {
    match kind {
        QuestionKind::SingleChoice | QuestionKind::MultiChoice | QuestionKind::Numeric => {
            Box::new(StandardComposer)
        }
        QuestionKind::TextReveal => Box::new(RevealComposer),
    }
}
