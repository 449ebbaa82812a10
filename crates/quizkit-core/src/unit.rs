//! Question-unit composition.
//!
//! A [`QuestionUnit`] bundles a question's control descriptor, its answer
//! slot, its evaluator, and its feedback composer into one runnable,
//! answerable item. Units are built when a group (re)builds its displayed
//! set and discarded on retry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::BuildError;
use crate::eval::{AnswerState, Evaluator};
use crate::feedback::{default_composer, FeedbackCompose, FeedbackPayload};
use crate::model::{Question, QuestionKind};

/// Shared handle to one question's mutable answer state.
///
/// The presentation adapter holds a clone and writes into it as the user
/// interacts; the engine only reads. Single-threaded by design, so a plain
/// `Rc<RefCell>` is all the synchronization needed.
#[derive(Debug, Clone, Default)]
pub struct AnswerSlot(Rc<RefCell<AnswerState>>);

impl AnswerSlot {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(AnswerState::Empty)))
    }

    /// Replace the current answer state.
    pub fn set(&self, state: AnswerState) {
        *self.0.borrow_mut() = state;
    }

    /// Snapshot of the current answer state.
    pub fn get(&self) -> AnswerState {
        self.0.borrow().clone()
    }
}

/// Which input control the adapter should mount for a question.
///
/// Purely descriptive; the engine never renders anything itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlDescriptor {
    /// Mutually exclusive option buttons (single choice).
    ToggleButtons { options: Vec<String> },
    /// Independently toggleable options (multi choice).
    Checkboxes { options: Vec<String> },
    /// Free-text field expecting a number.
    NumberField,
    /// A "show solution" control for no-input questions.
    RevealButton { has_solution: bool },
}

/// One instantiated, answerable rendering of a question.
pub struct QuestionUnit {
    question: Rc<Question>,
    evaluator: Evaluator,
    composer: Box<dyn FeedbackCompose>,
    slot: AnswerSlot,
    last_score: Cell<Option<f64>>,
}

impl QuestionUnit {
    /// Validate the question and build its unit.
    ///
    /// Fails only for malformed questions; the error carries the question
    /// id so a group build can report it and continue with the siblings.
    pub fn build(question: Question) -> Result<Self, BuildError> {
        let question = Rc::new(question);
        let evaluator = Evaluator::new(Rc::clone(&question))?;
        let composer = default_composer(question.kind);
        Ok(Self {
            question,
            evaluator,
            composer,
            slot: AnswerSlot::new(),
            last_score: Cell::new(None),
        })
    }

    /// Swap in a custom feedback composer.
    pub fn with_composer(mut self, composer: Box<dyn FeedbackCompose>) -> Self {
        self.composer = composer;
        self
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Handle for the adapter to write the user's answer into.
    pub fn answer_slot(&self) -> AnswerSlot {
        self.slot.clone()
    }

    /// Describe the input control to mount for this question.
    pub fn control(&self) -> ControlDescriptor {
        match self.question.kind {
            QuestionKind::SingleChoice => ControlDescriptor::ToggleButtons {
                options: self.question.options.clone(),
            },
            QuestionKind::MultiChoice => ControlDescriptor::Checkboxes {
                options: self.question.options.clone(),
            },
            QuestionKind::Numeric => ControlDescriptor::NumberField,
            QuestionKind::TextReveal => ControlDescriptor::RevealButton {
                has_solution: !self.question.notes.is_empty(),
            },
        }
    }

    /// Evaluate the current answer state and record the score.
    ///
    /// Unrecognized input is scored 0.0 rather than propagated; a check
    /// action must never crash on a stray keystroke.
    pub fn check(&self) -> f64 {
        let state = self.slot.get();
        let score = match self.evaluator.evaluate(&state) {
            Ok(score) => score,
            Err(e) => {
                tracing::debug!(question = %self.question.id, error = %e, "input not scorable, counting as 0");
                0.0
            }
        };
        self.last_score.set(Some(score));
        score
    }

    /// Score recorded by the most recent [`check`](Self::check).
    pub fn last_score(&self) -> Option<f64> {
        self.last_score.get()
    }

    /// Evaluate and compose the displayable feedback.
    ///
    /// Idempotent: with an unchanged answer slot, repeated calls yield the
    /// same payload and the same recorded score.
    pub fn feedback(&self) -> FeedbackPayload {
        let score = self.check();
        let state = self.slot.get();
        self.composer.compose(&self.question, &state, score)
    }
}

/// Build independent units for a list of questions (per-question display
/// mode — no grouping, no retry pool, no additional material).
///
/// Invalid questions are reported, not fatal: the remaining questions still
/// build.
pub fn build_units<I>(questions: I) -> (Vec<QuestionUnit>, Vec<BuildError>)
where
    I: IntoIterator<Item = Question>,
{
    let mut units = Vec::new();
    let mut errors = Vec::new();
    for question in questions {
        match QuestionUnit::build(question) {
            Ok(unit) => units.push(unit),
            Err(e) => {
                tracing::warn!(error = %e, "skipping question that failed to build");
                errors.push(e);
            }
        }
    }
    (units, errors)
}
