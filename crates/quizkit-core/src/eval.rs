//! Answer evaluation.
//!
//! An [`Evaluator`] is a pure scoring function over the current answer
//! state, packaged as a value so its captured question is inspectable and
//! testable without any UI binding. Scores are in [0, 1]; with the current
//! kinds they are exactly 0.0 or 1.0 (no partial credit).

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::error::{BuildError, InputError};
use crate::model::{CorrectAnswer, Question, QuestionKind};

/// The user's current answer to one displayed question.
///
/// Written by the presentation adapter through an
/// [`AnswerSlot`](crate::unit::AnswerSlot); the engine only reads it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerState {
    /// Nothing entered yet.
    Empty,
    /// Selected options of a choice question.
    Selected(BTreeSet<String>),
    /// Raw text from a free-input field.
    Text(String),
    /// A no-input question whose solution has been viewed.
    Viewed,
}

impl Default for AnswerState {
    fn default() -> Self {
        AnswerState::Empty
    }
}

impl AnswerState {
    /// Convenience constructor for a single selected option.
    pub fn selected_one(option: &str) -> Self {
        AnswerState::Selected(BTreeSet::from([option.to_string()]))
    }

    /// Convenience constructor for several selected options.
    pub fn selected<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerState::Selected(options.into_iter().map(Into::into).collect())
    }
}

/// What the evaluator compares the answer state against, resolved once at
/// build time so evaluation itself cannot fail on a malformed question.
#[derive(Debug, Clone)]
enum Expected {
    Choices(BTreeSet<String>),
    Number { value: f64, tolerance: Option<f64> },
    Reveal,
}

/// Pure scoring function for one question.
#[derive(Debug, Clone)]
pub struct Evaluator {
    question: Rc<Question>,
    expected: Expected,
}

impl Evaluator {
    /// Validate the question's kind-specific invariants and build its
    /// evaluator. This is where malformed questions are rejected, before
    /// any rendering.
    pub fn new(question: Rc<Question>) -> Result<Self, BuildError> {
        let expected = match question.kind {
            QuestionKind::SingleChoice | QuestionKind::MultiChoice => {
                if question.options.is_empty() {
                    return Err(BuildError::MissingOptions {
                        id: question.id.clone(),
                        kind: question.kind,
                    });
                }
                match &question.answer {
                    Some(CorrectAnswer::Choices(choices)) if !choices.is_empty() => {
                        if question.kind == QuestionKind::SingleChoice && choices.len() != 1 {
                            return Err(BuildError::AnswerMismatch {
                                id: question.id.clone(),
                                kind: question.kind,
                            });
                        }
                        Expected::Choices(choices.iter().cloned().collect())
                    }
                    Some(CorrectAnswer::Choices(_)) | None => {
                        return Err(BuildError::MissingAnswer {
                            id: question.id.clone(),
                            kind: question.kind,
                        });
                    }
                    Some(CorrectAnswer::Number(_)) => {
                        return Err(BuildError::AnswerMismatch {
                            id: question.id.clone(),
                            kind: question.kind,
                        });
                    }
                }
            }
            QuestionKind::Numeric => match &question.answer {
                Some(CorrectAnswer::Number(value)) => Expected::Number {
                    value: *value,
                    tolerance: question.tolerance,
                },
                Some(CorrectAnswer::Choices(_)) => {
                    return Err(BuildError::AnswerMismatch {
                        id: question.id.clone(),
                        kind: question.kind,
                    });
                }
                None => {
                    return Err(BuildError::MissingAnswer {
                        id: question.id.clone(),
                        kind: question.kind,
                    });
                }
            },
            QuestionKind::TextReveal => Expected::Reveal,
        };

        Ok(Self { question, expected })
    }

    /// The question this evaluator scores.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Score the given answer state.
    ///
    /// Pure: no side effects, same state gives the same score. Unparsable
    /// free input is an [`InputError`], which callers recover as 0.0.
    pub fn evaluate(&self, state: &AnswerState) -> Result<f64, InputError> {
        match &self.expected {
            // Viewing counts as answered.
            Expected::Reveal => Ok(1.0),

            Expected::Choices(correct) => match state {
                AnswerState::Empty => Ok(0.0),
                AnswerState::Selected(selected) => {
                    // Exact set equality; subsets and supersets score 0.
                    Ok(if selected == correct { 1.0 } else { 0.0 })
                }
                AnswerState::Text(_) | AnswerState::Viewed => {
                    Err(InputError::WrongShape(self.question.kind))
                }
            },

            Expected::Number { value, tolerance } => match state {
                AnswerState::Empty => Ok(0.0),
                AnswerState::Text(text) => {
                    let entered: f64 = text
                        .trim()
                        .parse()
                        .map_err(|_| InputError::NotNumeric(text.clone()))?;
                    let correct = match tolerance {
                        Some(tol) => (entered - value).abs() <= *tol,
                        None => entered == *value,
                    };
                    Ok(if correct { 1.0 } else { 0.0 })
                }
                AnswerState::Selected(_) | AnswerState::Viewed => {
                    Err(InputError::WrongShape(self.question.kind))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pool;

    fn question(kind: QuestionKind, options: &[&str], answer: Option<CorrectAnswer>) -> Rc<Question> {
        Rc::new(Question {
            id: "q".into(),
            kind,
            prompt: "prompt".into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer,
            tolerance: None,
            notes: vec![],
            pool: Pool::Initial,
        })
    }

    fn single_choice() -> Evaluator {
        Evaluator::new(question(
            QuestionKind::SingleChoice,
            &["A", "B", "C"],
            Some(CorrectAnswer::Choices(vec!["B".into()])),
        ))
        .unwrap()
    }

    fn multi_choice() -> Evaluator {
        Evaluator::new(question(
            QuestionKind::MultiChoice,
            &["A", "B", "C", "D"],
            Some(CorrectAnswer::Choices(vec!["A".into(), "C".into()])),
        ))
        .unwrap()
    }

    #[test]
    fn single_choice_exact_match() {
        let eval = single_choice();
        assert_eq!(eval.evaluate(&AnswerState::selected_one("B")).unwrap(), 1.0);
        assert_eq!(eval.evaluate(&AnswerState::selected_one("A")).unwrap(), 0.0);
        assert_eq!(eval.evaluate(&AnswerState::Empty).unwrap(), 0.0);
    }

    #[test]
    fn multi_choice_rejects_subset_superset_disjoint() {
        let eval = multi_choice();
        assert_eq!(
            eval.evaluate(&AnswerState::selected(["A", "C"])).unwrap(),
            1.0
        );
        // Strict subset
        assert_eq!(eval.evaluate(&AnswerState::selected(["A"])).unwrap(), 0.0);
        // Superset
        assert_eq!(
            eval.evaluate(&AnswerState::selected(["A", "C", "D"])).unwrap(),
            0.0
        );
        // Disjoint
        assert_eq!(
            eval.evaluate(&AnswerState::selected(["B", "D"])).unwrap(),
            0.0
        );
    }

    #[test]
    fn numeric_exact_match() {
        let eval = Evaluator::new(question(
            QuestionKind::Numeric,
            &[],
            Some(CorrectAnswer::Number(4.0)),
        ))
        .unwrap();
        assert_eq!(eval.evaluate(&AnswerState::Text("4".into())).unwrap(), 1.0);
        assert_eq!(
            eval.evaluate(&AnswerState::Text(" 4.0 ".into())).unwrap(),
            1.0
        );
        assert_eq!(eval.evaluate(&AnswerState::Text("4.1".into())).unwrap(), 0.0);
        assert_eq!(eval.evaluate(&AnswerState::Empty).unwrap(), 0.0);
    }

    #[test]
    fn numeric_unparsable_is_input_error() {
        let eval = Evaluator::new(question(
            QuestionKind::Numeric,
            &[],
            Some(CorrectAnswer::Number(4.0)),
        ))
        .unwrap();
        let err = eval.evaluate(&AnswerState::Text("abc".into())).unwrap_err();
        assert!(matches!(err, InputError::NotNumeric(_)));
    }

    #[test]
    fn numeric_with_tolerance() {
        let q = Question {
            id: "q".into(),
            kind: QuestionKind::Numeric,
            prompt: "pi?".into(),
            options: vec![],
            answer: Some(CorrectAnswer::Number(3.14159)),
            tolerance: Some(0.01),
            notes: vec![],
            pool: Pool::Initial,
        };
        let eval = Evaluator::new(Rc::new(q)).unwrap();
        assert_eq!(eval.evaluate(&AnswerState::Text("3.14".into())).unwrap(), 1.0);
        assert_eq!(eval.evaluate(&AnswerState::Text("3.2".into())).unwrap(), 0.0);
    }

    #[test]
    fn text_reveal_always_scores_full() {
        let eval = Evaluator::new(question(QuestionKind::TextReveal, &[], None)).unwrap();
        assert_eq!(eval.evaluate(&AnswerState::Empty).unwrap(), 1.0);
        assert_eq!(eval.evaluate(&AnswerState::Viewed).unwrap(), 1.0);
        assert_eq!(
            eval.evaluate(&AnswerState::Text("anything".into())).unwrap(),
            1.0
        );
    }

    #[test]
    fn build_rejects_missing_answer() {
        let err = Evaluator::new(question(QuestionKind::SingleChoice, &["A", "B"], None))
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingAnswer { .. }));

        let err = Evaluator::new(question(QuestionKind::Numeric, &[], None)).unwrap_err();
        assert!(matches!(err, BuildError::MissingAnswer { .. }));
    }

    #[test]
    fn build_rejects_missing_options() {
        let err = Evaluator::new(question(
            QuestionKind::MultiChoice,
            &[],
            Some(CorrectAnswer::Choices(vec!["A".into()])),
        ))
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingOptions { .. }));
    }

    #[test]
    fn build_rejects_answer_shape_mismatch() {
        // Numeric answer on a choice question
        let err = Evaluator::new(question(
            QuestionKind::SingleChoice,
            &["A", "B"],
            Some(CorrectAnswer::Number(1.0)),
        ))
        .unwrap_err();
        assert!(matches!(err, BuildError::AnswerMismatch { .. }));

        // Several correct answers on a single-choice question
        let err = Evaluator::new(question(
            QuestionKind::SingleChoice,
            &["A", "B"],
            Some(CorrectAnswer::Choices(vec!["A".into(), "B".into()])),
        ))
        .unwrap_err();
        assert!(matches!(err, BuildError::AnswerMismatch { .. }));
    }
}
