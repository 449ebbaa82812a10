//! Group controller — the pass/retry state machine.
//!
//! A controller owns the currently displayed question units, aggregates
//! their scores against the package's passing threshold, and on failure
//! resamples the retry pool and rebuilds the displayed set. Multiple
//! controllers coexist independently; there is no process-wide state.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

use crate::adapter::PresentationAdapter;
use crate::error::{BuildError, GroupError};
use crate::eval::Evaluator;
use crate::model::{AdditionalMaterial, Pool, Question, QuestionPackage};
use crate::sample::sample_without_replacement;
use crate::session::{AttemptRecord, SessionReport};
use crate::unit::QuestionUnit;

/// The aggregate result of one check action.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// 1-based check sequence number.
    pub attempt: u32,
    /// Units that scored exactly 1.0.
    pub correct: usize,
    /// Active units at evaluation time.
    pub total: usize,
    /// `correct / total`.
    pub fraction: f64,
    /// Whether the threshold was met. Boundary equality passes.
    pub passed: bool,
    /// Whether the displayed set was rebuilt from the retry pool.
    pub resampled: bool,
}

/// Owns a set of question units and drives the pass/retry cycle.
pub struct GroupController {
    name: String,
    threshold: f64,
    additional_material: Option<AdditionalMaterial>,
    /// Validated first-load questions, in authored order.
    initial_questions: Vec<Question>,
    /// Validated resample pool.
    retry_questions: Vec<Question>,
    /// Size of the first displayed set; retry samples aim for this size.
    initial_size: usize,
    units: Vec<QuestionUnit>,
    attempt_count: u32,
    passed: bool,
    material_revealed: bool,
    rng: Box<dyn RngCore>,
    history: Vec<AttemptRecord>,
    session_id: Uuid,
    started_at: chrono::DateTime<Utc>,
}

impl std::fmt::Debug for GroupController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupController")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("initial_size", &self.initial_size)
            .field("attempt_count", &self.attempt_count)
            .field("passed", &self.passed)
            .field("material_revealed", &self.material_revealed)
            .field("session_id", &self.session_id)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl GroupController {
    /// Build a controller from a package with an entropy-seeded RNG.
    ///
    /// Malformed questions are rejected individually and returned; the
    /// group still builds from the valid remainder.
    pub fn new(package: QuestionPackage) -> Result<(Self, Vec<BuildError>), GroupError> {
        Self::with_rng(package, Box::new(StdRng::from_entropy()))
    }

    /// Build a controller with an injected random source, so retry
    /// sampling is deterministic under a fixed seed.
    pub fn with_rng(
        package: QuestionPackage,
        rng: Box<dyn RngCore>,
    ) -> Result<(Self, Vec<BuildError>), GroupError> {
        if !(0.0..=1.0).contains(&package.passing_threshold) {
            return Err(GroupError::InvalidThreshold(package.passing_threshold));
        }

        // Validate every question up front, so a later resample can never
        // hit a malformed retry question mid-cycle.
        let mut initial_questions = Vec::new();
        let mut retry_questions = Vec::new();
        let mut rejected = Vec::new();
        for question in package.questions {
            match Evaluator::new(std::rc::Rc::new(question.clone())) {
                Ok(_) => match question.pool {
                    Pool::Initial => initial_questions.push(question),
                    Pool::Retry => retry_questions.push(question),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting question from group");
                    rejected.push(e);
                }
            }
        }

        let units: Vec<QuestionUnit> = initial_questions
            .iter()
            .cloned()
            .filter_map(|q| QuestionUnit::build(q).ok())
            .collect();
        if units.is_empty() {
            return Err(GroupError::EmptyGroup);
        }
        let initial_size = units.len();

        Ok((
            Self {
                name: package.name,
                threshold: package.passing_threshold,
                additional_material: package.additional_material,
                initial_questions,
                retry_questions,
                initial_size,
                units,
                attempt_count: 0,
                passed: false,
                material_revealed: false,
                rng,
                history: Vec::new(),
                session_id: Uuid::new_v4(),
                started_at: Utc::now(),
            },
            rejected,
        ))
    }

    /// The currently displayed units, in display order.
    pub fn units(&self) -> &[QuestionUnit] {
        &self.units
    }

    pub fn passing_threshold(&self) -> f64 {
        self.threshold
    }

    /// Failed attempts so far (incremented only when a check fails).
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Whether the group has reached its terminal passed state.
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Sticky once a check has failed; never reverts, even after a later
    /// pass.
    pub fn material_revealed(&self) -> bool {
        self.material_revealed
    }

    /// Mount the complete active set on the adapter.
    pub fn mount(&self, adapter: &mut dyn PresentationAdapter) {
        for (index, unit) in self.units.iter().enumerate() {
            adapter.mount_unit(index, &unit.question().prompt, &unit.control());
        }
    }

    /// Run the group check action.
    ///
    /// Every active unit is evaluated before anything is aggregated or
    /// rendered; per-unit feedback is then rendered for every unit
    /// regardless of the outcome. On failure the supplementary material is
    /// revealed (once), the displayed set is atomically rebuilt from the
    /// retry pool, and the new set is mounted. A check on an already
    /// passed group is a no-op returning the terminal outcome.
    pub fn check(&mut self, adapter: &mut dyn PresentationAdapter) -> CheckOutcome {
        if self.passed {
            if let Some(record) = self.history.last() {
                return CheckOutcome {
                    attempt: record.attempt,
                    correct: record.correct,
                    total: record.total,
                    fraction: record.fraction,
                    passed: true,
                    resampled: false,
                };
            }
        }

        let scores: Vec<f64> = self.units.iter().map(|unit| unit.check()).collect();
        let total = scores.len();
        let correct = scores.iter().filter(|score| **score == 1.0).count();
        let fraction = correct as f64 / total as f64;
        let passed = fraction >= self.threshold;

        for (index, unit) in self.units.iter().enumerate() {
            adapter.render_feedback(index, &unit.feedback());
        }

        let mut resampled = false;
        if passed {
            self.passed = true;
        } else {
            self.attempt_count += 1;
            if !self.material_revealed {
                self.material_revealed = true;
                if let Some(material) = &self.additional_material {
                    adapter.reveal_additional_material(material);
                }
            }
            self.resample(adapter);
            resampled = true;
        }

        let outcome = CheckOutcome {
            attempt: self.history.len() as u32 + 1,
            correct,
            total,
            fraction,
            passed,
            resampled,
        };
        self.history.push(AttemptRecord {
            attempt: outcome.attempt,
            correct,
            total,
            fraction,
            passed,
            checked_at: Utc::now(),
        });
        adapter.render_group_summary(&outcome);
        outcome
    }

    /// Replace the displayed set with a fresh sample from the retry pool.
    ///
    /// With no retry pool the initial set is redisplayed as-is. The old
    /// units are fully replaced before the new set is mounted, so the
    /// adapter never sees a mixed display.
    fn resample(&mut self, adapter: &mut dyn PresentationAdapter) {
        let sampled = if self.retry_questions.is_empty() {
            self.initial_questions.clone()
        } else {
            sample_without_replacement(&self.retry_questions, self.initial_size, &mut *self.rng)
        };

        let mut fresh = Vec::with_capacity(sampled.len());
        for question in sampled {
            match QuestionUnit::build(question) {
                Ok(unit) => fresh.push(unit),
                // Questions were validated at construction; a failure here
                // means the pool was mutated out from under us.
                Err(e) => tracing::error!(error = %e, "validated question failed to rebuild"),
            }
        }
        self.units = fresh;
        self.mount(adapter);
    }

    /// Export the attempt history of this sitting.
    pub fn session_report(&self) -> SessionReport {
        SessionReport {
            id: self.session_id,
            created_at: self.started_at,
            quiz_name: self.name.clone(),
            passing_threshold: self.threshold,
            attempts: self.history.clone(),
            passed: self.passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::AnswerState;
    use crate::feedback::FeedbackPayload;
    use crate::model::{CorrectAnswer, QuestionKind};
    use crate::unit::ControlDescriptor;
    use std::collections::HashSet;

    /// Test adapter that records everything it is told to render.
    #[derive(Default)]
    struct RecordingAdapter {
        mounted: Vec<String>,
        feedback: Vec<(usize, FeedbackPayload)>,
        summaries: Vec<CheckOutcome>,
        revealed: Vec<AdditionalMaterial>,
    }

    impl PresentationAdapter for RecordingAdapter {
        fn mount_unit(&mut self, _index: usize, prompt: &str, _control: &ControlDescriptor) {
            self.mounted.push(prompt.to_string());
        }

        fn render_feedback(&mut self, index: usize, payload: &FeedbackPayload) {
            self.feedback.push((index, payload.clone()));
        }

        fn render_group_summary(&mut self, outcome: &CheckOutcome) {
            self.summaries.push(outcome.clone());
        }

        fn reveal_additional_material(&mut self, material: &AdditionalMaterial) {
            self.revealed.push(material.clone());
        }
    }

    fn single_choice(id: &str, correct: &str, pool: Pool) -> Question {
        Question {
            id: id.into(),
            kind: QuestionKind::SingleChoice,
            prompt: id.into(),
            options: vec!["A".into(), "B".into(), "C".into()],
            answer: Some(CorrectAnswer::Choices(vec![correct.into()])),
            tolerance: None,
            notes: vec![],
            pool,
        }
    }

    fn numeric(id: &str, answer: f64, pool: Pool) -> Question {
        Question {
            id: id.into(),
            kind: QuestionKind::Numeric,
            prompt: id.into(),
            options: vec![],
            answer: Some(CorrectAnswer::Number(answer)),
            tolerance: None,
            notes: vec![],
            pool,
        }
    }

    fn text_reveal(id: &str, pool: Pool) -> Question {
        Question {
            id: id.into(),
            kind: QuestionKind::TextReveal,
            prompt: id.into(),
            options: vec![],
            answer: None,
            tolerance: None,
            notes: vec![],
            pool,
        }
    }

    fn package(questions: Vec<Question>, threshold: f64) -> QuestionPackage {
        QuestionPackage {
            name: "test".into(),
            description: String::new(),
            questions,
            passing_threshold: threshold,
            additional_material: Some(AdditionalMaterial::Text {
                body: "study this".into(),
            }),
            status: None,
        }
    }

    fn seeded(
        questions: Vec<Question>,
        threshold: f64,
        seed: u64,
    ) -> (GroupController, Vec<BuildError>) {
        GroupController::with_rng(
            package(questions, threshold),
            Box::new(StdRng::seed_from_u64(seed)),
        )
        .unwrap()
    }

    fn active_ids(controller: &GroupController) -> Vec<String> {
        controller
            .units()
            .iter()
            .map(|u| u.question().id.clone())
            .collect()
    }

    #[test]
    fn passing_scenario_all_correct() {
        let (mut group, rejected) = seeded(
            vec![
                single_choice("mc", "B", Pool::Initial),
                numeric("num", 4.0, Pool::Initial),
            ],
            1.0,
            1,
        );
        assert!(rejected.is_empty());

        group.units()[0]
            .answer_slot()
            .set(AnswerState::selected_one("B"));
        group.units()[1].answer_slot().set(AnswerState::Text("4".into()));

        let mut adapter = RecordingAdapter::default();
        let outcome = group.check(&mut adapter);

        assert_eq!(outcome.fraction, 1.0);
        assert!(outcome.passed);
        assert!(!outcome.resampled);
        assert!(group.is_passed());
        assert_eq!(group.attempt_count(), 0);
        assert!(!group.material_revealed());
        assert!(adapter.revealed.is_empty());
        // Feedback rendered for every unit regardless of outcome.
        assert_eq!(adapter.feedback.len(), 2);
    }

    #[test]
    fn failing_scenario_triggers_retry_and_reveal() {
        let (mut group, _) = seeded(
            vec![
                single_choice("mc", "B", Pool::Initial),
                numeric("num", 4.0, Pool::Initial),
            ],
            1.0,
            1,
        );

        group.units()[0]
            .answer_slot()
            .set(AnswerState::selected_one("A"));
        group.units()[1].answer_slot().set(AnswerState::Text("4".into()));

        let mut adapter = RecordingAdapter::default();
        let outcome = group.check(&mut adapter);

        assert_eq!(outcome.fraction, 0.5);
        assert!(!outcome.passed);
        assert!(outcome.resampled);
        assert_eq!(group.attempt_count(), 1);
        assert!(group.material_revealed());
        assert_eq!(adapter.revealed.len(), 1);
        // Both answered units still got their feedback before the rebuild.
        assert_eq!(adapter.feedback.len(), 2);
        // The rebuilt set was mounted and exactly one summary was rendered.
        assert_eq!(adapter.mounted.len(), 2);
        assert_eq!(adapter.summaries.len(), 1);
        assert!(!adapter.summaries[0].passed);
    }

    #[test]
    fn boundary_fraction_equal_to_threshold_passes() {
        let (mut group, _) = seeded(
            vec![
                single_choice("q1", "A", Pool::Initial),
                single_choice("q2", "A", Pool::Initial),
                single_choice("q3", "A", Pool::Initial),
                single_choice("q4", "A", Pool::Initial),
            ],
            0.75,
            1,
        );

        for unit in &group.units()[..3] {
            unit.answer_slot().set(AnswerState::selected_one("A"));
        }
        group.units()[3]
            .answer_slot()
            .set(AnswerState::selected_one("B"));

        let outcome = group.check(&mut RecordingAdapter::default());
        assert_eq!(outcome.fraction, 0.75);
        assert!(outcome.passed);
    }

    #[test]
    fn text_reveal_always_counts_as_correct() {
        let (mut group, _) = seeded(
            vec![
                text_reveal("read", Pool::Initial),
                single_choice("mc", "B", Pool::Initial),
            ],
            1.0,
            1,
        );
        group.units()[1]
            .answer_slot()
            .set(AnswerState::selected_one("B"));

        let outcome = group.check(&mut RecordingAdapter::default());
        assert_eq!(outcome.correct, 2);
        assert!(outcome.passed);
    }

    #[test]
    fn resample_draws_initial_count_from_retry_pool_without_duplicates() {
        let (mut group, _) = seeded(
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("i2", "B", Pool::Initial),
                single_choice("r1", "B", Pool::Retry),
                single_choice("r2", "B", Pool::Retry),
                single_choice("r3", "B", Pool::Retry),
                single_choice("r4", "B", Pool::Retry),
            ],
            1.0,
            42,
        );

        // Answer nothing; the check fails and resamples.
        group.check(&mut RecordingAdapter::default());

        let ids = active_ids(&group);
        assert_eq!(ids.len(), 2);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 2);
        assert!(ids.iter().all(|id| id.starts_with('r')));
    }

    #[test]
    fn resample_is_deterministic_under_fixed_seed() {
        let questions = || {
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("i2", "B", Pool::Initial),
                single_choice("r1", "B", Pool::Retry),
                single_choice("r2", "B", Pool::Retry),
                single_choice("r3", "B", Pool::Retry),
                single_choice("r4", "B", Pool::Retry),
                single_choice("r5", "B", Pool::Retry),
            ]
        };

        let (mut a, _) = seeded(questions(), 1.0, 7);
        let (mut b, _) = seeded(questions(), 1.0, 7);
        a.check(&mut RecordingAdapter::default());
        b.check(&mut RecordingAdapter::default());
        assert_eq!(active_ids(&a), active_ids(&b));
    }

    #[test]
    fn small_retry_pool_shrinks_the_displayed_set() {
        let (mut group, _) = seeded(
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("i2", "B", Pool::Initial),
                single_choice("i3", "B", Pool::Initial),
                single_choice("r1", "B", Pool::Retry),
            ],
            1.0,
            3,
        );

        group.check(&mut RecordingAdapter::default());
        assert_eq!(active_ids(&group), vec!["r1"]);
    }

    #[test]
    fn no_retry_pool_redisplays_the_initial_set() {
        let (mut group, _) = seeded(
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("i2", "B", Pool::Initial),
            ],
            1.0,
            3,
        );

        let mut adapter = RecordingAdapter::default();
        group.check(&mut adapter);
        assert_eq!(active_ids(&group), vec!["i1", "i2"]);
        // Fresh units: previous answers are gone.
        assert_eq!(group.units()[0].last_score(), None);
    }

    #[test]
    fn material_reveal_is_sticky_across_a_later_pass() {
        let (mut group, _) = seeded(
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("r1", "B", Pool::Retry),
            ],
            1.0,
            5,
        );

        let mut adapter = RecordingAdapter::default();
        // First attempt fails.
        group.check(&mut adapter);
        assert!(group.material_revealed());
        assert_eq!(adapter.revealed.len(), 1);

        // Second attempt passes; the reveal does not repeat or revert.
        group.units()[0]
            .answer_slot()
            .set(AnswerState::selected_one("B"));
        let outcome = group.check(&mut adapter);
        assert!(outcome.passed);
        assert!(group.material_revealed());
        assert_eq!(adapter.revealed.len(), 1);
    }

    #[test]
    fn unparsable_numeric_input_does_not_abort_the_check() {
        let (mut group, _) = seeded(
            vec![
                numeric("num", 4.0, Pool::Initial),
                single_choice("mc", "B", Pool::Initial),
            ],
            1.0,
            1,
        );
        group.units()[0]
            .answer_slot()
            .set(AnswerState::Text("abc".into()));
        group.units()[1]
            .answer_slot()
            .set(AnswerState::selected_one("B"));

        let outcome = group.check(&mut RecordingAdapter::default());
        assert_eq!(outcome.correct, 1);
        assert_eq!(outcome.fraction, 0.5);
        assert!(!outcome.passed);
    }

    #[test]
    fn check_after_pass_is_a_no_op() {
        let (mut group, _) = seeded(vec![text_reveal("read", Pool::Initial)], 1.0, 1);

        let mut adapter = RecordingAdapter::default();
        let first = group.check(&mut adapter);
        assert!(first.passed);

        let again = group.check(&mut adapter);
        assert!(again.passed);
        assert_eq!(again.attempt, first.attempt);
        // No new evaluation, feedback, or history entry.
        assert_eq!(group.session_report().attempts.len(), 1);
        assert_eq!(adapter.feedback.len(), 1);
    }

    #[test]
    fn rejected_questions_do_not_abort_siblings() {
        let mut broken = single_choice("broken", "B", Pool::Initial);
        broken.options.clear();

        let (group, rejected) = GroupController::with_rng(
            package(
                vec![single_choice("ok", "B", Pool::Initial), broken],
                1.0,
            ),
            Box::new(StdRng::seed_from_u64(0)),
        )
        .unwrap();

        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].question_id(), Some("broken"));
        assert_eq!(active_ids(&group), vec!["ok"]);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let err = GroupController::with_rng(
            package(vec![text_reveal("read", Pool::Initial)], 1.5),
            Box::new(StdRng::seed_from_u64(0)),
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::InvalidThreshold(_)));
    }

    #[test]
    fn group_with_no_valid_questions_is_an_error() {
        let mut broken = single_choice("broken", "B", Pool::Initial);
        broken.answer = None;

        let err = GroupController::with_rng(
            package(vec![broken], 1.0),
            Box::new(StdRng::seed_from_u64(0)),
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::EmptyGroup));
    }

    #[test]
    fn session_report_captures_the_whole_cycle() {
        let (mut group, _) = seeded(
            vec![
                single_choice("i1", "B", Pool::Initial),
                single_choice("r1", "B", Pool::Retry),
            ],
            1.0,
            5,
        );

        let mut adapter = RecordingAdapter::default();
        group.check(&mut adapter); // fail
        group.units()[0]
            .answer_slot()
            .set(AnswerState::selected_one("B"));
        group.check(&mut adapter); // pass

        let report = group.session_report();
        assert_eq!(report.attempts.len(), 2);
        assert!(!report.attempts[0].passed);
        assert!(report.attempts[1].passed);
        assert!(report.passed);
        assert_eq!(report.quiz_name, "test");
    }
}
