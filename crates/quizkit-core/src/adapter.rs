//! The presentation seam.
//!
//! The engine never renders anything; it hands the adapter control
//! descriptors, feedback payloads, and reveal signals, and the adapter does
//! whatever its host UI needs. Implemented by `quizkit-console` for
//! terminals; a notebook or web front end would implement the same trait.

use crate::feedback::FeedbackPayload;
use crate::group::CheckOutcome;
use crate::model::AdditionalMaterial;
use crate::unit::ControlDescriptor;

/// Host-UI integration point for mounting controls and rendering feedback.
pub trait PresentationAdapter {
    /// Mount (or replace) the control for the unit at `index`.
    ///
    /// On a retry rebuild the controller mounts the complete new set, so
    /// the adapter always sees a fully replaced display, never a mix of
    /// old and new units.
    fn mount_unit(&mut self, index: usize, prompt: &str, control: &ControlDescriptor);

    /// Render per-question feedback next to the unit at `index`.
    fn render_feedback(&mut self, index: usize, payload: &FeedbackPayload);

    /// Render the aggregate outcome of a group check.
    fn render_group_summary(&mut self, outcome: &CheckOutcome);

    /// Show the supplementary material. Called at most once per group;
    /// the revealed state is sticky from then on.
    fn reveal_additional_material(&mut self, material: &AdditionalMaterial);
}

/// Adapter that renders nothing. Useful for headless evaluation and tests.
pub struct NoopAdapter;

impl PresentationAdapter for NoopAdapter {
    fn mount_unit(&mut self, _: usize, _: &str, _: &ControlDescriptor) {}
    fn render_feedback(&mut self, _: usize, _: &FeedbackPayload) {}
    fn render_group_summary(&mut self, _: &CheckOutcome) {}
    fn reveal_additional_material(&mut self, _: &AdditionalMaterial) {}
}
