//! Terminal implementation of the presentation adapter.

use std::io::Write;

use quizkit_core::adapter::PresentationAdapter;
use quizkit_core::feedback::FeedbackPayload;
use quizkit_core::group::CheckOutcome;
use quizkit_core::model::AdditionalMaterial;
use quizkit_core::unit::ControlDescriptor;

/// Letter label for the option at `index` ("a", "b", ...).
pub fn option_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Renders quiz output to a writer. Write failures on a console are not
/// actionable mid-session, so they are swallowed here.
pub struct ConsoleAdapter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Access the underlying writer, e.g. for input prompts.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationAdapter for ConsoleAdapter<W> {
    fn mount_unit(&mut self, index: usize, prompt: &str, control: &ControlDescriptor) {
        let _ = writeln!(self.out, "\n{}) {}", index + 1, prompt);
        match control {
            ControlDescriptor::ToggleButtons { options } => {
                for (i, option) in options.iter().enumerate() {
                    let _ = writeln!(self.out, "   {}) {}", option_letter(i), option);
                }
                let _ = writeln!(self.out, "   (pick one)");
            }
            ControlDescriptor::Checkboxes { options } => {
                for (i, option) in options.iter().enumerate() {
                    let _ = writeln!(self.out, "   {}) {}", option_letter(i), option);
                }
                let _ = writeln!(self.out, "   (pick all that apply, e.g. \"a,c\")");
            }
            ControlDescriptor::NumberField => {
                let _ = writeln!(self.out, "   (enter a number)");
            }
            ControlDescriptor::RevealButton { has_solution } => {
                if *has_solution {
                    let _ = writeln!(self.out, "   (press enter to reveal the solution)");
                } else {
                    let _ = writeln!(self.out, "   (this question has no suggested solution)");
                }
            }
        }
    }

    fn render_feedback(&mut self, index: usize, payload: &FeedbackPayload) {
        let mark = if payload.is_correct { "+" } else { "x" };
        let _ = writeln!(self.out, "[{}] {} {}", index + 1, mark, payload.text);
    }

    fn render_group_summary(&mut self, outcome: &CheckOutcome) {
        let verdict = if outcome.passed {
            "passed"
        } else {
            "not passed"
        };
        let _ = writeln!(
            self.out,
            "\nAttempt {}: {}/{} correct ({:.0}%) - {}",
            outcome.attempt,
            outcome.correct,
            outcome.total,
            outcome.fraction * 100.0,
            verdict
        );
    }

    fn reveal_additional_material(&mut self, material: &AdditionalMaterial) {
        let _ = writeln!(self.out, "\n--- Additional material ---");
        match material {
            AdditionalMaterial::Text { body } => {
                let _ = writeln!(self.out, "{body}");
            }
            AdditionalMaterial::Video { video_id } => {
                let _ = writeln!(self.out, "Watch: {video_id}");
            }
            AdditionalMaterial::Code { source } => {
                for line in source.lines() {
                    let _ = writeln!(self.out, "    {line}");
                }
            }
        }
        let _ = writeln!(self.out, "---------------------------");
    }
}
