//! Interactive quiz sessions over arbitrary reader/writer pairs.

use std::io::{BufRead, Write};

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::adapter::PresentationAdapter;
use quizkit_core::group::GroupController;
use quizkit_core::session::SessionReport;
use quizkit_core::unit::QuestionUnit;

use crate::adapter::ConsoleAdapter;
use crate::input::parse_answer;

/// Drives a quiz over a buffered reader (answers) and a writer (display).
///
/// Generic over both ends so tests can script a whole session with a
/// `Cursor` and a `Vec<u8>`.
pub struct ConsoleSession<R: BufRead, W: Write> {
    reader: R,
    adapter: ConsoleAdapter<W>,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            adapter: ConsoleAdapter::new(writer),
        }
    }

    /// Recover the output writer, e.g. to inspect what a test rendered.
    pub fn into_writer(self) -> W {
        self.adapter.into_inner()
    }

    /// Read one answer line. `None` means the input stream ended.
    fn read_line(&mut self) -> Result<Option<String>> {
        let _ = write!(self.adapter.writer_mut(), "> ");
        let _ = self.adapter.writer_mut().flush();
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Record an answer for every displayed unit. The prompts themselves
    /// were already rendered by `mount`; this only labels which question
    /// each input line belongs to.
    ///
    /// Returns `false` if the input stream ended before all units were
    /// answered.
    fn collect_answers(&mut self, units: &[QuestionUnit]) -> Result<bool> {
        // Snapshot controls and slots first; the slots stay valid even
        // though the units themselves belong to the controller.
        let pending: Vec<_> = units
            .iter()
            .map(|unit| (unit.control(), unit.answer_slot()))
            .collect();

        for (index, (control, slot)) in pending.into_iter().enumerate() {
            let _ = write!(self.adapter.writer_mut(), "\n[{}] ", index + 1);
            match self.read_line()? {
                Some(line) => slot.set(parse_answer(&control, &line)),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Run a whole group sitting: mount, answer, check, retry on failure.
    ///
    /// Stops on a pass, after `max_attempts` failed checks, or when the
    /// input stream ends. Returns whether the group was passed.
    pub fn run_group(&mut self, controller: &mut GroupController, max_attempts: u32) -> Result<bool> {
        controller.mount(&mut self.adapter);

        loop {
            if !self.collect_answers(controller.units())? {
                break;
            }
            let outcome = controller.check(&mut self.adapter);
            if outcome.passed {
                break;
            }
            if controller.attempt_count() >= max_attempts {
                let _ = writeln!(
                    self.adapter.writer_mut(),
                    "\nOut of attempts ({max_attempts})."
                );
                break;
            }
        }

        self.print_report(&controller.session_report());
        Ok(controller.is_passed())
    }

    /// Run standalone units one at a time, with immediate feedback after
    /// each answer (per-question display mode).
    pub fn run_units(&mut self, units: &[QuestionUnit]) -> Result<usize> {
        let mut correct = 0;
        for (index, unit) in units.iter().enumerate() {
            self.adapter
                .mount_unit(index, &unit.question().prompt, &unit.control());
            match self.read_line()? {
                Some(line) => unit.answer_slot().set(parse_answer(&unit.control(), &line)),
                None => break,
            }
            let payload = unit.feedback();
            if payload.is_correct {
                correct += 1;
            }
            self.adapter.render_feedback(index, &payload);
        }
        Ok(correct)
    }

    fn print_report(&mut self, report: &SessionReport) {
        if report.attempts.is_empty() {
            return;
        }

        let mut table = Table::new();
        table.set_header(vec!["Attempt", "Correct", "Score", "Result"]);
        for record in &report.attempts {
            table.add_row(vec![
                Cell::new(record.attempt),
                Cell::new(format!("{}/{}", record.correct, record.total)),
                Cell::new(format!("{:.0}%", record.fraction * 100.0)),
                Cell::new(if record.passed { "passed" } else { "failed" }),
            ]);
        }
        let _ = writeln!(self.adapter.writer_mut(), "\n{table}");
    }
}
