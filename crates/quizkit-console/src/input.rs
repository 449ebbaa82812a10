//! Mapping of raw console lines onto answer states.
//!
//! Parsing is intentionally forgiving: anything unrecognizable collapses to
//! an empty answer rather than an error, so a stray keystroke can never
//! abort a check.

use quizkit_core::eval::AnswerState;
use quizkit_core::unit::ControlDescriptor;

/// Resolve one token against an option list, by letter ("a", "b", ...) or by
/// case-insensitive option text.
fn resolve_option(options: &[String], token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if token.len() == 1 {
        let c = token.chars().next().unwrap().to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            let index = (c as u8 - b'a') as usize;
            if let Some(option) = options.get(index) {
                return Some(option.clone());
            }
        }
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(token))
        .cloned()
}

/// Interpret a raw input line as the answer for the given control.
pub fn parse_answer(control: &ControlDescriptor, line: &str) -> AnswerState {
    let line = line.trim();
    match control {
        ControlDescriptor::ToggleButtons { options } => match resolve_option(options, line) {
            Some(option) => AnswerState::selected_one(&option),
            None => AnswerState::Empty,
        },
        ControlDescriptor::Checkboxes { options } => {
            let picked: Vec<String> = line
                .split(',')
                .filter_map(|token| resolve_option(options, token))
                .collect();
            if picked.is_empty() {
                AnswerState::Empty
            } else {
                AnswerState::selected(picked)
            }
        }
        ControlDescriptor::NumberField => {
            if line.is_empty() {
                AnswerState::Empty
            } else {
                AnswerState::Text(line.to_string())
            }
        }
        // Any input (including an empty line) counts as viewing.
        ControlDescriptor::RevealButton { .. } => AnswerState::Viewed,
    }
}
