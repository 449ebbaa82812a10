//! quizkit-console — Terminal rendition of the presentation seam.
//!
//! Renders prompts, controls, feedback, and supplementary material to any
//! `io::Write`, and drives interactive sessions from any `io::BufRead`, so
//! the whole flow is scriptable in tests.

pub mod adapter;
pub mod input;
pub mod session;

pub use adapter::ConsoleAdapter;
pub use session::ConsoleSession;
