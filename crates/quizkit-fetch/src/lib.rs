//! quizkit-fetch — Remote question-bank integration.
//!
//! Fetches question packages from a FaceIT-style search API and converts
//! the wire format into the core model. The engine itself never sees the
//! transport; it consumes the typed `QuestionPackage`.

pub mod client;
pub mod error;
pub mod format;
pub mod mock;

pub use client::{FaceitClient, QuestionSource};
pub use error::FetchError;
