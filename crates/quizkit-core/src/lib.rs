//! quizkit-core — Question model, evaluators, feedback composition, and the
//! group pass/retry state machine.
//!
//! This crate defines the fundamental data model and scoring logic that the
//! rest of quizkit builds on. It is fully synchronous: every evaluation and
//! state transition runs inside the activation handler that triggered it.

pub mod adapter;
pub mod error;
pub mod eval;
pub mod feedback;
pub mod group;
pub mod model;
pub mod parser;
pub mod sample;
pub mod session;
pub mod unit;
