//! Core data model types for quizkit.
//!
//! These are the fundamental types the whole system uses to represent quiz
//! questions, question packages, and supplementary material.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The kind of input control a question presents, and how it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One correct option among several; exactly one may be selected.
    SingleChoice,
    /// A set of correct options; scored on exact set equality.
    MultiChoice,
    /// Free numeric input compared against a single value.
    Numeric,
    /// No input; a revealable solution. Always scores 1.0.
    TextReveal,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::SingleChoice => write!(f, "single_choice"),
            QuestionKind::MultiChoice => write!(f, "multi_choice"),
            QuestionKind::Numeric => write!(f, "numeric"),
            QuestionKind::TextReveal => write!(f, "text_reveal"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_choice" | "single" => Ok(QuestionKind::SingleChoice),
            "multi_choice" | "multi" => Ok(QuestionKind::MultiChoice),
            "numeric" | "number" => Ok(QuestionKind::Numeric),
            "text_reveal" | "text" => Ok(QuestionKind::TextReveal),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// The correct answer for a question.
///
/// Choice kinds carry a set of option strings (order is irrelevant when
/// scoring); numeric kinds carry a single value. TextReveal questions have
/// no answer at all, so `Question::answer` is an `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Choices(Vec<String>),
    Number(f64),
}

/// Which display set a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    /// Shown when the group is first displayed.
    Initial,
    /// Sampled from when a group attempt fails.
    Retry,
}

impl Default for Pool {
    fn default() -> Self {
        Pool::Initial
    }
}

/// A single quiz question. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within its package.
    pub id: String,
    /// How the question is presented and scored.
    pub kind: QuestionKind,
    /// Question text. May embed math markup; opaque to the engine.
    pub prompt: String,
    /// Selectable options (choice kinds only).
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer. Required for every kind except TextReveal.
    #[serde(default)]
    pub answer: Option<CorrectAnswer>,
    /// Comparison tolerance for numeric answers. Absent means exact match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Explanations shown after a correct evaluation. For TextReveal this
    /// is the revealable solution.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Membership in the first-load set vs. the retry resample pool.
    #[serde(default)]
    pub pool: Pool,
}

/// Supplementary content shown to students who fail a group attempt.
///
/// Payloads are opaque to the engine; the presentation adapter decides how
/// to render each variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AdditionalMaterial {
    /// Raw text.
    Text { body: String },
    /// External video identifier.
    Video { video_id: String },
    /// Source code to render verbatim/preformatted.
    Code { source: String },
}

/// An ordered collection of questions plus group-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPackage {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Description of the package.
    #[serde(default)]
    pub description: String,
    /// The questions, in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Minimum fraction of fully correct questions required to pass.
    /// Required; there is no implicit default.
    pub passing_threshold: f64,
    /// Supplementary material revealed after a failed attempt.
    #[serde(default)]
    pub additional_material: Option<AdditionalMaterial>,
    /// Fetch metadata reported by a remote question bank. Unused by the
    /// engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl QuestionPackage {
    /// Questions shown on first load.
    pub fn initial_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.pool == Pool::Initial)
    }

    /// Questions available for resampling after a failed attempt.
    pub fn retry_pool(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.pool == Pool::Retry)
    }

    /// Parse a package from its JSON representation.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse question package JSON")
    }

    /// Load a package from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read package from {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Save the package as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize package")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write package to {}", path.display()))?;
        Ok(())
    }
}
