//! Session reports with JSON persistence.
//!
//! A session report is the full attempt history of one displayed group:
//! what fraction was correct on each check and whether the group ended up
//! passed. Scores are not persisted across sessions; a report is a plain
//! export of one sitting.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The aggregate result of one group check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based check sequence number.
    pub attempt: u32,
    /// Units that scored exactly 1.0.
    pub correct: usize,
    /// Units that were active for this check.
    pub total: usize,
    /// `correct / total`.
    pub fraction: f64,
    /// Whether this check met the passing threshold.
    pub passed: bool,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

/// One sitting of a question group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the group was first displayed.
    pub created_at: DateTime<Utc>,
    /// Name of the quiz package.
    pub quiz_name: String,
    /// The threshold the group was checked against.
    pub passing_threshold: f64,
    /// Every check performed, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Whether the group reached its terminal passed state.
    pub passed: bool,
}

impl SessionReport {
    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }
}
