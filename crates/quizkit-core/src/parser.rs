//! TOML quiz authoring parser.
//!
//! Loads question packages from TOML files and directories, and validates
//! them for common authoring mistakes. The JSON representation in
//! [`crate::model`] is the interchange format; TOML is the hand-authoring
//! format.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    AdditionalMaterial, CorrectAnswer, Pool, Question, QuestionKind, QuestionPackage,
};

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    name: String,
    #[serde(default)]
    description: String,
    passing_threshold: f64,
    #[serde(default)]
    additional_material: Option<AdditionalMaterial>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    kind: String,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: Option<CorrectAnswer>,
    #[serde(default)]
    tolerance: Option<f64>,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    pool: Option<Pool>,
}

/// Parse a single TOML file into a `QuestionPackage`.
pub fn parse_package(path: &Path) -> Result<QuestionPackage> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_package_str(&content, path)
}

/// Parse a TOML string into a `QuestionPackage` (useful for testing).
pub fn parse_package_str(content: &str, source_path: &Path) -> Result<QuestionPackage> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind: QuestionKind = q
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

            Ok(Question {
                id: q.id,
                kind,
                prompt: q.prompt,
                options: q.options,
                answer: q.answer,
                tolerance: q.tolerance,
                notes: q.notes,
                pool: q.pool.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionPackage {
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        questions,
        passing_threshold: parsed.quiz.passing_threshold,
        additional_material: parsed.quiz.additional_material,
        status: None,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuestionPackage>> {
    let mut packages = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            packages.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_package(&path) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(packages)
}

/// A warning from package validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a package for common authoring issues.
pub fn validate_package(package: &QuestionPackage) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !(0.0..=1.0).contains(&package.passing_threshold) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "passing_threshold {} is outside [0, 1]",
                package.passing_threshold
            ),
        });
    }

    // Duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for question in &package.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    for question in &package.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }

        // Correct choices that are not offered can never be selected.
        if let Some(CorrectAnswer::Choices(choices)) = &question.answer {
            for choice in choices {
                if !question.options.contains(choice) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: format!("correct answer {choice:?} is not among the options"),
                    });
                }
            }
            if question.kind == QuestionKind::SingleChoice && choices.len() > 1 {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id.clone()),
                    message: "single_choice question has more than one correct answer".into(),
                });
            }
        }

        if question.tolerance.is_some_and(|t| t < 0.0) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "tolerance is negative".into(),
            });
        }
    }

    let initial = package.initial_questions().count();
    let retry = package.retry_pool().count();
    if retry > 0 && retry < initial {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "retry pool has {retry} question(s) but the initial set has {initial}; \
                 retries will display a smaller set"
            ),
        });
    }

    warnings
}
