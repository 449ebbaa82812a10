//! The `quizkit run` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizkit_console::ConsoleSession;
use quizkit_core::group::GroupController;
use quizkit_core::model::QuestionPackage;
use quizkit_core::parser::parse_package;
use quizkit_core::unit::build_units;

pub fn execute(
    quiz: PathBuf,
    max_attempts: u32,
    seed: Option<u64>,
    per_question: bool,
    report: Option<PathBuf>,
) -> Result<()> {
    // JSON packages come from `quizkit search --output`; TOML is the
    // hand-authoring format.
    let package = if quiz.extension().is_some_and(|ext| ext == "json") {
        QuestionPackage::load_json(&quiz)?
    } else {
        parse_package(&quiz)?
    };

    println!("{}", package.name);
    if !package.description.is_empty() {
        println!("{}", package.description);
    }

    if per_question {
        let (units, errors) = build_units(package.questions);
        for e in &errors {
            eprintln!("Skipping question: {e}");
        }
        anyhow::ensure!(!units.is_empty(), "no usable questions in {}", quiz.display());

        let mut session = ConsoleSession::new(io::stdin().lock(), io::stdout());
        let correct = session.run_units(&units)?;
        println!("\n{correct}/{} correct.", units.len());
        return Ok(());
    }

    let rng: Box<dyn rand::RngCore> = match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    };
    let (mut controller, rejected) = GroupController::with_rng(package, rng)
        .with_context(|| format!("failed to build quiz group from {}", quiz.display()))?;
    for e in &rejected {
        eprintln!("Skipping question: {e}");
    }

    let passed = {
        let mut session = ConsoleSession::new(io::stdin().lock(), io::stdout());
        session.run_group(&mut controller, max_attempts)?
    };

    if let Some(path) = report {
        controller.session_report().save_json(&path)?;
        eprintln!("Session report saved to: {}", path.display());
    }

    if passed {
        println!("Quiz passed.");
    } else {
        println!("Quiz not passed.");
    }
    Ok(())
}
