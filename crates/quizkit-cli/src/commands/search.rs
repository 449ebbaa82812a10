//! The `quizkit search` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizkit_fetch::{FaceitClient, QuestionSource};

pub async fn execute(
    query: String,
    base_url: Option<String>,
    threshold: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = FaceitClient::new(base_url, threshold);
    let package = client
        .search(&query)
        .await
        .with_context(|| format!("search for \"{query}\" failed"))?;

    if package.questions.is_empty() {
        println!("No questions found for \"{query}\".");
        return Ok(());
    }

    if let Some(path) = output {
        package.save_json(&path)?;
        println!(
            "Saved {} questions to {}",
            package.questions.len(),
            path.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Kind", "Prompt"]);
    for question in &package.questions {
        table.add_row(vec![
            Cell::new(&question.id),
            Cell::new(question.kind),
            Cell::new(truncate(&question.prompt, 60)),
        ]);
    }
    println!("{table}");
    println!("{} question(s) for \"{query}\".", package.questions.len());

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}
