//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.toml with your own questions");
    println!("  2. Run: quizkit validate --quiz quizzes/example.toml");
    println!("  3. Run: quizkit run --quiz quizzes/example.toml");

    Ok(())
}

const EXAMPLE_QUIZ: &str = r#"[quiz]
name = "Derivatives"
description = "Basic differentiation practice"
passing_threshold = 0.75

[quiz.additional_material]
type = "TEXT"
body = "Review the power rule and the derivatives of the trigonometric functions."

[[questions]]
id = "sin-derivative"
kind = "single_choice"
prompt = "What is the derivative of sin(x)?"
options = ["-cos(x)", "tan(x)", "cos(x)"]
answer = ["cos(x)"]
notes = ["The derivative of sin(x) is cos(x)."]

[[questions]]
id = "even-numbers"
kind = "multi_choice"
prompt = "Which of these are even?"
options = ["1", "2", "3", "4"]
answer = ["2", "4"]

[[questions]]
id = "two-squared"
kind = "numeric"
prompt = "What is 2^2?"
answer = 4.0

[[questions]]
id = "chain-rule"
kind = "text"
prompt = "State the chain rule for yourself, then reveal the solution."
notes = ["(f(g(x)))' = f'(g(x)) * g'(x)"]

# Questions below are resampled into the displayed set after a failed attempt.

[[questions]]
id = "cos-derivative"
kind = "single_choice"
prompt = "What is the derivative of cos(x)?"
options = ["-sin(x)", "sin(x)", "-cos(x)"]
answer = ["-sin(x)"]
pool = "retry"

[[questions]]
id = "x-squared-derivative"
kind = "single_choice"
prompt = "What is the derivative of x^2?"
options = ["x", "2x", "x^2 / 2"]
answer = ["2x"]
pool = "retry"

[[questions]]
id = "three-cubed"
kind = "numeric"
prompt = "What is 3^3?"
answer = 27.0
pool = "retry"

[[questions]]
id = "e-derivative"
kind = "single_choice"
prompt = "What is the derivative of e^x?"
options = ["e^x", "x * e^(x-1)", "ln(x)"]
answer = ["e^x"]
pool = "retry"
"#;
