use std::path::Path;

use colored::Colorize;

use mc_core::AnswerKey;
use mc_drill::{DrillConfig, DrillEngine};

pub fn run(path: &Path, id: &str) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;

    let question = lesson.get(id).ok_or_else(|| match lesson.suggest(id) {
        Some(close) => format!("question not found: \"{id}\" (did you mean \"{close}\"?)"),
        None => format!("question not found: \"{id}\""),
    })?;

    println!("  {} [{}]", question.id().as_str().bold(), question.kind().to_string().dimmed());
    println!();
    println!("  {}", question.prompt().text());
    if let Some(spoken) = question.prompt().spoken() {
        println!("  spoken:     {spoken}");
    }
    println!();

    match question.answer() {
        AnswerKey::MultipleChoice {
            choices,
            correct_index,
        } => {
            for (i, choice) in choices.iter().enumerate() {
                let marker = if i == *correct_index { "*" } else { " " };
                println!("  {marker} {}) {choice}", i + 1);
            }
        }
        AnswerKey::FillInText { accepted } => {
            println!("  accepted:   {}", accepted.join(" | "));
        }
        AnswerKey::WordOrder { target } => {
            println!("  tokens:     {}", target.join(" / "));
        }
    }

    let engine = DrillEngine::new(DrillConfig::default());
    println!("  hint:       {}", engine.hint(question));
    println!("  answer:     {}", engine.reveal(question).green());
    if let Some(explanation) = question.explanation() {
        println!();
        println!("  {}", explanation.dimmed());
    }

    Ok(())
}
