use std::path::Path;

use colored::Colorize;

use super::plural;

pub fn run(path: &Path) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;

    if lesson.is_empty() {
        return Err(format!("'{}' has no questions", lesson.title));
    }

    if let Err(errors) = lesson.validate() {
        for error in &errors {
            eprintln!("  {} {error}", "error:".red().bold());
        }
        return Err(format!(
            "{} problem{} found in '{}'",
            errors.len(),
            plural(errors.len()),
            lesson.title
        ));
    }

    println!("  All checks passed for '{}'.", lesson.title);
    println!("  {} question{}", lesson.len(), plural(lesson.len()));

    Ok(())
}
