use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path, store: &Path) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;
    let progress = super::load_progress(&lesson, store);

    println!("  {}", lesson.title.bold());
    println!();

    let Some(saved_at) = progress.saved_at else {
        println!("  No saved progress.");
        return Ok(());
    };

    let done = progress.completed.progress(lesson.len());
    println!("  score:      {}", progress.totals);
    println!(
        "  completed:  {}/{} questions ({:.0}%)",
        progress.completed.len(),
        lesson.len(),
        done * 100.0
    );
    println!("  accent:     {}", progress.preferences.accent);
    println!("  help:       {}", progress.preferences.help_language);
    println!(
        "  hints:      {}",
        if progress.preferences.show_help { "on" } else { "off" }
    );
    println!("  saved:      {}", saved_at.format("%Y-%m-%d %H:%M UTC"));

    Ok(())
}
