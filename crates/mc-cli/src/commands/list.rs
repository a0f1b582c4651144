use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use super::plural;

pub fn run(path: &Path, store: &Path) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;

    if lesson.is_empty() {
        println!("  No questions found.");
        return Ok(());
    }

    let progress = super::load_progress(&lesson, store);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Kind", "Prompt", "Done"]);

    for question in &lesson.questions {
        let done = if progress.completed.contains(question.id()) {
            "✓"
        } else {
            ""
        };
        table.add_row(vec![
            question.id().to_string(),
            question.kind().to_string(),
            super::truncate(question.prompt().text(), 60),
            done.to_string(),
        ]);
    }

    println!("  {}", lesson.title);
    println!("{table}");
    println!();
    println!(
        "  {} question{}, {} answered",
        lesson.len(),
        plural(lesson.len()),
        progress.completed.len()
    );

    Ok(())
}
