pub mod check;
pub mod list;
pub mod play;
pub mod reset;
pub mod show;
pub mod stats;

use std::path::Path;

use mc_core::Lesson;
use mc_drill::ProgressSnapshot;
use mc_drill::progress::storage_key;
use mc_host::FileStore;

/// Load a lesson file, turning errors into CLI messages.
fn load_lesson(path: &Path) -> Result<Lesson, String> {
    Lesson::load(path).map_err(|e| format!("{}: {e}", path.display()))
}

/// Saved progress for `lesson` in the store directory.
fn load_progress(lesson: &Lesson, store: &Path) -> ProgressSnapshot {
    ProgressSnapshot::load(&FileStore::new(store), &storage_key(&lesson.slug()))
}

/// Shorten `text` to at most `max` characters, ending with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
