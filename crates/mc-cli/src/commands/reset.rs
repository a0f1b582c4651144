use std::path::Path;

use mc_drill::ProgressSnapshot;
use mc_drill::progress::storage_key;
use mc_host::FileStore;

pub fn run(path: &Path, store: &Path) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;
    let mut store = FileStore::new(store);

    ProgressSnapshot::clear(&mut store, &storage_key(&lesson.slug()))
        .map_err(|e| format!("failed to reset progress: {e}"))?;

    println!("  Progress cleared for '{}'.", lesson.title);
    Ok(())
}
