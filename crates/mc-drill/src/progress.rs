//! Saved lesson progress.
//!
//! A [`ProgressSnapshot`] is stored as one JSON string under
//! `masterclass.<lesson-slug>.progress` in a [`KeyValueStore`]. Loading never
//! fails: a missing, unreadable, malformed or newer-version blob yields the
//! default snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mc_core::{CompletionSet, Outcome, QuestionId, ScoreTotals};
use mc_host::{KeyValueStore, Preferences};

use crate::error::DrillResult;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Storage key for a lesson's progress.
pub fn storage_key(lesson_slug: &str) -> String {
    format!("masterclass.{lesson_slug}.progress")
}

/// Everything persisted between visits to a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// When the snapshot was taken.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Score so far.
    #[serde(default)]
    pub totals: ScoreTotals,
    /// Questions answered at least once.
    #[serde(default)]
    pub completed: CompletionSet,
    /// Last grade of each answered question.
    #[serde(default)]
    pub outcomes: BTreeMap<QuestionId, Outcome>,
    /// Learner preferences.
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: None,
            totals: ScoreTotals::default(),
            completed: CompletionSet::default(),
            outcomes: BTreeMap::new(),
            preferences: Preferences::default(),
        }
    }
}

impl ProgressSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> DrillResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> DrillResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the snapshot stored under `key`, falling back to defaults.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(key, error = %e, "could not read saved progress");
                return Self::default();
            }
        };

        match Self::from_json(&raw) {
            Ok(snapshot) if snapshot.version > SNAPSHOT_VERSION => {
                warn!(key, version = snapshot.version, "saved progress is from a newer version, ignoring");
                Self::default()
            }
            Ok(snapshot) => {
                info!(key, totals = %snapshot.totals, "loaded saved progress");
                snapshot
            }
            Err(e) => {
                warn!(key, error = %e, "saved progress is malformed, starting fresh");
                Self::default()
            }
        }
    }

    /// Stamp and write the snapshot under `key`.
    pub fn save(&mut self, store: &mut dyn KeyValueStore, key: &str) -> DrillResult<()> {
        self.version = SNAPSHOT_VERSION;
        self.saved_at = Some(Utc::now());
        store.set(key, &self.to_json()?)?;
        info!(key, totals = %self.totals, "saved progress");
        Ok(())
    }

    /// Delete whatever is stored under `key`.
    pub fn clear(store: &mut dyn KeyValueStore, key: &str) -> DrillResult<()> {
        store.remove(key)?;
        info!(key, "cleared saved progress");
        Ok(())
    }
}
