//! Host capabilities for Masterclass lessons.
//!
//! Every capability here is optional. Each one is a trait with at least one
//! provider that does nothing, and every failure is turned into a one-line
//! [`Notice`] instead of an error that could reach the grading code.

/// Clipboard writes.
pub mod clipboard;
/// Error and capability types.
pub mod error;
/// Microphone recording.
pub mod microphone;
/// One-line user-visible messages.
pub mod notice;
/// Learner preferences persisted with progress.
pub mod preferences;
/// Text-to-speech.
pub mod speech;
/// Key-value persistence.
pub mod storage;
/// Countdown timer for session pacing.
pub mod timer;

pub use clipboard::{ClipboardProvider, copy_best_effort};
pub use error::{Capability, HostError, HostResult};
pub use microphone::{MicrophoneProvider, Recorder, RecorderEvent};
pub use notice::{Notice, NoticeLevel};
pub use preferences::{HelpLanguage, Preferences};
pub use speech::{Accent, SilentSpeech, SpeechAnnouncer, SpeechOptions, Voice, select_voice};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{Countdown, Tick};
