//! Drill engine for Masterclass lessons.
//!
//! [`DrillEngine::render`] turns a [`mc_core::QuestionSpec`] into controls on
//! a host [`Surface`] and returns a [`Drill`]. The host forwards learner input
//! to [`Drill::handle`] as [`DrillInput`] values; the first grading-eligible
//! input locks the drill, records the outcome in the
//! [`mc_core::ScoreTracker`] it is handed, and shows feedback.
//!
//! [`LessonSession`] wraps the engine for a whole lesson: score, completion,
//! preferences, retry policy, countdown, and saved progress.

pub mod builder;
pub mod config;
pub mod drill;
pub mod engine;
pub mod error;
pub mod grade;
pub mod headless;
pub mod input;
pub mod progress;
pub mod session;
pub mod surface;

pub use builder::WordBuilder;
pub use config::{DrillConfig, RetryPolicy, SessionConfig};
pub use drill::{Drill, OutcomeHandler};
pub use engine::DrillEngine;
pub use error::{DrillError, DrillResult};
pub use headless::HeadlessSurface;
pub use input::DrillInput;
pub use progress::ProgressSnapshot;
pub use session::LessonSession;
pub use surface::{Control, ControlId, ControlRole, Feedback, Mark, Surface};
