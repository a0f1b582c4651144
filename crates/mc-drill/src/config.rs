//! Configuration for drills and lesson sessions.

use std::time::Duration;

use mc_host::HelpLanguage;

/// Hint shown when a question has none of its own.
pub const DEFAULT_HINT: &str = "Read the question again carefully.";

/// Configuration for a [`DrillEngine`](crate::DrillEngine).
#[derive(Debug, Clone)]
pub struct DrillConfig {
    /// RNG seed for reproducible shuffling.
    pub seed: u64,
    /// Present multiple-choice options in random order.
    pub shuffle_choices: bool,
    /// Present word-order tokens in random order.
    pub shuffle_tokens: bool,
    /// Grade a word-order drill as soon as the last token is placed.
    pub auto_check: bool,
    /// Hint used when a question has none.
    pub hint_fallback: String,
    /// Language of feedback messages and notices.
    pub help_language: HelpLanguage,
    /// Render the hint control and answer hint requests.
    pub show_hints: bool,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle_choices: true,
            shuffle_tokens: true,
            auto_check: false,
            hint_fallback: DEFAULT_HINT.to_string(),
            help_language: HelpLanguage::default(),
            show_hints: true,
        }
    }
}

impl DrillConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Turn both choice and token shuffling on or off.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_choices = shuffle;
        self.shuffle_tokens = shuffle;
        self
    }

    /// Grade word-order drills once every token is placed.
    pub fn with_auto_check(mut self, auto_check: bool) -> Self {
        self.auto_check = auto_check;
        self
    }

    /// Replace the fallback hint. Blank text keeps the default.
    pub fn with_hint_fallback(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !hint.trim().is_empty() {
            self.hint_fallback = hint;
        }
        self
    }

    /// Set the feedback language.
    pub fn with_help_language(mut self, language: HelpLanguage) -> Self {
        self.help_language = language;
        self
    }

    /// Offer hints or hide them.
    pub fn with_show_hints(mut self, show: bool) -> Self {
        self.show_hints = show;
        self
    }
}

/// What happens when a learner answers a question wrongly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// The answered question stays locked for the rest of the session.
    #[default]
    Locked,
    /// A wrong answer allows rendering a fresh instance of the same question.
    NewInstance,
}

/// Configuration for a [`LessonSession`](crate::LessonSession).
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Engine configuration.
    pub drill: DrillConfig,
    /// Lesson-level retry policy.
    pub retry: RetryPolicy,
    /// Optional time limit for the whole lesson.
    pub time_limit: Option<Duration>,
}

impl SessionConfig {
    /// Set the engine configuration.
    pub fn with_drill(mut self, drill: DrillConfig) -> Self {
        self.drill = drill;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set a time limit. A zero duration means no limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = (!limit.is_zero()).then_some(limit);
        self
    }
}
