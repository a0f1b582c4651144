//! Learner preferences.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::speech::{Accent, SpeechOptions};

/// Language used for hints, feedback and other help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpLanguage {
    /// Help in French, the learners' native language.
    #[default]
    French,
    /// Help in English, for immersion.
    English,
}

impl HelpLanguage {
    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Self::French => Self::English,
            Self::English => Self::French,
        }
    }
}

impl fmt::Display for HelpLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::French => write!(f, "French"),
            Self::English => write!(f, "English"),
        }
    }
}

/// Settings the learner can change, saved alongside progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Accent for spoken prompts.
    pub accent: Accent,
    /// Language of help text.
    pub help_language: HelpLanguage,
    /// Speech rate multiplier.
    pub speech_rate: f32,
    /// Whether hint controls are shown.
    pub show_help: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            accent: Accent::default(),
            help_language: HelpLanguage::default(),
            speech_rate: 1.0,
            show_help: true,
        }
    }
}

impl Preferences {
    /// Speech options derived from these preferences.
    pub fn speech_options(&self) -> SpeechOptions {
        SpeechOptions::new(self.accent).with_rate(self.speech_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"accent":"british"}"#).unwrap();
        assert_eq!(prefs.accent, Accent::British);
        assert_eq!(prefs.help_language, HelpLanguage::French);
        assert!(prefs.show_help);
    }

    #[test]
    fn toggle_help_language() {
        assert_eq!(HelpLanguage::French.toggled(), HelpLanguage::English);
        assert_eq!(HelpLanguage::English.toggled().toggled(), HelpLanguage::English);
        assert_eq!(HelpLanguage::French.toggled().to_string(), "English");
    }

    #[test]
    fn speech_options_clamp_rate() {
        let prefs = Preferences {
            speech_rate: 5.0,
            ..Preferences::default()
        };
        assert_eq!(prefs.speech_options().rate, 2.0);
    }
}
