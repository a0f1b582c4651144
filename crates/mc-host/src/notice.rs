//! Short inline messages ("Copy failed", "Microphone unavailable").

use std::fmt;

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeLevel {
    /// Neutral information, such as a hint.
    #[default]
    Info,
    /// A degraded optional feature.
    Warning,
}

/// A one-line, dismissible message displayed next to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    level: NoticeLevel,
    text: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// Warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    /// Severity.
    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
