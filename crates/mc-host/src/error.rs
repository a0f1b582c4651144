//! Error types for host capabilities.

use std::fmt;

use thiserror::Error;

use crate::notice::Notice;

/// Result type for capability calls.
pub type HostResult<T> = Result<T, HostError>;

/// An optional platform capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Text-to-speech output.
    Speech,
    /// Clipboard writes.
    Clipboard,
    /// Microphone recording.
    Microphone,
    /// Persistent key-value storage.
    Storage,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speech => write!(f, "speech"),
            Self::Clipboard => write!(f, "clipboard"),
            Self::Microphone => write!(f, "microphone"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

/// Why a capability call did not happen.
#[derive(Debug, Error)]
pub enum HostError {
    /// The runtime does not offer this capability at all.
    #[error("{0} unavailable")]
    Unavailable(Capability),

    /// The learner (or the platform) refused access.
    #[error("{0} permission denied")]
    PermissionDenied(Capability),

    /// The capability exists but the call failed.
    #[error("{capability} failed: {reason}")]
    Failed {
        /// Capability that failed.
        capability: Capability,
        /// Provider-specific reason.
        reason: String,
    },

    /// Filesystem error from a storage provider.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    /// The capability this error concerns.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Unavailable(c) | Self::PermissionDenied(c) => *c,
            Self::Failed { capability, .. } => *capability,
            Self::Io(_) => Capability::Storage,
        }
    }

    /// The short, non-blocking message shown next to the affected control.
    pub fn notice(&self) -> Notice {
        let text = match (self, self.capability()) {
            (Self::PermissionDenied(_), Capability::Microphone) => "Microphone permission denied",
            (_, Capability::Microphone) => "Microphone unavailable",
            (_, Capability::Clipboard) => "Copy failed",
            (_, Capability::Speech) => "Speech unavailable",
            (_, Capability::Storage) => "Progress could not be saved",
        };
        Notice::warning(text)
    }
}
