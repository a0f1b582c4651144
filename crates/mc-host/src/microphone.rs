//! Microphone recording for "repeat after me" exercises.

use std::time::Duration;

use tracing::warn;

use crate::error::{Capability, HostError, HostResult};
use crate::notice::Notice;

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recording {
    /// Encoded audio, provider-specific format.
    pub data: Vec<u8>,
    /// Length of the recording.
    pub duration: Duration,
}

/// Something that can record from a microphone.
pub trait MicrophoneProvider {
    /// Begin recording. Fails if the device is missing or access is refused.
    fn start(&mut self) -> HostResult<()>;

    /// Stop recording and hand back the audio.
    fn stop(&mut self) -> HostResult<Recording>;
}

/// Provider for runtimes without a microphone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMicrophone;

impl MicrophoneProvider for NoMicrophone {
    fn start(&mut self) -> HostResult<()> {
        Err(HostError::Unavailable(Capability::Microphone))
    }

    fn stop(&mut self) -> HostResult<Recording> {
        Err(HostError::Unavailable(Capability::Microphone))
    }
}

/// What a [`Recorder::toggle`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// Recording began.
    Started,
    /// Recording ended; the audio is available from [`Recorder::last`].
    Finished(Duration),
    /// The capability failed; show the notice and carry on.
    Failed(Notice),
}

/// A single record/stop button over a [`MicrophoneProvider`].
#[derive(Debug)]
pub struct Recorder<P> {
    provider: P,
    recording: bool,
    last: Option<Recording>,
}

impl<P: MicrophoneProvider> Recorder<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            recording: false,
            last: None,
        }
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// The most recent finished recording.
    pub fn last(&self) -> Option<&Recording> {
        self.last.as_ref()
    }

    /// Start when idle, stop when recording.
    pub fn toggle(&mut self) -> RecorderEvent {
        let result = if self.recording {
            self.recording = false;
            self.provider.stop().map(|recording| {
                let duration = recording.duration;
                self.last = Some(recording);
                RecorderEvent::Finished(duration)
            })
        } else {
            self.provider.start().map(|()| {
                self.recording = true;
                RecorderEvent::Started
            })
        };

        result.unwrap_or_else(|e| {
            warn!(error = %e, "microphone unavailable");
            RecorderEvent::Failed(e.notice())
        })
    }
}
