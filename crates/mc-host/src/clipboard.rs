//! Clipboard writes ("copy this sentence").

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::warn;

use crate::error::{Capability, HostError, HostResult};
use crate::notice::Notice;

/// Something that can receive copied text.
pub trait ClipboardProvider {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> HostResult<()>;
}

/// Provider for runtimes without a clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardProvider for NoClipboard {
    fn write_text(&mut self, _text: &str) -> HostResult<()> {
        Err(HostError::Unavailable(Capability::Clipboard))
    }
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> HostResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard through a helper program that reads stdin (`wl-copy`, `pbcopy`,
/// `xclip -selection clipboard`).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Use `program` with extra arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a command line such as `"xclip -selection clipboard"`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

impl ClipboardProvider for CommandClipboard {
    fn write_text(&mut self, text: &str) -> HostResult<()> {
        let failed = |reason: String| HostError::Failed {
            capability: Capability::Clipboard,
            reason,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|_| HostError::Unavailable(Capability::Clipboard))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }

        let status = child.wait().map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("{} exited with {status}", self.program)))
        }
    }
}

/// Copy `text`, turning any failure into a notice for the learner.
pub fn copy_best_effort(provider: &mut dyn ClipboardProvider, text: &str) -> Option<Notice> {
    match provider.write_text(text) {
        Ok(()) => None,
        Err(e) => {
            warn!(error = %e, "clipboard write failed");
            Some(e.notice())
        }
    }
}
