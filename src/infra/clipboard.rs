use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use tracing::debug;

use crate::app::ports::ClipboardPort;
use crate::error::{LeadError, Result};

/// Clipboard tools tried in order; the first one that runs successfully wins.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("clip", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Writes to the desktop clipboard through the platform's copy utility.
///
/// Blocks on the child process; async callers run it on the blocking pool.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn try_command(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // stdin is dropped before waiting so the tool sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl ClipboardPort for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        for (program, args) in CLIPBOARD_COMMANDS {
            match Self::try_command(program, args, text) {
                Ok(true) => {
                    debug!(program, "Copied text to clipboard");
                    return Ok(());
                }
                Ok(false) => debug!(program, "Clipboard command exited with failure"),
                Err(e) => debug!(program, "Clipboard command unavailable: {}", e),
            }
        }
        Err(LeadError::Clipboard(
            "no clipboard utility available".to_string(),
        ))
    }
}

/// Clipboard held in memory; used by tests and headless callers
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ClipboardPort for InMemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}
