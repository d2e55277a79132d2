use ::clipboard::{ClipboardContext, ClipboardProvider};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::error::KeyclipError;

/// Something text can be put on
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), KeyclipError>;
}

/// Blocking wait between countdown ticks
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// The platform clipboard, opened on first use and kept for the session
#[derive(Default)]
pub struct SystemClipboard {
    ctx: Option<ClipboardContext>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), KeyclipError> {
        if self.ctx.is_none() {
            let ctx: ClipboardContext = ClipboardProvider::new().map_err(|e| {
                KeyclipError::ClipboardUnavailable(format!("Failed to access clipboard: {}", e))
            })?;
            self.ctx = Some(ctx);
        }

        let ctx = self.ctx.as_mut().ok_or_else(|| {
            KeyclipError::ClipboardUnavailable("Clipboard not initialized".to_string())
        })?;
        ctx.set_contents(text.to_string()).map_err(|e| {
            KeyclipError::ClipboardUnavailable(format!("Failed to copy to clipboard: {}", e))
        })
    }
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Copies values to the clipboard and optionally clears them after a
/// visible countdown.
pub struct ClipboardSession<C, S> {
    clipboard: C,
    sleeper: S,
}

impl<C: Clipboard, S: Sleeper> ClipboardSession<C, S> {
    pub fn new(clipboard: C, sleeper: S) -> Self {
        Self { clipboard, sleeper }
    }

    pub fn copy(&mut self, value: &str) -> Result<(), KeyclipError> {
        self.clipboard.set_text(value)
    }

    /// Tick down once per second, then empty the clipboard.
    ///
    /// Runs to completion; the only way out early is the process dying.
    /// Rendering is best-effort: a closed or broken output stream never
    /// stops the clear. Failing to clear is not reported either, the copy
    /// already succeeded.
    pub fn run_countdown(&mut self, seconds: u64, out: &mut dyn Write) {
        let mut remaining = seconds;
        let mut last_line = String::new();

        while remaining > 0 {
            let next_line = countdown_line(remaining);
            let _ = render_line(out, &last_line, &next_line);
            last_line = next_line;
            self.sleeper.sleep(Duration::from_secs(1));
            remaining -= 1;
        }

        let _ = self.clipboard.set_text("");
        let _ = erase_line(out, &last_line).and_then(|_| writeln!(out, "Clipboard cleared!"));
    }
}

pub fn countdown_line(remaining: u64) -> String {
    format!("Clearing the clipboard in {} second(s)...", remaining)
}

fn erase_line(out: &mut dyn Write, last_line: &str) -> io::Result<()> {
    write!(out, "\r{}\r", " ".repeat(last_line.chars().count()))
}

fn render_line(out: &mut dyn Write, last_line: &str, line: &str) -> io::Result<()> {
    erase_line(out, last_line)?;
    write!(out, "{}", line)?;
    out.flush()
}
