use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::models::{LogEntry, LogSink};

/// Window title for the result dialog
pub const RESULT_TITLE: &str = "Minecraft instance install";

/// Presents the whole run log in one native message box
#[derive(Debug, Default)]
pub struct DialogSink {
    lines: Vec<String>,
}

impl DialogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for DialogSink {
    fn append(&mut self, entry: &LogEntry) {
        self.lines.push(entry.to_string());
    }

    fn flush_and_present(&mut self, failed: bool) -> Result<()> {
        let level = if failed { MessageLevel::Error } else { MessageLevel::Info };
        MessageDialog::new()
            .set_level(level)
            .set_title(RESULT_TITLE)
            .set_description(self.lines.join("\n"))
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }
}

/// Writes `[LEVEL] message` lines to a writer when presented
pub struct ConsoleSink<W: Write> {
    out: W,
    lines: Vec<String>,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: Vec::new() }
    }
}

impl<W: Write> LogSink for ConsoleSink<W> {
    fn append(&mut self, entry: &LogEntry) {
        self.lines.push(entry.to_string());
    }

    fn flush_and_present(&mut self, _failed: bool) -> Result<()> {
        for line in &self.lines {
            writeln!(self.out, "{}", line).context("Failed to write log")?;
        }
        self.out.flush().context("Failed to flush log")
    }
}

/// Writes each entry as one JSON object per line when presented
pub struct JsonLinesSink<W: Write> {
    out: W,
    entries: Vec<LogEntry>,
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, entries: Vec::new() }
    }
}

impl<W: Write> LogSink for JsonLinesSink<W> {
    fn append(&mut self, entry: &LogEntry) {
        self.entries.push(entry.clone());
    }

    fn flush_and_present(&mut self, _failed: bool) -> Result<()> {
        for entry in &self.entries {
            let line = serde_json::to_string(entry).context("Failed to serialize log entry")?;
            writeln!(self.out, "{}", line).context("Failed to write log")?;
        }
        self.out.flush().context("Failed to flush log")
    }
}

/// What a [`MemorySink`] received
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    pub entries: Vec<LogEntry>,
    pub presented: usize,
    pub failed: Option<bool>,
}

/// Sink that records entries in shared memory (useful for testing)
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    inner: Arc<Mutex<MemoryLog>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn snapshot(&self) -> MemoryLog {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, entry: &LogEntry) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.entries.push(entry.clone());
        }
    }

    fn flush_and_present(&mut self, failed: bool) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory sink lock poisoned"))?;
        guard.presented += 1;
        guard.failed = Some(failed);
        Ok(())
    }
}
