//! Data models for mcinstall
//!
//! Error taxonomy, the run log buffer, and the per-run context shared by the
//! install phases.

pub mod error;
pub mod log;
pub mod run;

pub use error::{ErrorKind, InstallError};
pub use log::{LogEntry, LogLevel, LogSink, RunLog};
pub use run::{InstallSummary, RunContext, FOLDER_SET, OPTIONS_FILE};
