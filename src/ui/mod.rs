//! User-facing collaborators: the archive picker and the run log sinks.

pub mod picker;
pub mod sink;

pub use picker::{DialogFilePicker, FilePicker, PresetFilePicker, PICKER_TITLE};
pub use sink::{ConsoleSink, DialogSink, JsonLinesSink, MemoryLog, MemorySink};
