pub mod orchestrator;

pub use orchestrator::{InstallOptions, InstallOrchestrator, EXIT_SUCCESS, NESTED_PAYLOAD_DIR};
