use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::filesystem::archive::ZipExtractor;
use crate::filesystem::paths::{timestamp_now, SystemPaths};
use crate::install::{InstallOptions, InstallOrchestrator};
use crate::models::LogSink;
use crate::ui::picker::{DialogFilePicker, FilePicker, PresetFilePicker};
use crate::ui::sink::{ConsoleSink, DialogSink, JsonLinesSink};

/// mcinstall - back up .minecraft and install an instance archive into it
#[derive(Parser, Debug)]
#[command(name = "mcinstall")]
#[command(version)]
#[command(about = "Back up .minecraft and install an instance archive into it")]
#[command(long_about = "Backs up the whitelisted folders of <app data>/.minecraft into a timestamped sibling \
directory, then installs the same folders and options.txt from a .zip instance archive.")]
pub struct Cli {
    /// Subfolder of the archive that holds the instance
    #[arg(long, env = "INSTANCE_NAME")]
    pub instance_name: Option<String>,

    /// Archive to install; skips the file picker
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Where the run log is presented
    #[arg(long, value_enum, default_value_t = OutputMode::Dialog)]
    pub output: OutputMode,

    /// Diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How the run log is shown once the run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Native message box
    Dialog,
    /// Plain lines on stdout
    Console,
    /// One JSON object per line on stdout
    Json,
}

impl Cli {
    fn tracing_level(&self) -> Level {
        match self.verbose {
            0 => Level::ERROR,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn sink(&self) -> Box<dyn LogSink> {
        match self.output {
            OutputMode::Dialog => Box::new(DialogSink::new()),
            OutputMode::Console => Box::new(ConsoleSink::stdout()),
            OutputMode::Json => Box::new(JsonLinesSink::stdout()),
        }
    }

    fn picker(&self) -> Box<dyn FilePicker> {
        match &self.archive {
            Some(path) => Box::new(PresetFilePicker::new(Some(path.clone()))),
            None => Box::new(DialogFilePicker),
        }
    }
}

fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse arguments, run the install, and return the process exit code
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.tracing_level());

    let paths = SystemPaths;
    let picker = cli.picker();
    let extractor = ZipExtractor;
    let mut sink = cli.sink();

    let options = InstallOptions::new(cli.instance_name.clone(), timestamp_now());
    tracing::debug!(?options, "starting install run");

    InstallOrchestrator::new(&paths, picker.as_ref(), &extractor).execute(&options, sink.as_mut())
}
