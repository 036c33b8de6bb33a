use std::path::PathBuf;

/// Title shown on the archive selection dialog
pub const PICKER_TITLE: &str = "Select the instance archive (.zip)";

/// Asks the user for an archive path. `None` means the user cancelled.
pub trait FilePicker {
    fn pick_archive(&self, title: &str) -> Option<PathBuf>;
}

/// Native file dialog restricted to `.zip` files
#[derive(Debug, Default, Clone)]
pub struct DialogFilePicker;

impl FilePicker for DialogFilePicker {
    fn pick_archive(&self, title: &str) -> Option<PathBuf> {
        let file_dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("ZIP", &["zip"]);

        let file_dialog = if let Some(downloads) = dirs::download_dir() {
            file_dialog.set_directory(&downloads)
        } else {
            file_dialog
        };

        file_dialog.pick_file()
    }
}

/// Picker that returns a path chosen up front, e.g. from `--archive`
#[derive(Debug, Clone)]
pub struct PresetFilePicker {
    path: Option<PathBuf>,
}

impl PresetFilePicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// A picker that always reports cancellation
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

impl FilePicker for PresetFilePicker {
    fn pick_archive(&self, _title: &str) -> Option<PathBuf> {
        self.path.clone()
    }
}
