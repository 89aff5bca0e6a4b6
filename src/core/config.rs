use std::path::{Path, PathBuf};
use std::time::Duration;

/// Library folder, relative to the working directory
pub const LIBRARY_RELATIVE_PATH: &str = "../music";

/// How long a version probe may run before the tool counts as unavailable
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Character substituted for anything not allowed in a directory name
pub const NAME_PLACEHOLDER: char = '_';

/// How the external downloader is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderSettings {
    pub program: String,
    pub base_args: Vec<String>,
    pub url_flag: String,
}

impl Default for DownloaderSettings {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            base_args: vec!["bv2mp3".to_string()],
            url_flag: "--url".to_string(),
        }
    }
}

/// Run configuration.
///
/// There is no configuration file: every value is derived from the working
/// directory or fixed defaults, and tests construct their own.
#[derive(Debug, Clone)]
pub struct Settings {
    pub work_dir: PathBuf,
    pub library_dir: PathBuf,
    pub required_tools: Vec<String>,
    pub optional_tools: Vec<String>,
    pub probe_timeout: Duration,
    pub downloader: DownloaderSettings,
    pub name_placeholder: char,
}

impl Settings {
    pub fn for_work_dir(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            library_dir: work_dir.join(LIBRARY_RELATIVE_PATH),
            required_tools: vec!["node".to_string()],
            optional_tools: vec!["ffmpeg".to_string()],
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            downloader: DownloaderSettings::default(),
            name_placeholder: NAME_PLACEHOLDER,
        }
    }

    /// Override the library directory (used by tests)
    pub fn with_library_dir(mut self, library_dir: &Path) -> Self {
        self.library_dir = library_dir.to_path_buf();
        self
    }
}
