// DownloadInvoker - runs the external bv2mp3 downloader once for all URLs
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::config::DownloaderSettings;
use crate::error::{BvdlError, Result};

pub struct DownloadInvoker {
    program: String,
    base_args: Vec<String>,
    url_flag: String,
}

impl DownloadInvoker {
    pub fn new(settings: &DownloaderSettings) -> Self {
        Self {
            program: settings.program.clone(),
            base_args: settings.base_args.clone(),
            url_flag: settings.url_flag.clone(),
        }
    }

    /// Argument vector: base args, then one `--url=<value>` per URL in order
    pub fn build_args(&self, urls: &[String]) -> Vec<String> {
        self.base_args
            .iter()
            .cloned()
            .chain(urls.iter().map(|url| format!("{}={}", self.url_flag, url)))
            .collect()
    }

    /// Human-readable command line, for display only.
    ///
    /// Arguments are passed to the process directly, never through a shell.
    pub fn command_line(&self, urls: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.build_args(urls).into_iter().map(|arg| {
            if arg.contains(char::is_whitespace) || arg.contains('"') {
                format!("{:?}", arg)
            } else {
                arg
            }
        }));
        parts.join(" ")
    }

    /// Locate the program on PATH.
    ///
    /// `which` also finds `npx.cmd` on Windows, which `Command::new("npx")` would not.
    fn resolve_program(&self) -> PathBuf {
        which::which(&self.program).unwrap_or_else(|e| {
            log::debug!("Could not resolve {} on PATH: {}", self.program, e);
            PathBuf::from(&self.program)
        })
    }

    /// Run the downloader in `work_dir` with stdout/stderr going straight to the terminal
    pub fn run(&self, urls: &[String], work_dir: &Path) -> Result<()> {
        let program = self.resolve_program();
        let args = self.build_args(urls);
        log::debug!("Running {:?} {:?} in {:?}", program, args, work_dir);

        let status = Command::new(&program)
            .args(&args)
            .current_dir(work_dir)
            .status()
            .map_err(|e| {
                BvdlError::download_failed(format!("could not launch {}: {}", self.program, e))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BvdlError::download_failed(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}
