// Environment probing - checks that external tools can be launched
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BvdlError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    pub status_code: Option<i32>,
    pub stdout: String,
}

impl ProbeOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Availability check for a named tool.
///
/// `SystemProbe` runs the real binaries; tests substitute a fake.
pub trait ToolProbe {
    fn is_available(&self, tool: &str) -> bool;
}

pub struct SystemProbe {
    timeout: Duration,
}

impl SystemProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ToolProbe for SystemProbe {
    fn is_available(&self, tool: &str) -> bool {
        command_exists(tool, self.timeout)
    }
}

/// Argument sets tried in order for a tool; the first one that exits 0 wins
pub fn probe_args(tool: &str) -> &'static [&'static [&'static str]] {
    match tool {
        "npm" => &[&["-v"], &["--version"], &["help"]],
        "node" => &[&["--version"]],
        "ffmpeg" => &[&["-version"]],
        _ => &[&["--version"]],
    }
}

/// Resolve a tool on PATH
pub fn resolve_tool(tool: &str) -> Option<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Resolved {} to {:?}", tool, path);
            Some(path)
        }
        Err(e) => {
            log::debug!("Could not resolve {}: {}", tool, e);
            None
        }
    }
}

/// Check whether a tool is installed and answers its version flag
pub fn command_exists(tool: &str, timeout: Duration) -> bool {
    let Some(path) = resolve_tool(tool) else {
        return false;
    };

    probe_args(tool).iter().any(|args| {
        match run_probe(&path, args, timeout) {
            Ok(output) => {
                log::debug!("{} {:?} exited with {:?}", tool, args, output.status_code);
                output.success()
            }
            Err(e) => {
                log::debug!("{} {:?} failed: {}", tool, args, e);
                false
            }
        }
    })
}

/// Run a tool with its first probe flag and capture the output.
///
/// Used by the debug mode to show what the tool actually prints.
pub fn diagnose(tool: &str, timeout: Duration) -> Result<ProbeOutput> {
    let path = resolve_tool(tool)
        .ok_or_else(|| BvdlError::probe(tool, "not found on PATH"))?;
    let args = probe_args(tool).first().copied().unwrap_or(&[]);
    run_probe(&path, args, timeout)
}

/// Spawn `program args...`, wait at most `timeout`, and collect stdout.
///
/// Stdout is drained on a reader thread so a chatty tool never blocks on a
/// full pipe. The child is killed and reaped on timeout.
pub fn run_probe(program: &Path, args: &[&str], timeout: Duration) -> Result<ProbeOutput> {
    let tool = program.display().to_string();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BvdlError::probe(&tool, format!("failed to launch: {}", e)))?;

    let reader = child.stdout.take().map(|mut stdout| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            buf
        })
    });

    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = reader
                    .and_then(|handle| handle.join().ok())
                    .unwrap_or_default();
                return Ok(ProbeOutput {
                    status_code: status.code(),
                    stdout: String::from_utf8_lossy(&stdout).to_string(),
                });
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    log::warn!("{} timed out after {}s, killing", tool, timeout.as_secs());
                    let _ = child.kill();
                    let _ = child.wait();
                    // A grandchild may still hold the pipe; leave the reader detached
                    return Err(BvdlError::probe(
                        &tool,
                        format!("timed out after {}s", timeout.as_secs()),
                    ));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(BvdlError::Io(e)),
        }
    }
}
