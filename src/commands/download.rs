use crate::core::probe::{self, SystemProbe, ToolProbe};
use crate::core::{
    classify_line, relocate, Destination, DestinationMenu, DownloadInvoker, LineVerdict,
    MenuEntry, MovedFile, NameError, Settings,
};
use crate::error::BvdlError;
use crate::ui::{self, InputEvent, LineSource, TerminalInput};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Longest probe output echoed in debug mode
const DIAGNOSTIC_OUTPUT_CHARS: usize = 100;

/// Flags that change the run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub debug: bool,
    pub skip_check: bool,
}

/// How a run ended, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// User declined at a confirmation prompt
    Cancelled,
    /// No URL was entered
    NoUrls,
    Downloaded {
        destination: Destination,
        moved: Vec<MovedFile>,
    },
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let options = RunOptions {
        debug: matches.get_flag("debug"),
        skip_check: matches.get_flag("skip-check"),
    };

    let work_dir = std::env::current_dir().context("Could not determine the current directory")?;
    let settings = Settings::for_work_dir(&work_dir);
    let probe = SystemProbe::new(settings.probe_timeout);
    let mut input = TerminalInput::new()?;

    run(&options, &settings, &mut input, &probe)?;
    Ok(())
}

/// Whole interactive flow: check tools, collect URLs, pick a destination,
/// download, then move the audio files.
pub fn run(
    options: &RunOptions,
    settings: &Settings,
    input: &mut dyn LineSource,
    probe: &dyn ToolProbe,
) -> Result<Outcome> {
    if options.debug {
        print_diagnostics(settings);
    }

    if options.skip_check {
        ui::warn("Skipping environment check");
        ui::dimmed("If the environment is incomplete the download may fail.");
        println!();
    } else if !check_environment(settings, probe, input)? {
        return Ok(Outcome::Cancelled);
    }

    let urls = collect_urls(input);
    if !display_urls(&urls) {
        return Ok(Outcome::NoUrls);
    }

    let destination = select_destination(settings, input)?;

    println!();
    if !ui::confirm(input, "Start download?", true) {
        ui::warn_plain("Download cancelled by user");
        return Ok(Outcome::Cancelled);
    }

    download(settings, &urls)?;
    let moved = move_files(settings, &destination)?;

    Ok(Outcome::Downloaded { destination, moved })
}

fn install_hint(tool: &str) -> &'static str {
    match tool {
        "node" | "npm" | "npx" => "https://nodejs.org/",
        "ffmpeg" => "https://ffmpeg.org/download.html",
        _ => "your system package manager",
    }
}

/// Verify the required and optional tools.
///
/// Returns `Ok(false)` when the user declines to continue without an
/// optional tool, and an error when a required tool is missing.
pub fn check_environment(
    settings: &Settings,
    probe: &dyn ToolProbe,
    input: &mut dyn LineSource,
) -> Result<bool> {
    ui::info("Checking environment...");

    for tool in &settings.required_tools {
        ui::dimmed(&format!("Checking {}...", tool));
        if !probe.is_available(tool) {
            ui::error(&format!(
                "{} is not installed. Install it first: {}",
                tool,
                install_hint(tool)
            ));
            return Err(BvdlError::missing_dependency(tool.as_str()).into());
        }
        ui::success(&format!("{} is installed", tool));
    }

    for tool in &settings.optional_tools {
        ui::dimmed(&format!("Checking {}...", tool));
        if probe.is_available(tool) {
            ui::success(&format!("{} is installed", tool));
            continue;
        }

        ui::warn(&format!(
            "{} not found, conversion to MP3 may not work",
            tool
        ));
        ui::dimmed(&format!("Install it from {}", install_hint(tool)));

        if !ui::confirm(input, "Continue anyway?", false) {
            ui::warn_plain("Cancelled by user");
            return Ok(false);
        }
    }

    ui::success("Environment check complete");
    Ok(true)
}

/// Cut probe output for display
pub fn truncate_output(output: &str, max_chars: usize) -> String {
    let trimmed = output.trim();
    if trimmed.chars().count() > max_chars {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}

/// Run each tool's probe directly and show what it returned
fn print_diagnostics(settings: &Settings) {
    ui::info("Debug mode enabled");
    ui::dimmed("Testing tool detection...");

    for tool in settings.required_tools.iter().chain(&settings.optional_tools) {
        let args = probe::probe_args(tool).first().copied().unwrap_or(&[]);
        println!("{} {}...", "Testing".white(), tool);

        match probe::diagnose(tool, settings.probe_timeout) {
            Ok(output) => {
                let code = output
                    .status_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string());
                println!("  {} {} return code: {}", tool, args.join(" "), code);
                println!(
                    "  output: {}",
                    truncate_output(&output.stdout, DIAGNOSTIC_OUTPUT_CHARS)
                );
            }
            Err(e) => println!("  {}", format!("{} test failed: {}", tool, e).red()),
        }
        println!();
    }
}

/// Read URLs until a blank line or end of input.
///
/// Lines without a recognized link are rejected and asked again; Ctrl+C
/// discards everything collected so far.
pub fn collect_urls(input: &mut dyn LineSource) -> Vec<String> {
    ui::header("Bilibili batch download");
    ui::bold("Paste one video link (or share text) per line.");
    ui::dimmed("Press Enter on an empty line to finish.");
    println!();

    let mut urls = Vec::new();

    loop {
        let prompt = format!("URL #{} (Enter to finish): ", urls.len() + 1);

        match input.read_line(&prompt) {
            InputEvent::Line(line) => match classify_line(&line) {
                LineVerdict::Finish => break,
                LineVerdict::Accept(url) => {
                    ui::success(&format!("Added: {}", url));
                    urls.push(url);
                }
                LineVerdict::Reject => {
                    ui::warn_plain("Not a recognized Bilibili link, please try again");
                }
            },
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                ui::warn_plain("Input interrupted by user");
                return Vec::new();
            }
        }
    }

    log::debug!("Collected {} URL(s)", urls.len());
    urls
}

/// Show the collected URLs; false when there is nothing to download
fn display_urls(urls: &[String]) -> bool {
    if urls.is_empty() {
        ui::error("No URLs entered, exiting");
        return false;
    }

    println!();
    ui::info(&format!("About to download {} video(s):", urls.len()));
    for (i, url) in urls.iter().enumerate() {
        println!("  {}. {}", i + 1, url);
    }
    true
}

/// Let the user pick where the audio files go.
///
/// Ctrl+C or end of input keeps the files in the current directory.
pub fn select_destination(settings: &Settings, input: &mut dyn LineSource) -> Result<Destination> {
    let menu = DestinationMenu::load(&settings.library_dir).with_context(|| {
        format!(
            "Failed to read library directory {}",
            settings.library_dir.display()
        )
    })?;

    ui::header("Destination");
    for (i, entry) in menu.entries().iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().yellow(), entry.label());
    }
    println!();

    let prompt = format!("Choose a destination [1-{}]: ", menu.entries().len());

    loop {
        match input.read_line(&prompt) {
            InputEvent::Line(line) => match menu.parse_selection(&line) {
                Ok(MenuEntry::CurrentDirectory) => return Ok(Destination::CurrentDirectory),
                Ok(MenuEntry::Existing { path, .. }) => {
                    return Ok(Destination::Directory(path.clone()))
                }
                Ok(MenuEntry::CreateNew) => {
                    return Ok(match prompt_new_folder(&menu, settings, input)? {
                        Some(path) => Destination::Directory(path),
                        None => Destination::CurrentDirectory,
                    });
                }
                Err(e) => ui::warn_plain(&format!("Invalid choice: {}", e)),
            },
            InputEvent::Eof | InputEvent::Interrupted => {
                ui::warn_plain("No destination chosen, keeping files in the current directory");
                return Ok(Destination::CurrentDirectory);
            }
        }
    }
}

/// Ask for a new folder name until a valid one is given, then create it.
///
/// Returns `None` when the user interrupts.
fn prompt_new_folder(
    menu: &DestinationMenu,
    settings: &Settings,
    input: &mut dyn LineSource,
) -> Result<Option<PathBuf>> {
    loop {
        match input.read_line("New folder name: ") {
            InputEvent::Line(line) => {
                match menu.validate_new_name(&line, settings.name_placeholder) {
                    Ok(sanitized) => {
                        if sanitized.replaced {
                            ui::warn_plain(&format!(
                                "Illegal characters were replaced with '{}': {}",
                                settings.name_placeholder, sanitized.name
                            ));
                        }
                        let path = match menu.create(&sanitized.name) {
                            Ok(path) => path,
                            Err(BvdlError::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists => {
                                ui::warn_plain(&format!(
                                    "{}, please try again",
                                    NameError::AlreadyExists(sanitized.name)
                                ));
                                continue;
                            }
                            Err(e) => {
                                return Err(e).with_context(|| {
                                    format!("Failed to create folder {}", sanitized.name)
                                });
                            }
                        };
                        ui::success(&format!("Created folder: {}", path.display()));
                        return Ok(Some(path));
                    }
                    Err(e) => ui::warn_plain(&format!("{}, please try again", e)),
                }
            }
            InputEvent::Eof | InputEvent::Interrupted => {
                ui::warn_plain("Folder creation cancelled");
                return Ok(None);
            }
        }
    }
}

fn download(settings: &Settings, urls: &[String]) -> Result<()> {
    let invoker = DownloadInvoker::new(&settings.downloader);

    ui::header("Downloading");
    ui::dimmed(&format!("Running: {}", invoker.command_line(urls)));
    println!();

    invoker.run(urls, &settings.work_dir)?;

    println!();
    ui::success("Download complete");
    Ok(())
}

/// Move downloaded audio into the chosen destination
pub fn move_files(settings: &Settings, destination: &Destination) -> Result<Vec<MovedFile>> {
    let dest_dir = match destination {
        Destination::CurrentDirectory => {
            ui::dimmed("Audio files were saved to the current directory.");
            return Ok(Vec::new());
        }
        Destination::Directory(path) => path,
    };

    println!();
    ui::info(&format!("Moving audio files to {}", dest_dir.display()));

    let moved = relocate(&settings.work_dir, dest_dir, report_move).map_err(|e| {
        ui::error("Moving files failed; files already moved were left in place");
        e
    })?;

    if moved.is_empty() {
        ui::dimmed("No audio files to move");
    } else {
        ui::success(&format!("Moved {} file(s)", moved.len()));
    }

    Ok(moved)
}

fn report_move(file: &MovedFile) {
    if file.renamed() {
        println!(
            "  {} {} {} {}",
            "→".green(),
            file.original,
            "as".dimmed(),
            file.final_name.yellow()
        );
    } else {
        println!("  {} {}", "→".green(), file.original);
    }
}
