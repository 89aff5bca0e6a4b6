// Line-oriented user input with Ctrl+C support
//
// Stdin is read on a helper thread so that a Ctrl+C pressed while a prompt is
// waiting can be delivered to that prompt right away instead of after Enter.

use anyhow::Result;
use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// What a prompt received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line, without its trailing newline
    Line(String),
    /// Input stream closed
    Eof,
    /// User pressed Ctrl+C
    Interrupted,
}

/// Source of prompted lines
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> InputEvent;
}

/// Interactive terminal input
pub struct TerminalInput {
    events: Receiver<InputEvent>,
    awaiting: Arc<AtomicBool>,
    eof: bool,
}

impl TerminalInput {
    /// Start the stdin reader and install the Ctrl+C handler.
    ///
    /// Only one `TerminalInput` may exist per process.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let awaiting = Arc::new(AtomicBool::new(false));

        let handler_tx = tx.clone();
        let handler_awaiting = awaiting.clone();
        ctrlc::set_handler(move || {
            if handler_awaiting.load(Ordering::SeqCst) {
                let _ = handler_tx.send(InputEvent::Interrupted);
            } else {
                // Not at a prompt: behave like the top-level interrupt handler
                println!();
                println!("{}", "Interrupted by user".yellow());
                std::process::exit(0);
            }
        })
        .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

        spawn_stdin_reader(tx);

        Ok(Self {
            events: rx,
            awaiting,
            eof: false,
        })
    }
}

fn spawn_stdin_reader(tx: Sender<InputEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut handle = stdin.lock();

        loop {
            let mut line = String::new();
            let event = match handle.read_line(&mut line) {
                Ok(0) => InputEvent::Eof,
                Ok(_) => InputEvent::Line(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
                Err(e) => {
                    log::warn!("Failed to read from stdin: {}", e);
                    InputEvent::Eof
                }
            };

            let done = event == InputEvent::Eof;
            if tx.send(event).is_err() || done {
                break;
            }
        }
    });
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> InputEvent {
        if self.eof {
            return InputEvent::Eof;
        }

        print!("{}", prompt.white().bold());
        let _ = io::stdout().flush();

        self.awaiting.store(true, Ordering::SeqCst);
        let event = self.events.recv().unwrap_or(InputEvent::Eof);
        self.awaiting.store(false, Ordering::SeqCst);

        match event {
            InputEvent::Eof => {
                self.eof = true;
                println!();
            }
            InputEvent::Interrupted => println!(),
            InputEvent::Line(_) => {}
        }

        event
    }
}

/// Pre-recorded input for tests and non-interactive drivers.
///
/// Once the script runs out every prompt sees `Eof`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
            prompts: Vec::new(),
        }
    }

    /// Script made only of plain lines
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| InputEvent::Line(line.to_string()))
                .collect(),
        )
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> InputEvent {
        self.prompts.push(prompt.to_string());
        self.events.pop_front().unwrap_or(InputEvent::Eof)
    }
}
