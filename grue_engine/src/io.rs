//! Terminal I/O behind the [`IoHandler`] contract.
//!
//! The engine never touches stdin/stdout directly: the turn loop drives an
//! `IoHandler`, which is a rustyline-backed console in the binary and a
//! scripted double in tests. Console output is wrapped to the terminal
//! width and styled through [`crate::style::GameStyle`].

use std::collections::VecDeque;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use textwrap::{fill, termwidth};

use crate::style::GameStyle;

/// Outcome of reading a line of player input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// The runtime's whole view of the outside world.
pub trait IoHandler {
    /// Read one line. EOF must be reported, not swallowed — it ends the
    /// turn loop cleanly.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
    /// Show one block of game text.
    fn print(&mut self, text: &str);
    /// Show the status line for the upcoming prompt.
    fn status_line(&mut self, location: &str, score: i64, moves: u64);
}

type ReplEditor = rustyline::Editor<(), DefaultHistory>;

/// Interactive console: rustyline when stdin is a terminal, plain stdin
/// otherwise (so piped transcripts still work).
pub struct ConsoleIo {
    backend: Backend,
}

enum Backend {
    Rustyline { editor: ReplEditor, history: Option<PathBuf> },
    Plain,
}

impl ConsoleIo {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match ReplEditor::new() {
                Ok(mut editor) => {
                    let history = history_file_path();
                    if let Some(path) = history.as_ref() {
                        if let Some(dir) = path.parent()
                            && let Err(err) = fs::create_dir_all(dir)
                        {
                            warn!("failed to create history directory {}: {err}", dir.display());
                        }
                        if let Err(err) = editor.load_history(path) {
                            info!("no usable history at {}: {err}", path.display());
                        }
                    }
                    info!("using rustyline-backed input");
                    Backend::Rustyline { editor, history }
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), using basic stdin");
                    Backend::Plain
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::Plain
        };
        Self { backend }
    }
}

impl Default for ConsoleIo {
    fn default() -> Self {
        Self::new()
    }
}

impl IoHandler for ConsoleIo {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match &mut self.backend {
            Backend::Rustyline { editor, history } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(err) = editor.add_history_entry(line.as_str()) {
                            warn!("failed to append to history: {err}");
                        }
                        if let Some(path) = history.as_ref()
                            && let Err(err) = editor.save_history(path)
                        {
                            warn!("failed to persist history to {}: {err}", path.display());
                        }
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
                Err(ReadlineError::Io(io_err)) => Err(io_err),
                Err(other) => Err(io::Error::other(other)),
            },
            Backend::Plain => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut buffer = String::new();
                let bytes = io::stdin().read_line(&mut buffer)?;
                if bytes == 0 {
                    return Ok(InputEvent::Eof);
                }
                Ok(InputEvent::Line(buffer.trim_end_matches(['\n', '\r']).to_string()))
            },
        }
    }

    fn print(&mut self, text: &str) {
        for paragraph in text.split("\n\n") {
            println!("{}", fill(paragraph, termwidth()).description_style());
        }
        println!();
    }

    fn status_line(&mut self, location: &str, score: i64, moves: u64) {
        println!(
            "{} {}",
            location.location_style(),
            format!("| Score: {score} | Moves: {moves}").status_style()
        );
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| base.join("grue").join("history.txt"))
}

/// Scripted I/O for transcript tests: feeds queued lines, records output.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedIo {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| (*l).to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything printed so far, joined for substring assertions.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }
}

impl IoHandler for ScriptedIo {
    fn read_line(&mut self, _prompt: &str) -> io::Result<InputEvent> {
        match self.inputs.pop_front() {
            Some(line) => Ok(InputEvent::Line(line)),
            None => Ok(InputEvent::Eof),
        }
    }

    fn print(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn status_line(&mut self, _location: &str, _score: i64, _moves: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_io_feeds_lines_then_eof() {
        let mut io = ScriptedIo::new(&["look", "quit"]);
        assert!(matches!(io.read_line("> ").unwrap(), InputEvent::Line(l) if l == "look"));
        assert!(matches!(io.read_line("> ").unwrap(), InputEvent::Line(l) if l == "quit"));
        assert!(matches!(io.read_line("> ").unwrap(), InputEvent::Eof));
    }

    #[test]
    fn scripted_io_records_output() {
        let mut io = ScriptedIo::new(&[]);
        io.print("Taken.");
        io.print("Dropped.");
        assert!(io.output().contains("Taken."));
        assert!(io.output().contains("Dropped."));
    }
}
