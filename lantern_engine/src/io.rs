//! Terminal input/output handling for the game loop.
//!
//! The engine talks to the outside world through the [`IoHandler`] trait:
//! a line source and a styled text sink. [`ConsoleIo`] wraps a rustyline
//! editor with history for interactive play; [`MemoryIo`] feeds scripted
//! input and captures output for tests and embedding.

use crate::style::GameStyle;

use anyhow::{Context as _, Result};
use log::warn;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::collections::VecDeque;
use std::path::PathBuf;
use textwrap::{fill, termwidth};

/// Presentation hint for a piece of output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Narrative prose.
    Normal,
    /// Location names and other highlighted text.
    Emphasis,
    /// Engine/meta messages (saves, transcripts, errors).
    System,
}

/// The engine's view of the terminal (or whatever stands in for one).
pub trait IoHandler {
    /// Read one line of input. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
    /// Emit text with a presentation hint.
    fn print(&mut self, text: &str, style: TextStyle, newline: bool);
}

type ConsoleEditor = rustyline::Editor<(), DefaultHistory>;

/// Interactive console I/O backed by rustyline.
pub struct ConsoleIo {
    editor: ConsoleEditor,
    history_path: Option<PathBuf>,
}

impl ConsoleIo {
    /// Create a console handler, loading command history when available.
    ///
    /// # Errors
    /// Returns an error if the line editor cannot be initialized.
    pub fn new(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = ConsoleEditor::new().context("initializing line editor")?;
        if let Some(path) = &history_path
            && path.exists()
            && editor.load_history(path).is_err()
        {
            warn!("could not load input history from {}", path.display());
        }
        Ok(Self { editor, history_path })
    }
}

impl IoHandler for ConsoleIo {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                if let Some(path) = &self.history_path
                    && self.editor.save_history(path).is_err()
                {
                    warn!("could not save input history to {}", path.display());
                }
                Some(line)
            },
            // an interrupted line is just an abandoned command
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(ReadlineError::Eof) => None,
            Err(err) => {
                warn!("input error: {err}");
                None
            },
        }
    }

    fn print(&mut self, text: &str, style: TextStyle, newline: bool) {
        let rendered = match style {
            TextStyle::Normal => fill(text, termwidth()),
            TextStyle::Emphasis => text.emphasis_style().to_string(),
            TextStyle::System => text.system_style().to_string(),
        };
        if newline {
            println!("{rendered}");
        } else {
            print!("{rendered}");
        }
    }
}

/// Scripted I/O for tests and non-terminal front ends.
///
/// Input lines are popped from a queue; output is captured verbatim
/// (without styling) for later inspection.
#[derive(Debug, Default)]
pub struct MemoryIo {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
}

impl MemoryIo {
    pub fn new(inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything printed so far, joined into one string.
    pub fn transcript(&self) -> String {
        self.output.concat()
    }
}

impl IoHandler for MemoryIo {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.output.push(prompt.to_string());
        self.inputs.pop_front()
    }

    fn print(&mut self, text: &str, _style: TextStyle, newline: bool) {
        self.output.push(if newline { format!("{text}\n") } else { text.to_string() });
    }
}
