// Line-oriented terminal session driving a ListStore

use crate::config::Config;
use crate::render::render_list;
use crate::store::{ListStore, StoreError};
use colored::Colorize;
use eyre::{Context, Result};
use std::borrow::Cow;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  <text>           add a problem (input mode) or search (search mode)
  :add <text>      add a problem
  :search [text]   set the search text; no text clears it
  :del <n>         delete the problem numbered <n>
  :menu            switch between input and search mode
  :list            show the list again
  :help            show this help
  :quit            leave";

/// What a plain line of text does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Input,
    Search,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Mode::Input => Mode::Search,
            Mode::Search => Mode::Input,
        }
    }
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, interpreted according to the current mode
    Text(String),
    Add(String),
    Search(String),
    /// 1-based row number as displayed
    Delete(usize),
    Menu,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command ':{0}' (try :help)")]
    Unknown(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a row number")]
    InvalidNumber(String),
}

impl Command {
    /// Parse a line; lines starting with ':' are commands, anything else is text
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Text(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg),
            None => (rest, ""),
        };

        match name {
            "add" | "a" => Ok(Command::Add(arg.to_string())),
            "search" | "s" => Ok(Command::Search(arg.to_string())),
            "del" | "d" => {
                let arg = arg.trim();
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("del"));
                }
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Command::Delete(n)),
                    _ => Err(CommandError::InvalidNumber(arg.to_string())),
                }
            }
            "menu" | "m" => Ok(Command::Menu),
            "list" | "l" => Ok(Command::List),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive presentation layer; owns the store it renders
pub struct Session {
    store: ListStore,
    config: Config,
    mode: Mode,
    rendered: Option<u64>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_store(ListStore::new(), config)
    }

    pub fn with_store(store: ListStore, config: Config) -> Self {
        let mode = if config.start_in_search { Mode::Search } else { Mode::Input };
        Self {
            store,
            config,
            mode,
            rendered: None,
        }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Read lines from `input` until EOF or `:quit`, rendering to `out`
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        info!(mode = ?self.mode, "Session started");

        self.render(out)?;
        self.prompt(out)?;

        let mut buf = Vec::new();
        while let Some(line) = read_line(&mut input, &mut buf)? {
            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
            self.prompt(out)?;
        }

        info!(entries = self.store.len(), "Session ended");
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Text(text) => match self.mode {
                Mode::Input => {
                    self.store.add(&text);
                }
                Mode::Search => self.store.set_query(&text),
            },
            Command::Add(text) => {
                self.store.add(&text);
            }
            Command::Search(text) => self.store.set_query(&text),
            Command::Delete(number) => self.delete(number, out)?,
            Command::Menu => {
                self.mode = self.mode.toggled();
                writeln!(out, "Mode: {}", self.mode_label())?;
            }
            Command::List => self.render(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        if self.rendered != Some(self.store.revision()) {
            self.render(out)?;
        }

        Ok(Flow::Continue)
    }

    fn delete<W: Write>(&mut self, number: usize, out: &mut W) -> Result<()> {
        match self.store.delete(number - 1) {
            Ok(entry) => writeln!(out, "Deleted: {}", entry)?,
            Err(StoreError::InvalidIndex { position, len }) => {
                warn!(position, len, "Delete with invalid index");
                writeln!(out, "No problem numbered {} ({} shown)", number, len)?;
            }
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        render_list(&self.store, &self.config, out)?;
        self.rendered = Some(self.store.revision());
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        let label = self.mode_label();
        if self.config.color {
            write!(out, "{}> ", label.blue())?;
        } else {
            write!(out, "{}> ", label)?;
        }
        out.flush()?;
        Ok(())
    }

    fn mode_label(&self) -> &str {
        match self.mode {
            Mode::Input => self.config.input_prompt.as_str(),
            Mode::Search => self.config.search_prompt.as_str(),
        }
    }
}

/// Build a store from `input`, one entry per line, added in order
///
/// The last line read ends up first in the list; blank lines are skipped by
/// the add guard.
pub fn read_entries<R: BufRead>(mut input: R) -> Result<ListStore> {
    let mut store = ListStore::new();
    let mut buf = Vec::new();
    while let Some(line) = read_line(&mut input, &mut buf)? {
        store.add(&line);
    }
    Ok(store)
}

/// Read one line without its terminator; `None` at EOF
///
/// Invalid UTF-8 is replaced with U+FFFD instead of failing the read.
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }

    let line = match String::from_utf8_lossy(buf) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!("Replaced invalid UTF-8 in input line");
            line
        }
    };
    Ok(Some(line))
}

/// Batch mode: load entries from `input`, apply `query`, print what is visible
pub fn run_filter<R: BufRead, W: Write>(input: R, query: &str, json: bool, out: &mut W) -> Result<()> {
    let mut store = read_entries(input)?;
    store.set_query(query);

    let visible = store.visible();
    info!(total = store.len(), shown = visible.len(), "Filtered entries");

    if json {
        let encoded = serde_json::to_string_pretty(&visible).context("Failed to encode entries")?;
        writeln!(out, "{}", encoded)?;
    } else {
        for entry in visible {
            writeln!(out, "{}", entry)?;
        }
    }

    Ok(())
}
