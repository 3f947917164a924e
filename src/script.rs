//! Keystroke scripts
//!
//! A script drives a [`Session`] headlessly, one step per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! click 0 2
//! key backspace
//! type 3.00
//! key enter
//! key ctrl+down
//! undo 1
//! discard
//! blur
//! save
//! print
//! ```
//!
//! Every step waits for the repository work it started before the next one runs.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::grid::GridViewport;
use crate::keymap::{parse_key_string, KeymapError, Keystroke};
use crate::messages::{GridMsg, Msg};
use crate::runtime::Session;

/// One script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Key(Keystroke),
    Type(String),
    Click { row: usize, col: usize },
    Blur,
    /// 1-based row, as displayed in the gutter
    Undo(usize),
    Discard,
    Save,
    Print,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Key {
        line: usize,
        #[source]
        source: KeymapError,
    },
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_script(&content)
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let step = match word.to_lowercase().as_str() {
            "key" => {
                let keystroke =
                    parse_key_string(rest).map_err(|source| ScriptError::Key { line, source })?;
                ScriptStep::Key(keystroke)
            }
            // Text keeps its inner spacing; only the separator after `type` is dropped
            "type" => ScriptStep::Type(
                raw.trim_start()
                    .get(word.len() + 1..)
                    .unwrap_or_default()
                    .to_string(),
            ),
            "click" => {
                let mut numbers = rest.split_whitespace().map(|n| parse_index(n, line));
                match (numbers.next(), numbers.next(), numbers.next()) {
                    (Some(row), Some(col), None) => ScriptStep::Click {
                        row: row?,
                        col: col?,
                    },
                    _ => return Err(parse_error(line, "expected `click <row> <col>`")),
                }
            }
            "undo" => {
                let row = parse_index(rest, line)?;
                if row == 0 {
                    return Err(parse_error(line, "rows are numbered from 1"));
                }
                ScriptStep::Undo(row)
            }
            "blur" => no_args(ScriptStep::Blur, rest, line)?,
            "discard" => no_args(ScriptStep::Discard, rest, line)?,
            "save" => no_args(ScriptStep::Save, rest, line)?,
            "print" => no_args(ScriptStep::Print, rest, line)?,
            other => return Err(parse_error(line, &format!("unknown step `{}`", other))),
        };
        steps.push(step);
    }

    Ok(steps)
}

fn parse_error(line: usize, message: &str) -> ScriptError {
    ScriptError::Parse {
        line,
        message: message.to_string(),
    }
}

fn parse_index(text: &str, line: usize) -> Result<usize, ScriptError> {
    text.trim()
        .parse()
        .map_err(|_| parse_error(line, &format!("expected a number, got `{}`", text)))
}

fn no_args(step: ScriptStep, rest: &str, line: usize) -> Result<ScriptStep, ScriptError> {
    if rest.is_empty() {
        Ok(step)
    } else {
        Err(parse_error(line, &format!("unexpected argument `{}`", rest)))
    }
}

/// Replay steps against a session, writing a rendering for every `print`
///
/// Stops early if a step requests quit.
pub async fn run_script(
    session: &mut Session<GridViewport>,
    steps: &[ScriptStep],
    out: &mut impl Write,
) -> Result<(), ScriptError> {
    for step in steps {
        tracing::debug!("Script step: {:?}", step);

        match step {
            ScriptStep::Key(keystroke) => {
                session.handle_key(*keystroke);
            }
            ScriptStep::Type(text) => {
                session.dispatch(Msg::Grid(GridMsg::InsertText(text.clone())));
            }
            ScriptStep::Click { row, col } => {
                session.dispatch(Msg::Grid(GridMsg::Click {
                    row: *row,
                    col: *col,
                }));
            }
            ScriptStep::Blur => {
                session.dispatch(Msg::Grid(GridMsg::Blur));
            }
            ScriptStep::Undo(row) => {
                session.dispatch(Msg::Grid(GridMsg::UndoRow(row - 1)));
            }
            ScriptStep::Discard => {
                session.dispatch(Msg::Grid(GridMsg::DiscardAll));
            }
            ScriptStep::Save => {
                session.dispatch(Msg::Grid(GridMsg::Save));
            }
            ScriptStep::Print => {
                out.write_all(session.render().as_bytes())?;
            }
        }

        session.settle().await;

        if session.model().should_quit {
            tracing::info!("Script stopped by quit");
            break;
        }
    }

    Ok(())
}
