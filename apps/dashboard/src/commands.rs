//! Line commands accepted by the interactive asset list.

use std::str::FromStr;

use clap::Args;
use list_core::SortDirection;
use shared::domain::{AssetId, AssetSortKey, AssetStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Filter(String),
    /// Sort-chip press: switches key, or flips direction on the active key.
    Sort(AssetSortKey),
    /// Sets the key outright, keeping the direction. `None` clears sorting.
    SortKey(Option<AssetSortKey>),
    Direction(SortDirection),
    Toggle,
    PageSize(usize),
    LoadMore,
    Reset,
    Edit {
        id: AssetId,
        name: Option<String>,
        status: Option<AssetStatus>,
        score: Option<String>,
    },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid argument for '{command}': {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },
}

pub const HELP: &str = "\
filter [text]          filter by name, location or status (blank clears)
sort <key>             name | status | updated | score (again to flip direction)
key <key|none>         set the sort key without touching direction
dir <asc|desc>         set direction
toggle                 flip direction
size <n>               rows per page
more                   load the next page
reset                  restore the initial list state
edit <id> [name=..] [status=..] [score=..]
show | help | quit";

/// `assets` flags, replayed as screen commands before the first render.
#[derive(Args, Debug, Clone, Default)]
pub struct ListFlags {
    #[arg(long)]
    pub filter: Option<String>,
    /// Sort key; keeps the configured direction unless `--dir` is given.
    #[arg(long)]
    pub sort: Option<AssetSortKey>,
    #[arg(long)]
    pub dir: Option<SortDirection>,
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Number of "load more" presses to apply.
    #[arg(long, default_value_t = 0)]
    pub load_more: usize,
}

impl ListFlags {
    pub fn into_commands(self) -> Vec<ScreenCommand> {
        let mut commands = Vec::new();
        if let Some(text) = self.filter {
            commands.push(ScreenCommand::Filter(text));
        }
        if let Some(key) = self.sort {
            commands.push(ScreenCommand::SortKey(Some(key)));
        }
        if let Some(dir) = self.dir {
            commands.push(ScreenCommand::Direction(dir));
        }
        if let Some(size) = self.page_size {
            commands.push(ScreenCommand::PageSize(size));
        }
        commands.extend(std::iter::repeat(ScreenCommand::LoadMore).take(self.load_more));
        commands
    }
}

impl FromStr for ScreenCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "filter" | "f" => Ok(ScreenCommand::Filter(rest.to_string())),
            "sort" | "s" => {
                let key = required(rest, "sort", "a sort key")?;
                key.parse::<AssetSortKey>()
                    .map(ScreenCommand::Sort)
                    .map_err(|err: shared::error::DashboardError| invalid("sort", err.message))
            }
            "key" => {
                let key = required(rest, "key", "a sort key or 'none'")?;
                if key.eq_ignore_ascii_case("none") {
                    return Ok(ScreenCommand::SortKey(None));
                }
                key.parse::<AssetSortKey>()
                    .map(|key| ScreenCommand::SortKey(Some(key)))
                    .map_err(|err: shared::error::DashboardError| invalid("key", err.message))
            }
            "dir" => {
                let dir = required(rest, "dir", "'asc' or 'desc'")?;
                dir.parse::<SortDirection>()
                    .map(ScreenCommand::Direction)
                    .map_err(|err: list_core::ParseSortDirectionError| invalid("dir", err.to_string()))
            }
            "toggle" | "t" => Ok(ScreenCommand::Toggle),
            "size" => {
                let size = required(rest, "size", "a page size")?;
                size.parse::<usize>()
                    .map(ScreenCommand::PageSize)
                    .map_err(|err: std::num::ParseIntError| invalid("size", err.to_string()))
            }
            "more" | "m" => Ok(ScreenCommand::LoadMore),
            "reset" => Ok(ScreenCommand::Reset),
            "edit" => parse_edit(rest),
            "show" | "ls" => Ok(ScreenCommand::Show),
            "help" | "?" => Ok(ScreenCommand::Help),
            "quit" | "q" | "exit" => Ok(ScreenCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn invalid(command: &'static str, reason: impl Into<String>) -> ParseCommandError {
    ParseCommandError::InvalidArgument {
        command,
        reason: reason.into(),
    }
}

/// `edit <id> name=Edge Node 9 status=warn score=88`; values run until the
/// next `key=`.
fn parse_edit(rest: &str) -> Result<ScreenCommand, ParseCommandError> {
    let (id, fields) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    let id = required(id, "edit", "an asset id")?;

    let mut name = None;
    let mut status = None;
    let mut score = None;
    let mut current: Option<(&str, Vec<&str>)> = None;

    let mut assign = |key: &str, words: Vec<&str>| -> Result<(), ParseCommandError> {
        let value = words.join(" ");
        match key {
            "name" => name = Some(value),
            "status" => {
                status = Some(
                    value
                        .parse::<AssetStatus>()
                        .map_err(|err: shared::error::DashboardError| invalid("edit", err.message))?,
                )
            }
            "score" => score = Some(value),
            other => return Err(invalid("edit", format!("unknown field '{other}'"))),
        }
        Ok(())
    };

    for word in fields.split_whitespace() {
        if let Some((key, value)) = word.split_once('=') {
            if let Some((previous, words)) = current.take() {
                assign(previous, words)?;
            }
            current = Some((key, vec![value]));
        } else if let Some((_, words)) = current.as_mut() {
            words.push(word);
        } else {
            return Err(invalid("edit", format!("expected key=value, got '{word}'")));
        }
    }
    if let Some((key, words)) = current {
        assign(key, words)?;
    }
    drop(assign);

    Ok(ScreenCommand::Edit {
        id: AssetId::from(id),
        name,
        status,
        score,
    })
}
