//! Command-line mode: the text typed after `:`.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `reset` | Reset every filter to the defaults |
//! | `rm <key>` | Remove the filter with this key (`status`, `string:tag`, ...) |
//! | `status <v>...` | Add status values |
//! | `bool <term> <true\|false\|missing>` | Set a boolean filter |
//! | `date <term> [expr]` | Set a date filter; no expression means missing |
//! | `string <term> [value]` | Set a string filter; no value means missing |
//! | `kw [text]` | Set the keyword filter; no text clears it |
//! | `filter <json>` | Apply a filter descriptor such as `{"type":"status","value":["open"]}` |

use crate::{app::AppState, theme::Theme};
use facets_core::{
    get_filter, BooleanFilter, DateFilter, DateValue, Filter, FilterDescriptor, KeywordFilter,
    QueryFilter, StatusFilter, StringFilter,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Reset,
    /// Remove the active filter with this key.
    Remove(String),
    /// Merge a filter into the active list.
    Apply(Filter),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "reset" => Ok(Command::Reset),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "rm" => {
                if rest.is_empty() {
                    Err("usage: rm <key>".to_string())
                } else {
                    Ok(Command::Remove(rest.to_string()))
                }
            }
            "status" => {
                if rest.is_empty() {
                    Err("usage: status <value>...".to_string())
                } else {
                    Ok(Command::Apply(StatusFilter::new(rest.split_whitespace()).into()))
                }
            }
            "bool" => {
                let (term, value) = term_and_rest(rest, "usage: bool <term> <true|false|missing>")?;
                let value = match value {
                    "true" => Some(true),
                    "false" => Some(false),
                    "" | "missing" => None,
                    other => return Err(format!("not a boolean: {other}")),
                };
                Ok(Command::Apply(BooleanFilter::new(term, value).into()))
            }
            "date" => {
                let (term, expr) = term_and_rest(rest, "usage: date <term> [expr]")?;
                let value = (!expr.is_empty()).then(|| DateValue::parse(expr));
                Ok(Command::Apply(DateFilter::new(term, value).into()))
            }
            "string" => {
                let (term, value) = term_and_rest(rest, "usage: string <term> [value]")?;
                let value = (!value.is_empty()).then(|| value.to_string());
                Ok(Command::Apply(StringFilter::new(term, value).into()))
            }
            "kw" => {
                let mut keyword = KeywordFilter::default();
                if !rest.is_empty() {
                    keyword.value = Some(rest.to_string());
                }
                Ok(Command::Apply(keyword.into()))
            }
            "filter" => {
                let descriptor: FilterDescriptor =
                    serde_json::from_str(rest).map_err(|e| format!("bad descriptor: {e}"))?;
                get_filter(&descriptor)
                    .map(Command::Apply)
                    .map_err(|e| e.to_string())
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn term_and_rest<'a>(rest: &'a str, usage: &str) -> Result<(&'a str, &'a str), String> {
    let (term, tail) = rest
        .split_once(char::is_whitespace)
        .map(|(t, r)| (t, r.trim()))
        .unwrap_or((rest, ""));
    if term.is_empty() {
        Err(usage.to_string())
    } else {
        Ok((term, tail))
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Reset => {
            s.store.reset();
        }
        Command::Remove(key) => {
            let found = s.store.filters().into_iter().find(|f| f.key() == key);
            match found {
                Some(filter) => s.store.filter_removed(Some(&filter)),
                None => s.command_bar.error = Some(format!("no filter with key {key}")),
            }
        }
        Command::Apply(filter) => {
            s.store.filter_changed(filter);
        }
    }
    s.sync();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
