//! Operator-facing flows
//!
//! Routes the top-level action prompt to the run and inspect flows.

pub mod run;
pub mod see;

use thiserror::Error;

/// Top-level operator actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    See,
}

/// Operator input that does not map to anything actionable
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("invalid option `{0}`; choose \"run\" or \"see\"")]
    UnknownAction(String),

    #[error("invalid selection `{input}`; enter a number between 1 and {max}")]
    FolderIndex { input: String, max: usize },
}

/// Parse the top-level action answer; single-letter shorthand is accepted
pub fn parse_action(input: &str) -> Result<Action, SelectionError> {
    match input.trim().to_lowercase().as_str() {
        "r" | "run" => Ok(Action::Run),
        "s" | "see" => Ok(Action::See),
        other => Err(SelectionError::UnknownAction(other.to_string())),
    }
}

/// Parse a 1-based menu selection against the folder list
pub fn parse_folder_index(input: &str, max: usize) -> Result<usize, SelectionError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&index| index < max)
        .ok_or_else(|| SelectionError::FolderIndex {
            input: input.trim().to_string(),
            max,
        })
}
