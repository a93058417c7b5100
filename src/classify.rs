//! Argument-vector classification.
//!
//! One already-tokenized argument vector comes in per input line; this module
//! decides which of the four execution modes it requests and strips the mode
//! markers so the launcher only ever sees plain argv content.

use std::path::PathBuf;

use crate::error::{Result, ShellExecError};

/// Marker for a backgrounded command (`sleep 10 &`).
pub const BACKGROUND_MARKER: &str = "&";

/// Marker for input redirection (`wc -l < file`).
pub const REDIRECT_MARKER: &str = "<";

/// Marker separating the two stages of a pipeline (`ls | wc`).
pub const PIPE_MARKER: &str = "|";

/// How a classified argument vector is to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run in the foreground and wait for termination.
    Simple,
    /// Run detached; termination is collected by the reaper, never the caller.
    Background,
    /// Run in the foreground with standard input read from `path`.
    InputRedirect {
        /// File the child's standard input is redirected from.
        path: PathBuf,
    },
    /// Two-stage pipeline: `left`'s standard output feeds `right`'s
    /// standard input. Exactly one pipe is supported; the split happens at
    /// the first marker found.
    Pipeline {
        /// Argument vector of the writing stage.
        left: Vec<String>,
        /// Argument vector of the reading stage.
        right: Vec<String>,
    },
}

/// Classify an argument vector into an [`ExecutionMode`].
///
/// Mode markers are evaluated in fixed priority order, first match wins:
///
/// 1. trailing `&` -> [`ExecutionMode::Background`]
/// 2. `<` in second-to-last position -> [`ExecutionMode::InputRedirect`]
/// 3. any `|` -> [`ExecutionMode::Pipeline`], split at the first one
/// 4. otherwise -> [`ExecutionMode::Simple`]
///
/// A vector carrying both `&` and `|` classifies as `Background`; the pipe
/// marker is then passed through as a literal argument. That precedence is
/// inherited behavior, not a designed one.
///
/// Markers are removed from `argv` in place. For `Pipeline`, `argv` is
/// drained entirely into the two stage vectors. Whether the target
/// executables exist is not checked here; an unresolvable name only shows up
/// when image replacement fails inside the child.
pub fn classify(argv: &mut Vec<String>) -> Result<ExecutionMode> {
    if argv.is_empty() {
        return Err(ShellExecError::EmptyCommand);
    }

    if argv.last().map(String::as_str) == Some(BACKGROUND_MARKER) {
        argv.pop();
        if argv.is_empty() {
            return Err(ShellExecError::EmptyCommand);
        }
        return Ok(ExecutionMode::Background);
    }

    if argv.len() >= 2 && argv[argv.len() - 2] == REDIRECT_MARKER {
        let path = PathBuf::from(argv.pop().unwrap_or_default());
        argv.pop(); // the marker itself
        if argv.is_empty() {
            return Err(ShellExecError::EmptyCommand);
        }
        return Ok(ExecutionMode::InputRedirect { path });
    }

    if let Some(split) = argv.iter().position(|arg| arg == PIPE_MARKER) {
        let right: Vec<String> = argv.split_off(split + 1);
        argv.pop(); // the marker itself
        let left = std::mem::take(argv);
        if left.is_empty() || right.is_empty() {
            return Err(ShellExecError::EmptyCommand);
        }
        return Ok(ExecutionMode::Pipeline { left, right });
    }

    Ok(ExecutionMode::Simple)
}
