//! # shell-exec
//!
//! Process-execution core for an interactive command shell.
//!
//! Given one already-tokenized argument vector per input line, this crate
//! classifies the requested execution mode (foreground, background, input
//! redirection, or a two-stage pipeline), forks and wires the participating
//! processes, keeps the shell itself alive across interactive interrupts,
//! and reaps terminated background children asynchronously so none linger
//! as zombies.
//!
//! Line reading, tokenizing, prompts, history, and built-in commands are
//! the caller's business; the bundled `shell-exec` binary is one such
//! caller.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> shell_exec::Result<()> {
//!     shell_exec::logging::try_init().ok();
//!
//!     // Once, at startup: ignore SIGINT, install the SIGCHLD reaper.
//!     shell_exec::initialize()?;
//!
//!     // One call per input line. Mode markers are stripped in place.
//!     let mut argv: Vec<String> = ["echo", "hi", "|", "wc", "-c"]
//!         .iter()
//!         .map(ToString::to_string)
//!         .collect();
//!     shell_exec::execute_command(&mut argv)?;
//!
//!     shell_exec::shutdown()
//! }
//! ```
//!
//! This crate is Unix-only: it is built directly on `fork`, `execvp`,
//! `pipe`, and POSIX signal dispositions.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod launch;
pub mod logging;
pub mod reaper;
pub mod signal;

// Re-export commonly used types
pub use classify::{classify, ExecutionMode};
pub use config::Config;
pub use error::{Result, ShellExecError};
pub use signal::ChildRole;

/// Install the shell's process-wide signal dispositions.
///
/// Must be called once before the first [`execute_command`]. A failure here
/// should abort shell startup: without the ignored SIGINT the shell dies on
/// the first interrupt, and without the SIGCHLD reaper background children
/// accumulate as zombies.
pub fn initialize() -> Result<()> {
    signal::install_parent_defaults()
}

/// Classify and execute one argument vector.
///
/// Blocks until foreground participants terminate; background launches
/// return as soon as the fork succeeds. As a documented side effect, mode
/// markers are removed from `argv` in place (and for pipelines the vector
/// is drained into the two stage vectors).
///
/// Returns `Err` only for setup failures the shell can observe: fork,
/// pipe, wait, or a malformed vector. Exit codes of the spawned commands
/// are never decoded or returned; a command that ran and failed still
/// yields `Ok`.
pub fn execute_command(argv: &mut Vec<String>) -> Result<()> {
    let mode = classify::classify(argv)?;
    launch::launch(mode, argv)
}

/// Release shell resources before exit.
///
/// Nothing persists across calls besides kernel process-table state, so
/// this currently always succeeds; it exists so callers have a stable
/// teardown point.
pub fn shutdown() -> Result<()> {
    Ok(())
}
