//! Signal disposition policy.
//!
//! The shell process ignores interactive interrupts and reaps terminated
//! children asynchronously; every forked child gets its dispositions reset
//! according to its role before image replacement. Disposition is always
//! threaded in explicitly as a [`ChildRole`], never read back as ambient
//! process state from inside the launch logic.

use nix::sys::signal::{sigaction, signal, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::{Result, ShellExecError};
use crate::reaper;

/// Role a freshly forked child plays, deciding its signal dispositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
    /// Plain foreground command.
    ForegroundSimple,
    /// Foreground command with redirected standard input.
    ForegroundRedirect,
    /// Writing (left) stage of a pipeline.
    PipelineWriter,
    /// Reading (right) stage of a pipeline.
    PipelineReader,
    /// Detached background command.
    Background,
}

impl ChildRole {
    /// Whether the caller blocks on this child until it terminates.
    pub fn is_foreground(self) -> bool {
        !matches!(self, ChildRole::Background)
    }
}

/// Install the shell's process-wide signal dispositions.
///
/// SIGINT is ignored so a terminal interrupt aimed at the whole process
/// group does not kill the shell itself. SIGCHLD triggers the asynchronous
/// reaper, with `SA_RESTART` so interrupted system calls resume
/// transparently and `SA_NOCLDSTOP` so stopped (not terminated) children
/// stay out of the reaper's way.
///
/// Called once at startup; a failure here aborts the shell before any
/// command runs.
pub fn install_parent_defaults() -> Result<()> {
    unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }
        .map_err(ShellExecError::SignalSetup)?;

    let reap = SigAction::new(
        SigHandler::Handler(reaper::handle_sigchld),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGCHLD, &reap) }.map_err(ShellExecError::SignalSetup)?;

    tracing::debug!("parent signal dispositions installed");
    Ok(())
}

/// Reset signal dispositions inside a freshly forked child.
///
/// Foreground roles restore default SIGINT handling so an interactive
/// interrupt terminates the running command as expected; a background child
/// keeps the inherited ignore so interrupts meant for the shell pass it by.
/// Every role restores default SIGCHLD handling, so grandchildren are reaped
/// by ordinary wait semantics instead of the shell's handler.
///
/// Runs between fork and exec: any failure is fatal to this child only and
/// is reported by the caller before the child exits.
pub fn configure_child(role: ChildRole) -> Result<()> {
    if role.is_foreground() {
        unsafe { signal(Signal::SIGINT, SigHandler::SigDfl) }
            .map_err(ShellExecError::SignalSetup)?;
    }

    unsafe { signal(Signal::SIGCHLD, SigHandler::SigDfl) }
        .map_err(ShellExecError::SignalSetup)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_roles() {
        assert!(ChildRole::ForegroundSimple.is_foreground());
        assert!(ChildRole::ForegroundRedirect.is_foreground());
        assert!(ChildRole::PipelineWriter.is_foreground());
        assert!(ChildRole::PipelineReader.is_foreground());
        assert!(!ChildRole::Background.is_foreground());
    }
}
