//! Error types for shell-exec.

use thiserror::Error;

/// Main error type for shell-exec operations.
///
/// Failures inside a forked child (bad redirect, failed exec) never surface
/// here: the child reports to stderr and exits with a failure status. This
/// type only covers errors the parent shell can observe.
#[derive(Error, Debug)]
pub enum ShellExecError {
    /// Installing a process-wide signal disposition failed at startup.
    #[error("failed to install signal disposition: {0}")]
    SignalSetup(#[source] nix::errno::Errno),

    /// Forking a child process failed.
    #[error("fork failed: {0}")]
    Fork(#[source] nix::errno::Errno),

    /// Creating the anonymous pipe for a pipeline failed.
    #[error("pipe creation failed: {0}")]
    Pipe(#[source] nix::errno::Errno),

    /// Waiting for a foreground child failed for a reason other than the
    /// child having already been reaped.
    #[error("wait failed for pid {pid}: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: nix::errno::Errno,
    },

    /// The argument vector was empty, or a mode marker left nothing to run.
    #[error("empty command")]
    EmptyCommand,

    /// An argument contained an interior NUL byte and cannot be passed to
    /// the exec primitive.
    #[error("argument contains an interior NUL byte: {0:?}")]
    InteriorNul(String),

    /// Generic system call failure.
    #[error("system call failed: {0}")]
    Sys(#[from] nix::errno::Errno),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for shell-exec operations.
pub type Result<T> = std::result::Result<T, ShellExecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn test_signal_setup_display() {
        let err = ShellExecError::SignalSetup(Errno::EINVAL);
        assert!(err.to_string().contains("signal disposition"));
    }

    #[test]
    fn test_fork_display() {
        let err = ShellExecError::Fork(Errno::EAGAIN);
        assert!(err.to_string().contains("fork failed"));
    }

    #[test]
    fn test_wait_display_includes_pid() {
        let err = ShellExecError::Wait {
            pid: 4242,
            source: Errno::EINVAL,
        };
        assert!(err.to_string().contains("4242"));
    }

    #[test]
    fn test_empty_command_display() {
        let err = ShellExecError::EmptyCommand;
        assert_eq!(err.to_string(), "empty command");
    }

    #[test]
    fn test_interior_nul_display() {
        let err = ShellExecError::InteriorNul("a\0b".into());
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShellExecError = io_err.into();
        assert!(matches!(err, ShellExecError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_errno_conversion() {
        let err: ShellExecError = Errno::EBADF.into();
        assert!(matches!(err, ShellExecError::Sys(_)));
    }
}
