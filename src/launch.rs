//! Process creation and descriptor wiring.
//!
//! One call per classified argument vector: fork the participating
//! process(es), wire their descriptors for the requested mode, replace each
//! child's image, and block on foreground participants. Setup failures
//! (fork, pipe) are this call's failure; anything that goes wrong after a
//! fork, inside the child, terminates that child alone with a failure
//! status the parent never decodes.

use std::ffi::CString;
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{close, dup2, execvp, fork, pipe, ForkResult, Pid};

use crate::classify::ExecutionMode;
use crate::error::{Result, ShellExecError};
use crate::signal::{self, ChildRole};

/// Exit status of a child that failed during signal or descriptor setup.
const CHILD_SETUP_FAILURE: i32 = 1;

/// Exit status of a child whose image replacement failed.
const CHILD_EXEC_FAILURE: i32 = 127;

/// Execute one classified command, blocking on foreground participants.
///
/// `argv` carries the marker-stripped arguments for every mode except
/// [`ExecutionMode::Pipeline`], whose stage vectors travel inside the mode
/// itself. Success means the launch succeeded; spawned-process exit codes
/// are never decoded or surfaced.
pub fn launch(mode: ExecutionMode, argv: &[String]) -> Result<()> {
    match mode {
        ExecutionMode::Simple => run_foreground(argv, ChildRole::ForegroundSimple, None),
        ExecutionMode::Background => run_background(argv),
        ExecutionMode::InputRedirect { path } => {
            run_foreground(argv, ChildRole::ForegroundRedirect, Some(&path))
        }
        ExecutionMode::Pipeline { left, right } => run_pipeline(&left, &right),
    }
}

/// Foreground execution, optionally with standard input redirected from
/// `stdin_from`. Covers the `Simple` and `InputRedirect` modes.
fn run_foreground(argv: &[String], role: ChildRole, stdin_from: Option<&Path>) -> Result<()> {
    let exec_args = to_exec_args(argv)?;
    let redirect = stdin_from.map(Path::to_path_buf);

    let child = spawn_child(role, exec_args, move || {
        if let Some(path) = redirect {
            // Opened read-only inside the child so an unreadable file kills
            // the child, not the launch. Dropping the File closes the
            // original descriptor once stdin points at it.
            let file = File::open(&path)?;
            dup2(file.as_raw_fd(), libc::STDIN_FILENO)?;
        }
        Ok(())
    })?;

    await_child(child)
}

/// Fire-and-forget execution: return as soon as the fork succeeds.
///
/// The child's termination is collected exclusively by the SIGCHLD reaper;
/// its outcome is invisible to this call.
fn run_background(argv: &[String]) -> Result<()> {
    let exec_args = to_exec_args(argv)?;
    let child = spawn_child(ChildRole::Background, exec_args, || Ok(()))?;
    tracing::debug!(pid = child.as_raw(), "background command launched");
    Ok(())
}

/// Two-stage pipeline: fork the writer, then the reader, wait for both.
///
/// Descriptor discipline: each process closes every pipe end it does not
/// use, exactly once. The parent drops its write end as soon as the writer
/// holds a copy (otherwise the reader would never see end-of-stream) and
/// its read end once the reader is forked.
fn run_pipeline(left: &[String], right: &[String]) -> Result<()> {
    let left_args = to_exec_args(left)?;
    let right_args = to_exec_args(right)?;

    let (read_end, write_end) = pipe().map_err(ShellExecError::Pipe)?;
    let read_fd = read_end.as_raw_fd();
    let write_fd = write_end.as_raw_fd();

    let writer = spawn_child(ChildRole::PipelineWriter, left_args, move || {
        close(read_fd)?;
        dup2(write_fd, libc::STDOUT_FILENO)?;
        close(write_fd)?;
        Ok(())
    })?;

    // The writer now holds its own copy of the write end.
    drop(write_end);

    let reader = spawn_child(ChildRole::PipelineReader, right_args, move || {
        dup2(read_fd, libc::STDIN_FILENO)?;
        close(read_fd)?;
        Ok(())
    })?;

    drop(read_end);

    // Both stages must terminate before the call returns; the order of the
    // two waits does not matter.
    let writer_done = await_child(writer);
    let reader_done = await_child(reader);
    writer_done.and(reader_done)
}

/// Convert an argument vector for the exec primitive.
///
/// Done before fork so the child allocates as little as possible between
/// fork and exec.
fn to_exec_args(argv: &[String]) -> Result<Vec<CString>> {
    if argv.is_empty() {
        return Err(ShellExecError::EmptyCommand);
    }
    argv.iter()
        .map(|arg| {
            CString::new(arg.as_str()).map_err(|_| ShellExecError::InteriorNul(arg.clone()))
        })
        .collect()
}

/// Fork one child and replace its image with `exec_args`.
///
/// Inside the child, `wire` performs the mode-specific descriptor work
/// after signal configuration and before exec. The child never returns
/// through this function: it either execs or exits with a failure status.
fn spawn_child<F>(role: ChildRole, exec_args: Vec<CString>, wire: F) -> Result<Pid>
where
    F: FnOnce() -> Result<()>,
{
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(child),
        Ok(ForkResult::Child) => {
            if let Err(err) = signal::configure_child(role) {
                child_abort("signal setup", &err, CHILD_SETUP_FAILURE);
            }
            if let Err(err) = wire() {
                child_abort("descriptor setup", &err, CHILD_SETUP_FAILURE);
            }
            match execvp(&exec_args[0], &exec_args) {
                Ok(infallible) => match infallible {},
                Err(err) => {
                    let name = exec_args[0].to_string_lossy();
                    eprintln!("shell-exec: {}: {}", name, err.desc());
                    child_exit(CHILD_EXEC_FAILURE);
                }
            }
        }
        Err(err) => Err(ShellExecError::Fork(err)),
    }
}

/// Report a pre-exec failure on the child's stderr and terminate it.
fn child_abort(what: &str, err: &ShellExecError, status: i32) -> ! {
    eprintln!("shell-exec: {}: {}", what, err);
    child_exit(status)
}

/// Terminate the child immediately, skipping destructors and exit hooks
/// that belong to the parent's image.
fn child_exit(status: i32) -> ! {
    unsafe { libc::_exit(status) }
}

/// Block until the foreground child terminates.
///
/// `ECHILD` means the asynchronous reaper got there first and is benign;
/// so is `EINTR`, kept for parity with restartable waits. Any other wait
/// failure is this call's failure.
fn await_child(pid: Pid) -> Result<()> {
    match waitpid(pid, None) {
        Ok(_) => Ok(()),
        Err(Errno::ECHILD) | Err(Errno::EINTR) => Ok(()),
        Err(err) => Err(ShellExecError::Wait {
            pid: pid.as_raw(),
            source: err,
        }),
    }
}
