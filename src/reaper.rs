//! Asynchronous reaping of terminated children.
//!
//! Installed as the SIGCHLD handler by [`crate::signal::install_parent_defaults`],
//! so it can interleave with any point of the shell's execution. Everything
//! in here must stay async-signal-safe: raw `waitpid` with `WNOHANG`, no
//! allocation, no locks, no tracing. errno is saved and restored so an
//! interrupted system call in the main control flow never observes a value
//! clobbered by the handler.

/// SIGCHLD handler: drain every currently-terminated child without blocking.
///
/// Stops when only live children remain (`waitpid` returns 0) or when the
/// process has no children at all (`ECHILD`), which is the normal idle
/// state. Exit statuses of reaped children are discarded. Any other
/// `waitpid` failure is unrecoverable here: the reaper is the last line of
/// defense against zombie accumulation, so it terminates the whole shell
/// rather than silently leaking process-table entries.
pub extern "C" fn handle_sigchld(_signo: libc::c_int) {
    let saved_errno = unsafe { *errno_location() };

    loop {
        let pid = unsafe { libc::waitpid(-1, std::ptr::null_mut(), libc::WNOHANG) };

        if pid == 0 {
            // Children exist but none are zombies.
            break;
        }

        if pid == -1 {
            let err = unsafe { *errno_location() };
            if err == libc::ECHILD {
                break;
            }
            if err == libc::EINTR {
                continue;
            }
            die_on_wait_failure();
        }
    }

    unsafe { *errno_location() = saved_errno };
}

/// Report the failed collection and terminate the shell.
///
/// Only `write(2)` and `_exit(2)` are used; both are async-signal-safe.
fn die_on_wait_failure() -> ! {
    const MSG: &[u8] = b"shell-exec: reaper: waitpid failed, terminating\n";
    unsafe {
        let _ = libc::write(libc::STDERR_FILENO, MSG.as_ptr().cast(), MSG.len());
        libc::_exit(1);
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__errno_location()
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__error()
}
