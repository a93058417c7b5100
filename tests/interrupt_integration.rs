//! Interrupt-handling integration test.
//!
//! Drives the real shell-exec binary in its own process group and delivers
//! a terminal-style SIGINT to the whole group while a foreground command is
//! running. The foreground command must die; the shell must survive and
//! execute a subsequent line.
//!
//! Kept out of the other execution tests on purpose: those install the
//! library's SIGCHLD reaper in the test process, which would steal the
//! `std::process::Command` waits used here.

#![cfg(unix)]

use std::io::Write;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

#[test]
fn test_interrupt_kills_foreground_command_but_not_the_shell() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("after-interrupt");

    let mut shell = Command::new(env!("CARGO_BIN_EXE_shell-exec"))
        // Own process group, so the group-wide SIGINT below misses the
        // test process and mimics what a terminal sends on Ctrl-C.
        .process_group(0)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdin = shell.stdin.take().unwrap();
    let start = Instant::now();

    // A foreground command that would outlive the whole test if the
    // interrupt did not reach it.
    stdin.write_all(b"sleep 30\n").unwrap();
    stdin.flush().unwrap();

    // Give the shell time to fork the child before interrupting.
    std::thread::sleep(Duration::from_millis(500));

    // The shell ignores the interrupt; the foreground child, which reset
    // SIGINT to its default disposition, dies by it.
    let pgid = shell.id() as i32;
    unsafe {
        libc::kill(-pgid, libc::SIGINT);
    }

    // A subsequent line must still execute once the interrupted foreground
    // wait returns.
    stdin
        .write_all(format!("touch {}\n", marker.display()).as_bytes())
        .unwrap();
    stdin.flush().unwrap();
    drop(stdin); // EOF ends the shell loop

    let status = wait_with_deadline(&mut shell, Duration::from_secs(10));
    assert!(status.success(), "shell exited abnormally: {:?}", status);
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "foreground command survived the interrupt"
    );
    assert!(
        marker.exists(),
        "shell did not execute a command after the interrupt"
    );
}

/// Poll for shell exit, killing it if the deadline passes so a regression
/// cannot hang the test run for the full length of the sleep.
fn wait_with_deadline(shell: &mut Child, deadline: Duration) -> ExitStatus {
    let start = Instant::now();
    loop {
        if let Some(status) = shell.try_wait().unwrap() {
            return status;
        }
        if start.elapsed() > deadline {
            let _ = shell.kill();
            let _ = shell.wait();
            panic!("shell still running after the foreground interrupt");
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
