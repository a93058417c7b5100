//! Shell-exec binary entry point: a minimal interactive command loop.
//!
//! The loop is deliberately plain: prompt, read a line, split on
//! whitespace, hand the vector to the execution core. All process
//! machinery lives in the library.

use std::io::{self, BufRead, Write};

use shell_exec::{cli, logging, Config};
use tracing::info;

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("shell-exec: {}", err);
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return;
    }
    if args.version {
        cli::print_version();
        return;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("shell-exec: {}", err);
            std::process::exit(2);
        }
    };

    logging::init_with_filter(&config.log_filter());
    info!("shell-exec v{}", env!("CARGO_PKG_VERSION"));

    // Signal dispositions are process-wide; a failure here means the shell
    // cannot survive interrupts or reap children, so it must not start.
    if let Err(err) = shell_exec::initialize() {
        eprintln!("shell-exec: {}", err);
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", config.shell.prompt);
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("shell-exec: failed to read input: {}", err);
                break;
            }
            None => break, // EOF (Ctrl-D)
        };

        let mut argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if argv.is_empty() {
            continue;
        }

        // A failed launch only poisons this line; the loop keeps going.
        if let Err(err) = shell_exec::execute_command(&mut argv) {
            eprintln!("shell-exec: {}", err);
        }
    }

    let _ = shell_exec::shutdown();
}
