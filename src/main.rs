// SPDX-License-Identifier: MIT
//
// n-line — echo REPL.
//
// Reads lines with full editing and prints each one back. Non-empty lines
// are added to history.
//
//   n-line [HISTORY_FILE]
//
// HISTORY_FILE is loaded at start if it exists and written back on exit.
//
// Environment:
//
//   N_LINE_PROMPT   prompt to show (default "> ")
//   N_LINE_LOG      write debug logs to this file; RUST_LOG filters them
//
// Logs never go to the terminal: raw-mode output would garble them.

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use n_line::Scanner;

const DEFAULT_PROMPT: &str = "> ";

fn init_logging() {
    let Some(path) = env::var_os("N_LINE_LOG") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("n-line: can't open log file {}: {e}", path.display()),
    }
}

fn main() -> ExitCode {
    init_logging();

    let history = env::args_os().nth(1).map(PathBuf::from);
    let prompt = env::var("N_LINE_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_owned());

    let mut scanner = Scanner::stdio();
    if let Some(path) = history.as_deref().filter(|p| p.exists()) {
        if let Err(e) = scanner.load_history(path) {
            eprintln!("n-line: {e}");
        }
    }

    while scanner.scan(&prompt) {
        let line = scanner.text().into_owned();
        if !line.is_empty() {
            scanner.add_to_history(&line);
            println!("{line}");
        }
    }

    let mut code = ExitCode::SUCCESS;
    if let Some(err) = scanner.err() {
        eprintln!("n-line: {err}");
        code = ExitCode::FAILURE;
    }
    if let Some(path) = &history {
        if let Err(e) = scanner.save_history(path) {
            eprintln!("n-line: {e}");
            code = ExitCode::FAILURE;
        }
    }
    code
}
