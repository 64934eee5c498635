use owo_colors::OwoColorize;

use crate::errors::{BatchFailure, FsOpError};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Used for primary output such as
/// stat listings that users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One line per failure: message, then the kind's hint when it has one.
pub fn describe_error(e: &FsOpError) -> String {
    let hint = e.kind().hint();
    if hint.is_empty() {
        e.to_string()
    } else {
        format!("{e} ({hint})")
    }
}

pub fn print_batch_failure(failure: &BatchFailure) {
    for e in &failure.failures {
        print_error(&describe_error(e));
    }
    print_warn(&failure.to_string());
}
