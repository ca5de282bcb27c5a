// src/utils/report.rs

//! Console report formatting for human-facing CLI output.
//!
//! Diagnostics go through the `log` facade; this module only renders the
//! headers, steps and summaries a user reads after a run.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silence (or restore) all report output.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn enabled() -> bool {
    !QUIET.load(Ordering::Relaxed)
}

/// Prefix a line with a local timestamp.
fn format_line(message: &str) -> String {
    format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message)
}

/// Print a plain report line.
pub fn line(message: &str) {
    if enabled() {
        println!("{}", format_line(message));
    }
}

/// Print a success line.
pub fn success(message: &str) {
    line(&format!("✓ {message}"));
}

/// Print a numbered step of a multi-step run.
pub fn step(step_num: usize, total: usize, message: &str) {
    line(&format!("[STEP {step_num}/{total}] {message}"));
}

/// Print a horizontal separator.
pub fn separator() {
    line(&"─".repeat(60));
}

/// Print a boxed header.
pub fn header(title: &str) {
    let border = "═".repeat(60);
    line(&border);
    line(&format!("  {title}"));
    line(&border);
}

/// Print an indented sub-item.
pub fn sub_item(message: &str) {
    line(&format!("    {message}"));
}

/// Print a titled list of key/value pairs.
pub fn summary(title: &str, items: &[(&str, String)]) {
    line(&format!("[SUMMARY] {title}"));
    for (key, value) in items {
        sub_item(&format!("{key}: {value}"));
    }
}
