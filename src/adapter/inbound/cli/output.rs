//! Terminal output for CLI handlers.
//!
//! Every line goes through one of the functions here so `--json` and
//! `--quiet` behave the same across commands. In JSON mode each call prints
//! one `{"type": ..., "payload": ...}` object per line.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level from `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    match cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags. Call once, early.
pub fn configure(config: OutputConfig) {
    match cell().write() {
        Ok(mut slot) => *slot = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

fn json_line(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

/// Route one line: JSON to stdout, text through `text` unless quiet.
fn emit(kind: &str, payload: Value, text: impl FnOnce()) {
    let config = current();
    if config.json {
        println!("{}", json_line(kind, payload));
    } else if !config.quiet {
        text();
    }
}

/// Print a section header.
pub fn section(title: &str) {
    emit("section", json!({ "title": title }), || {
        println!();
        println!("{}", title.bold());
    });
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        || println!("  {:<18} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), || {
        println!("  {} {}", "✓".green(), message);
    });
}

/// Warnings are shown even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        println!("{}", json_line("warning", json!({ "message": message })));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Errors go to stderr in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json_line("error", json!({ "message": message })));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), || {
        println!("  {}", message.dimmed());
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), || {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    });
}

/// Emit a JSON value as-is, for commands with structured results.
pub fn json_output(value: Value) {
    println!("{value}");
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner. Hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner()
            .tick_strings(BRAILLE_SPINNER)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = current();
    if config.json || config.quiet {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    if is_json() {
        pb.finish_and_clear();
        println!("{}", json_line("spinner_fail", json!({ "message": message })));
        return;
    }
    pb.finish_with_message(format!("{} {}", "×".red(), message));
}

fn styled(value: impl Display, style: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        style(&value)
    }
}

pub fn positive(value: impl Display) -> String {
    styled(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    styled(value, |v| v.red().to_string())
}

pub fn highlight(value: impl Display) -> String {
    styled(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_carry_type_and_payload() {
        let line = json_line("field", json!({ "label": "Fee", "value": "5" }));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["type"], "field");
        assert_eq!(parsed["payload"]["value"], "5");
    }
}
