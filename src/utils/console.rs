// src/utils/console.rs

//! Human-facing report output on stdout.
//!
//! Diagnostics go through the `log` facade; this module only prints the
//! report a user reads (feed title, episode dump, saved files).

use std::sync::OnceLock;

/// Whether report output is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Width of header rules
const RULE_WIDTH: usize = 50;

/// Initialize console output. Only the first call takes effect.
pub fn init(enabled: bool) {
    let _ = ENABLED.set(enabled);
}

fn enabled() -> bool {
    ENABLED.get().copied().unwrap_or(true)
}

/// Print a plain line
pub fn line(message: &str) {
    if enabled() {
        println!("{}", message);
    }
}

/// Print a blank line
pub fn blank() {
    if enabled() {
        println!();
    }
}

/// Print a header framed by double rules
pub fn header(title: &str) {
    if enabled() {
        let border = "=".repeat(RULE_WIDTH);
        println!("{}", border);
        println!("  {}", title);
        println!("{}", border);
    }
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    if enabled() {
        println!("    {}", message);
    }
}

/// Print a success line; shown even when the report dump is disabled
pub fn success(message: &str) {
    println!("✓ {}", message);
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled() {
        println!();
        println!("[SUMMARY] {}", title);
        for (key, value) in items {
            println!("    {}: {}", key, value);
        }
    }
}
