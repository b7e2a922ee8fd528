//! Leveled output control
//!
//! This module provides the [`Logger`] used for every user-visible message. Messages carry a
//! level prefix (`[DEBG]`, `[INFO]`, `[WARN]`, `[ERROR]`) and are colored when the target
//! stream is a terminal. Debug messages are only shown when debug output is enabled.

use std::io::{self, IsTerminal};
use std::time::Duration;

const NORMAL: &str = "\x1b[0m";
const BLUE: &str = "\x1b[1;94m";
const GREEN: &str = "\x1b[1;92m";
const YELLOW: &str = "\x1b[1;93m";
const RED: &str = "\x1b[1;91m";

/// Logger responsible for all user-visible output
#[derive(Debug, Clone)]
pub struct Logger {
    pub debug: bool,
    color_stdout: bool,
    color_stderr: bool,
}

impl Logger {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            color_stdout: io::stdout().is_terminal(),
            color_stderr: io::stderr().is_terminal(),
        }
    }

    /// Logger that never emits escape sequences
    pub fn plain(debug: bool) -> Self {
        Self {
            debug,
            color_stdout: false,
            color_stderr: false,
        }
    }

    /// Debug message, shown only with debug output enabled
    pub fn debug(&self, message: &str) {
        if let Some(line) = self.debug_line(message) {
            println!("{}", line);
        }
    }

    fn debug_line(&self, message: &str) -> Option<String> {
        self.debug
            .then(|| Self::render(self.color_stdout, BLUE, "DEBG", message))
    }

    /// Information message
    pub fn info(&self, message: &str) {
        println!("{}", Self::render(self.color_stdout, GREEN, "INFO", message));
    }

    /// Warning message
    pub fn warning(&self, message: &str) {
        eprintln!("{}", Self::render(self.color_stderr, YELLOW, "WARN", message));
    }

    /// Error message
    pub fn error(&self, message: &str) {
        eprintln!("{}", Self::render(self.color_stderr, RED, "ERROR", message));
    }

    /// Main section heading
    pub fn section(&self, title: &str) {
        println!("\n=== {} ===", title);
    }

    // Summary method for displaying structured information
    pub fn summary(&self, title: &str, items: &[String]) {
        println!("\n{}", title);
        println!("{}", "-".repeat(title.len()));

        for item in items {
            println!("  - {}", item);
        }

        if items.is_empty() {
            println!("  (No items to display)");
        }
    }

    /// Format duration in human-readable format
    pub fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m{}s", secs / 60, secs % 60)
        } else {
            format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }

    fn render(color: bool, code: &str, level: &str, message: &str) -> String {
        if color {
            format!("{}[{}] {}{}", code, level, message, NORMAL)
        } else {
            format!("[{}] {}", level, message)
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_render_has_no_escape_codes() {
        assert_eq!(
            Logger::render(false, GREEN, "INFO", "Image: acme/base:1"),
            "[INFO] Image: acme/base:1"
        );
    }

    #[test]
    fn colored_render_resets_at_end() {
        let line = Logger::render(true, RED, "ERROR", "boom");
        assert!(line.starts_with(RED));
        assert!(line.ends_with(NORMAL));
        assert!(line.contains("[ERROR] boom"));
    }

    #[test]
    fn debug_lines_need_debug_enabled() {
        assert_eq!(Logger::plain(false).debug_line("Buildspec: {}"), None);
        assert_eq!(
            Logger::plain(true).debug_line("Buildspec: {}"),
            Some("[DEBG] Buildspec: {}".to_string())
        );
    }

    #[test]
    fn durations_are_human_readable() {
        let logger = Logger::plain(false);
        assert_eq!(logger.format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(logger.format_duration(Duration::from_secs(185)), "3m5s");
        assert_eq!(logger.format_duration(Duration::from_secs(3723)), "1h2m3s");
    }
}
