//! Tagged logging sink.
//!
//! Every component logs through a `Logger` carrying its component tag.
//! Lines are rendered as `[tag:level] message`; info goes to stdout, warn
//! and error to stderr. The prefix is colored per level (info blue, warn
//! magenta, error red) when the stream supports it; color is presentation
//! only and never part of the message contract.

use owo_colors::{OwoColorize, Stream};

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    /// Lowercase name used in the line prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// A logging handle for one component.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    tag: &'static str,
}

impl Logger {
    pub const fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    pub fn info(&self, message: impl std::fmt::Display) {
        println!(
            "{} {}",
            prefix(self.tag, Level::Info).if_supports_color(Stream::Stdout, |p| p.blue()),
            message
        );
    }

    pub fn warn(&self, message: impl std::fmt::Display) {
        eprintln!(
            "{} {}",
            prefix(self.tag, Level::Warn).if_supports_color(Stream::Stderr, |p| p.magenta()),
            message
        );
    }

    pub fn error(&self, message: impl std::fmt::Display) {
        eprintln!(
            "{} {}",
            prefix(self.tag, Level::Error).if_supports_color(Stream::Stderr, |p| p.red()),
            message
        );
    }
}

/// `[tag:level]` line prefix.
fn prefix(tag: &str, level: Level) -> String {
    format!("[{}:{}]", tag, level.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_combines_tag_and_level() {
        assert_eq!(prefix("server", Level::Info), "[server:info]");
        assert_eq!(prefix("laravel", Level::Warn), "[laravel:warn]");
        assert_eq!(prefix("prestart", Level::Error), "[prestart:error]");
    }

    #[test]
    fn level_names_are_lowercase() {
        assert_eq!(Level::Info.as_str(), "info");
        assert_eq!(Level::Warn.as_str(), "warn");
        assert_eq!(Level::Error.as_str(), "error");
    }
}
