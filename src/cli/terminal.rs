//! Terminal capability detection and colour helpers

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout accepts ANSI colours
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Check if the terminal is narrower than the unit table (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 60)
}

/// Extension trait for colouring status messages
///
/// Each method takes whether the destination accepts colour; with `false`
/// the text comes back unchanged.
pub trait Colorize {
    /// Completed rentals and returns (green)
    fn success(&self, color: bool) -> String;
    /// Rejected requests (amber)
    fn warning(&self, color: bool) -> String;
    /// Section headings (blue)
    fn heading(&self, color: bool) -> String;
    /// Secondary detail
    fn dim(&self, color: bool) -> String;
}

impl Colorize for str {
    fn success(&self, color: bool) -> String {
        paint(self, color, |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self, color: bool) -> String {
        paint(self, color, |s| s.fg::<css::Orange>().to_string())
    }

    fn heading(&self, color: bool) -> String {
        paint(self, color, |s| s.fg::<css::LightBlue>().bold().to_string())
    }

    fn dim(&self, color: bool) -> String {
        paint(self, color, |s| s.dimmed().to_string())
    }
}

impl Colorize for String {
    fn success(&self, color: bool) -> String {
        self.as_str().success(color)
    }

    fn warning(&self, color: bool) -> String {
        self.as_str().warning(color)
    }

    fn heading(&self, color: bool) -> String {
        self.as_str().heading(color)
    }

    fn dim(&self, color: bool) -> String {
        self.as_str().dim(color)
    }
}

fn paint(text: &str, color: bool, style: impl FnOnce(&str) -> String) -> String {
    if color { style(text) } else { text.to_string() }
}
