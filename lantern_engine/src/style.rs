//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides convenience methods for applying ANSI
//! styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn item_style(&self) -> ColoredString;
    fn location_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn emphasis_style(&self) -> ColoredString;
    fn system_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn location_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.truecolor(160, 200, 230)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(120, 200, 120)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn emphasis_style(&self) -> ColoredString {
        self.bold()
    }
    fn system_style(&self) -> ColoredString {
        self.italic().dimmed()
    }
}

impl GameStyle for String {
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn location_style(&self) -> ColoredString {
        self.as_str().location_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn emphasis_style(&self) -> ColoredString {
        self.as_str().emphasis_style()
    }
    fn system_style(&self) -> ColoredString {
        self.as_str().system_style()
    }
}
