//! ANSI terminal colors.

use std::io::IsTerminal;

use ansi_term::Colour;
use punch_core::{Color, Paint, Plain};

/// Paints text with ANSI escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPaint;

impl Paint for AnsiPaint {
    fn paint(&self, color: Color, text: &str) -> String {
        let colour = match color {
            Color::Red => Colour::Red,
            Color::Green => Colour::Green,
            Color::Yellow => Colour::Yellow,
            Color::Blue => Colour::Blue,
            Color::Cyan => Colour::Cyan,
            Color::Grey => Colour::Fixed(245),
        };
        colour.paint(text).to_string()
    }
}

/// Decides whether output should be colored.
///
/// Color needs the config to allow it, no `--no-color`, no `NO_COLOR` in the
/// environment, and a terminal on stdout.
pub fn color_enabled(configured: bool, no_color_flag: bool) -> bool {
    configured
        && !no_color_flag
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}

/// Returns the painter for the chosen mode.
pub fn select(enabled: bool) -> Box<dyn Paint> {
    if enabled {
        Box::new(AnsiPaint)
    } else {
        Box::new(Plain)
    }
}
