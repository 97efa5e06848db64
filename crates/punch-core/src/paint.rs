//! Semantic colors for terminal output.
//!
//! The core only names colors; how they are drawn is up to the caller.

/// Colors the report and status output can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Grey,
}

/// Applies a color to a piece of text.
pub trait Paint {
    fn paint(&self, color: Color, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Paint for Plain {
    fn paint(&self, _color: Color, text: &str) -> String {
        text.to_string()
    }
}
