//! Capabilities: the precomputed escape strings a blit draws from.
//!
//! Strings are generated once with `crossterm` commands, so rendering only
//! concatenates table entries.

use crate::buffer::Style;
use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::Command;

/// Enable/disable codes for one style attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SgrPair {
    /// Sequence turning the attribute on.
    pub on: String,
    /// Sequence turning the attribute off.
    pub off: String,
}

impl SgrPair {
    fn new(on: Attribute, off: Attribute) -> Self {
        Self {
            on: ansi(SetAttribute(on)),
            off: ansi(SetAttribute(off)),
        }
    }
}

/// Escape strings for a 256-color terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Resets every attribute.
    pub style_reset: String,
    /// Foreground color codes, indexed by palette entry.
    pub fg256: Vec<String>,
    /// Background color codes, indexed by palette entry.
    pub bg256: Vec<String>,
    /// Bold. Its `off` code also clears dim.
    pub bold: SgrPair,
    /// Dim. Its `off` code also clears bold.
    pub dim: SgrPair,
    /// Italic.
    pub italic: SgrPair,
    /// Underline.
    pub underline: SgrPair,
    /// Blink.
    pub blink: SgrPair,
    /// Inverse video.
    pub inverse: SgrPair,
    /// Hidden.
    pub hidden: SgrPair,
    /// Strikethrough.
    pub strike: SgrPair,
    /// Whether the terminal can be sent attribute deltas instead of a full
    /// reset-and-set sequence on every change.
    pub delta_escape: bool,
}

/// Render a crossterm command to its ANSI string.
fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = command.write_ansi(&mut out);
    out
}

impl Capabilities {
    /// Standard ANSI/xterm sequences, with delta escapes enabled.
    pub fn ansi() -> Self {
        Self {
            style_reset: ansi(SetAttribute(Attribute::Reset)),
            fg256: (0..=255u8).map(|i| ansi(SetForegroundColor(Color::AnsiValue(i)))).collect(),
            bg256: (0..=255u8).map(|i| ansi(SetBackgroundColor(Color::AnsiValue(i)))).collect(),
            bold: SgrPair::new(Attribute::Bold, Attribute::NormalIntensity),
            dim: SgrPair::new(Attribute::Dim, Attribute::NormalIntensity),
            italic: SgrPair::new(Attribute::Italic, Attribute::NoItalic),
            underline: SgrPair::new(Attribute::Underlined, Attribute::NoUnderline),
            blink: SgrPair::new(Attribute::SlowBlink, Attribute::NoBlink),
            inverse: SgrPair::new(Attribute::Reverse, Attribute::NoReverse),
            hidden: SgrPair::new(Attribute::Hidden, Attribute::NoHidden),
            strike: SgrPair::new(Attribute::CrossedOut, Attribute::NotCrossedOut),
            delta_escape: true,
        }
    }

    /// Toggle delta escape support (builder pattern).
    #[must_use]
    pub fn with_delta_escape(mut self, enabled: bool) -> Self {
        self.delta_escape = enabled;
        self
    }

    /// Style flags paired with their codes, in emission order.
    pub fn styles(&self) -> [(Style, &SgrPair); 8] {
        [
            (Style::BOLD, &self.bold),
            (Style::DIM, &self.dim),
            (Style::ITALIC, &self.italic),
            (Style::UNDERLINE, &self.underline),
            (Style::BLINK, &self.blink),
            (Style::INVERSE, &self.inverse),
            (Style::HIDDEN, &self.hidden),
            (Style::STRIKE, &self.strike),
        ]
    }

    /// Append a cursor move to the 0-based cell `(x, y)`.
    #[inline]
    pub fn move_to(&self, x: u16, y: u16, out: &mut String) {
        // Writing into a String cannot fail
        let _ = MoveTo(x, y).write_ansi(out);
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ansi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_table() {
        let caps = Capabilities::ansi();
        assert_eq!(caps.style_reset, "\x1b[0m");
        assert_eq!(caps.fg256.len(), 256);
        assert_eq!(caps.fg256[196], "\x1b[38;5;196m");
        assert_eq!(caps.bg256[17], "\x1b[48;5;17m");
        assert_eq!(caps.bold.on, "\x1b[1m");
        assert_eq!(caps.bold.off, "\x1b[22m");
        assert_eq!(caps.dim.off, caps.bold.off);
        assert_eq!(caps.strike, SgrPair { on: "\x1b[9m".into(), off: "\x1b[29m".into() });
        assert!(caps.delta_escape);
    }

    #[test]
    fn test_move_to_is_one_based_on_the_wire() {
        let caps = Capabilities::ansi();
        let mut out = String::new();
        caps.move_to(10, 5, &mut out);
        assert_eq!(out, "\x1b[6;11H");
    }

    #[test]
    fn test_styles_follow_emission_order() {
        let caps = Capabilities::ansi();
        let flags: Vec<_> = caps.styles().iter().map(|(flag, _)| *flag).collect();
        assert_eq!(flags, Style::ORDERED);
        assert_eq!(caps.styles()[5].1.on, "\x1b[7m");
        assert_eq!(caps.styles()[6].1.off, "\x1b[28m");
    }

    #[test]
    fn test_without_delta() {
        assert!(!Capabilities::ansi().with_delta_escape(false).delta_escape);
    }
}
