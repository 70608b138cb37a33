//! Conversion between packed attribute words and structured options.
//!
//! [`AttrOptions`] is the loosely typed, user facing description of an
//! attribute set. It deserializes from JSON with camelCase keys:
//!
//! ```json
//! { "color": "brightRed", "bgColor": 17, "bold": true, "charTransparency": true }
//! ```
//!
//! Bad color input never fails: it falls back to white on black.

use super::cell::{Attr, AttrFlags, Style};
use crate::terminal::color_index;
use serde::{Deserialize, Deserializer, Serialize};

/// Foreground index used when the requested color is unusable.
pub const FALLBACK_FG: u8 = 7;
/// Background index used when the requested color is unusable.
pub const FALLBACK_BG: u8 = 0;

/// A color given either by palette index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette index; only 0-255 is usable.
    Index(i64),
    /// Color name, resolved with [`color_index`].
    Name(String),
}

impl ColorSpec {
    /// Resolve to a palette index, if the color is usable.
    pub fn resolve(&self) -> Option<u8> {
        match self {
            Self::Index(index) => u8::try_from(*index).ok(),
            Self::Name(name) => color_index(name),
        }
    }
}

impl From<u8> for ColorSpec {
    fn from(index: u8) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// Structured form of an attribute word.
///
/// Boolean fields are serialized only when set, so `Attr::to_options`
/// round-trips through JSON as a sparse object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttrOptions {
    /// Foreground color.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_color")]
    pub color: Option<ColorSpec>,
    /// Background color.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_color")]
    pub bg_color: Option<ColorSpec>,

    /// Bold text.
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Dim text.
    #[serde(skip_serializing_if = "is_false")]
    pub dim: bool,
    /// Italic text.
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Underlined text.
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Blinking text.
    #[serde(skip_serializing_if = "is_false")]
    pub blink: bool,
    /// Inverse video.
    #[serde(skip_serializing_if = "is_false")]
    pub inverse: bool,
    /// Hidden text.
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Strikethrough.
    #[serde(skip_serializing_if = "is_false")]
    pub strike: bool,

    /// Shorthand for all four transparency bits.
    #[serde(skip_serializing_if = "is_false")]
    pub transparency: bool,
    /// Foreground transparency.
    #[serde(skip_serializing_if = "is_false")]
    pub fg_transparency: bool,
    /// Background transparency.
    #[serde(skip_serializing_if = "is_false")]
    pub bg_transparency: bool,
    /// Style transparency.
    #[serde(skip_serializing_if = "is_false")]
    pub style_transparency: bool,
    /// Character transparency.
    #[serde(skip_serializing_if = "is_false")]
    pub char_transparency: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept any JSON value for a color; unusable values become `None`.
#[allow(clippy::cast_possible_truncation)]
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<ColorSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
            .map(ColorSpec::Index),
        serde_json::Value::String(name) => Some(ColorSpec::Name(name)),
        _ => None,
    })
}

impl AttrOptions {
    /// Options with a foreground color only.
    pub fn fg(color: impl Into<ColorSpec>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Set the background color (builder pattern).
    #[must_use]
    pub fn with_bg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Pack into an attribute word.
    pub fn to_attr(&self) -> Attr {
        Attr::from_options(self)
    }

    fn style(&self) -> Style {
        let mut style = Style::empty();
        style.set(Style::BOLD, self.bold);
        style.set(Style::DIM, self.dim);
        style.set(Style::ITALIC, self.italic);
        style.set(Style::UNDERLINE, self.underline);
        style.set(Style::BLINK, self.blink);
        style.set(Style::INVERSE, self.inverse);
        style.set(Style::HIDDEN, self.hidden);
        style.set(Style::STRIKE, self.strike);
        style
    }

    fn flags(&self) -> AttrFlags {
        let mut flags = AttrFlags::empty();
        if self.transparency {
            flags |= AttrFlags::TRANSPARENCY;
        }
        if self.fg_transparency {
            flags |= AttrFlags::FG_TRANSPARENCY;
        }
        if self.bg_transparency {
            flags |= AttrFlags::BG_TRANSPARENCY;
        }
        if self.style_transparency {
            flags |= AttrFlags::STYLE_TRANSPARENCY;
        }
        if self.char_transparency {
            flags |= AttrFlags::CHAR_TRANSPARENCY;
        }
        flags
    }
}

impl Attr {
    /// Pack options into an attribute word.
    ///
    /// Missing, unknown, or out-of-range colors fall back to
    /// [`FALLBACK_FG`] / [`FALLBACK_BG`].
    pub fn from_options(options: &AttrOptions) -> Self {
        let fg = options.color.as_ref().and_then(ColorSpec::resolve).unwrap_or(FALLBACK_FG);
        let bg = options.bg_color.as_ref().and_then(ColorSpec::resolve).unwrap_or(FALLBACK_BG);
        Self::new(fg, bg, options.style(), options.flags())
    }

    /// Unpack into options. Colors are always present; booleans are set only
    /// for bits that are set.
    pub fn to_options(self) -> AttrOptions {
        let style = self.style();
        let flags = self.flags();

        AttrOptions {
            color: Some(self.fg().into()),
            bg_color: Some(self.bg().into()),
            bold: style.contains(Style::BOLD),
            dim: style.contains(Style::DIM),
            italic: style.contains(Style::ITALIC),
            underline: style.contains(Style::UNDERLINE),
            blink: style.contains(Style::BLINK),
            inverse: style.contains(Style::INVERSE),
            hidden: style.contains(Style::HIDDEN),
            strike: style.contains(Style::STRIKE),
            transparency: flags.contains(AttrFlags::TRANSPARENCY),
            fg_transparency: flags.contains(AttrFlags::FG_TRANSPARENCY),
            bg_transparency: flags.contains(AttrFlags::BG_TRANSPARENCY),
            style_transparency: flags.contains(AttrFlags::STYLE_TRANSPARENCY),
            char_transparency: flags.contains(AttrFlags::CHAR_TRANSPARENCY),
        }
    }
}

impl From<&AttrOptions> for Attr {
    fn from(options: &AttrOptions) -> Self {
        Self::from_options(options)
    }
}

impl From<Attr> for AttrOptions {
    fn from(attr: Attr) -> Self {
        attr.to_options()
    }
}
