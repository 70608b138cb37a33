//! Cell: The packed 8-byte unit of display.
//!
//! # Memory Layout
//!
//! Every cell of a [`FrameBuffer`](super::FrameBuffer) is stored inline in
//! one contiguous byte vector. The same layout is used on disk.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Cell Layout (8 bytes)                                       │
//! ├──────────┬──────────┬──────────┬──────────┬──────────────────┤
//! │  byte 0  │  byte 1  │  byte 2  │  byte 3  │  bytes 4..8      │
//! │  flags   │  style   │  bg idx  │  fg idx  │  UTF-8 char      │
//! │  (24-31) │  (16-23) │  (8-15)  │  (0-7)   │  zero padded     │
//! └──────────┴──────────┴──────────┴──────────┴──────────────────┘
//! ```
//!
//! Bytes 0..4 hold the attribute word in big-endian order, so the
//! foreground index is the *last* attribute byte.

use bitflags::bitflags;

/// Size of the packed attribute word, in bytes.
pub const ATTR_SIZE: usize = 4;
/// Size of the character slot, in bytes.
pub const CHAR_SIZE: usize = 4;
/// Size of a whole cell, in bytes.
pub const ITEM_SIZE: usize = ATTR_SIZE + CHAR_SIZE;

/// Byte index (within a cell) of the flags byte.
pub(crate) const FLAGS_BYTE: usize = 0;
/// Byte index (within a cell) of the style byte.
pub(crate) const STYLE_BYTE: usize = 1;
/// Byte index (within a cell) of the background color byte.
pub(crate) const BG_BYTE: usize = 2;
/// Byte index (within a cell) of the foreground color byte.
pub(crate) const FG_BYTE: usize = 3;

/// The blank cell used to default-fill buffers: a space with [`Attr::DEFAULT`].
pub const BLANK_CELL: [u8; ITEM_SIZE] = [0, 0, 0, 7, b' ', 0, 0, 0];

bitflags! {
    /// Text style flags (bits 16-23 of the attribute word).
    ///
    /// # Example
    /// ```
    /// use cellblit::Style;
    /// let style = Style::BOLD | Style::ITALIC;
    /// assert!(style.contains(Style::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Inverse video (fg/bg swapped)
        const INVERSE = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKE = 0b1000_0000;

        /// Bold and dim share a single "normal intensity" reset.
        const BOLD_DIM = Self::BOLD.bits() | Self::DIM.bits();
    }
}

impl Style {
    /// Every style bit, in escape-sequence emission order.
    pub const ORDERED: [Self; 8] = [
        Self::BOLD,
        Self::DIM,
        Self::ITALIC,
        Self::UNDERLINE,
        Self::BLINK,
        Self::INVERSE,
        Self::HIDDEN,
        Self::STRIKE,
    ];
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Compositing flags (bits 24-31 of the attribute word).
    ///
    /// The low nibble controls per-channel transparency. The blending and
    /// full-width bits are reserved: they are stored and persisted but no
    /// rendering path interprets them.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u8 {
        /// Keep the destination's foreground color
        const FG_TRANSPARENCY = 0b0000_0001;
        /// Keep the destination's background color
        const BG_TRANSPARENCY = 0b0000_0010;
        /// Keep the destination's style flags
        const STYLE_TRANSPARENCY = 0b0000_0100;
        /// Keep the destination's character
        const CHAR_TRANSPARENCY = 0b0000_1000;
        /// Foreground blending (reserved)
        const FG_BLENDING = 0b0001_0000;
        /// Background blending (reserved)
        const BG_BLENDING = 0b0010_0000;
        /// Leading half of a full-width character (reserved)
        const LEADING_FULLWIDTH = 0b0100_0000;
        /// Trailing half of a full-width character (reserved)
        const TRAILING_FULLWIDTH = 0b1000_0000;

        /// All four transparency bits.
        const TRANSPARENCY = Self::FG_TRANSPARENCY.bits()
            | Self::BG_TRANSPARENCY.bits()
            | Self::STYLE_TRANSPARENCY.bits()
            | Self::CHAR_TRANSPARENCY.bits();
    }
}

impl std::fmt::Debug for AttrFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A packed 32-bit attribute word.
///
/// ```text
///  31        24 23        16 15         8 7          0
/// ┌────────────┬────────────┬────────────┬────────────┐
/// │   flags    │   style    │  bg index  │  fg index  │
/// └────────────┴────────────┴────────────┴────────────┘
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attr(u32);

impl Attr {
    /// White on black, no style, opaque.
    pub const DEFAULT: Self = Self::new(7, 0, Style::empty(), AttrFlags::empty());

    /// White on black, fully transparent.
    pub const CLEAR: Self = Self::new(7, 0, Style::empty(), AttrFlags::TRANSPARENCY);

    /// Pack an attribute word from its fields.
    #[inline]
    pub const fn new(fg: u8, bg: u8, style: Style, flags: AttrFlags) -> Self {
        Self((fg as u32) | ((bg as u32) << 8) | ((style.bits() as u32) << 16) | ((flags.bits() as u32) << 24))
    }

    /// Wrap a raw word as read from a buffer.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw word.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Foreground color index.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn fg(self) -> u8 {
        self.0 as u8
    }

    /// Background color index.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn bg(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Style flags.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn style(self) -> Style {
        Style::from_bits_retain((self.0 >> 16) as u8)
    }

    /// Compositing flags.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_retain((self.0 >> 24) as u8)
    }

    /// Only the four transparency bits of the flags byte.
    #[inline]
    pub const fn transparency(self) -> AttrFlags {
        self.flags().intersection(AttrFlags::TRANSPARENCY)
    }

    /// True when all four transparency bits are set.
    #[inline]
    pub const fn is_fully_transparent(self) -> bool {
        self.flags().contains(AttrFlags::TRANSPARENCY)
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: u8) -> Self {
        Self::new(fg, self.bg(), self.style(), self.flags())
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: u8) -> Self {
        Self::new(self.fg(), bg, self.style(), self.flags())
    }

    /// Set the style flags (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(self, style: Style) -> Self {
        Self::new(self.fg(), self.bg(), style, self.flags())
    }

    /// Add compositing flags (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_flags(self, flags: AttrFlags) -> Self {
        Self::new(self.fg(), self.bg(), self.style(), self.flags().union(flags))
    }
}

impl std::fmt::Debug for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attr")
            .field("fg", &self.fg())
            .field("bg", &self.bg())
            .field("style", &self.style())
            .field("flags", &self.flags())
            .finish()
    }
}

impl From<u32> for Attr {
    #[inline]
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Attr> for u32 {
    #[inline]
    fn from(attr: Attr) -> Self {
        attr.0
    }
}

/// Read the attribute word of the cell starting at `at`.
#[inline]
pub fn read_attr(bytes: &[u8], at: usize) -> Attr {
    let mut word = [0u8; ATTR_SIZE];
    word.copy_from_slice(&bytes[at..at + ATTR_SIZE]);
    Attr(u32::from_be_bytes(word))
}

/// Write the attribute word of the cell starting at `at`.
#[inline]
pub fn write_attr(bytes: &mut [u8], attr: Attr, at: usize) {
    bytes[at..at + ATTR_SIZE].copy_from_slice(&attr.0.to_be_bytes());
}

/// Declared UTF-8 sequence length for a lead byte, or `None` for a
/// continuation byte.
#[inline]
const fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0x80..=0xbf => None,
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        0xf8..=0xfb => Some(5),
        0xfc..=0xff => Some(6),
    }
}

/// Read the character of the cell starting at `at`.
///
/// Malformed slot contents never fail: a continuation lead byte, a legacy
/// 5/6-byte form, or an undecodable sequence all yield `'\0'`.
#[inline]
pub fn read_char(bytes: &[u8], at: usize) -> char {
    let slot = &bytes[at + ATTR_SIZE..at + ITEM_SIZE];

    let len = match utf8_sequence_len(slot[0]) {
        Some(len) if len <= CHAR_SIZE => len,
        _ => return '\0',
    };

    std::str::from_utf8(&slot[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or('\0')
}

/// Write `text` into the character slot of the cell starting at `at`.
///
/// Only whole characters that fit in the 4-byte slot are written; the rest
/// of the slot is zeroed. Returns the number of bytes written.
#[inline]
pub fn write_char(bytes: &mut [u8], text: &str, at: usize) -> usize {
    let slot = &mut bytes[at + ATTR_SIZE..at + ITEM_SIZE];
    let mut len = 0;

    for ch in text.chars() {
        let next = len + ch.len_utf8();
        if next > CHAR_SIZE {
            break;
        }
        ch.encode_utf8(&mut slot[len..next]);
        len = next;
    }

    slot[len..].fill(0);
    len
}
