//! `FrameBuffer`: A grid of packed cells.
//!
//! The buffer uses one contiguous byte allocation. Cells are stored in
//! row-major order, [`ITEM_SIZE`] bytes each.

use super::attr::AttrOptions;
use super::canvas::Canvas;
use super::cell::{read_attr, read_char, Attr, AttrFlags, BLANK_CELL, ITEM_SIZE};
use crate::error::{Error, Result};
use std::fmt::Write as _;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of packed cells, plus the shadow of its last delta render.
///
/// Storage length is always `width * height * ITEM_SIZE`.
///
/// # Shadow
///
/// Delta blits compare the buffer against a snapshot of what was last drawn.
/// The snapshot lives here, alongside a readiness flag: it only becomes
/// trustworthy after a delta blit has drawn the full frame it mirrors.
#[derive(Clone)]
pub struct FrameBuffer {
    /// Width in columns.
    pub(super) width: u16,
    /// Height in rows.
    pub(super) height: u16,
    /// Packed cell storage (row-major order).
    pub(super) bytes: Vec<u8>,
    /// Cursor hint: where the next `put` without coordinates lands.
    cursor_x: u16,
    cursor_y: u16,
    /// Snapshot of the cells as last rendered in delta mode.
    pub(super) shadow: Option<Vec<u8>>,
    /// Whether `shadow` matches what the terminal shows.
    pub(super) shadow_ready: bool,
}

impl FrameBuffer {
    /// Create a buffer with every cell blank (space with default colors).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_fill(width, height, true)
    }

    /// Create a buffer, default-filling it only if `fill` is set.
    ///
    /// Unfilled buffers are zeroed: every cell reads as `'\0'` in color 0 on 0.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn with_fill(width: u16, height: u16, fill: bool) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let mut buffer = Self::from_raw(width, height, vec![0; Self::byte_len(width, height)]);
        if fill {
            buffer.fill_raw(&BLANK_CELL);
        }
        buffer
    }

    /// Fallible form of [`FrameBuffer::new`].
    pub fn try_new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width: u64::from(width),
                height: u64::from(height),
            });
        }
        Ok(Self::new(width, height))
    }

    /// Wrap existing storage. The caller guarantees the length.
    pub(super) fn from_raw(width: u16, height: u16, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), Self::byte_len(width, height));
        Self {
            width,
            height,
            bytes,
            cursor_x: 0,
            cursor_y: 0,
            shadow: None,
            shadow_ready: false,
        }
    }

    /// Storage size of a `width` by `height` buffer.
    #[inline]
    pub const fn byte_len(width: u16, height: u16) -> usize {
        (width as usize) * (height as usize) * ITEM_SIZE
    }

    /// Build a sprite from text.
    ///
    /// Control characters other than `\n` are stripped, then the text is
    /// split into lines. The buffer is as wide as the longest line (in
    /// grapheme clusters) and as tall as the line count. Every grapheme is
    /// written with the attribute resolved from `attr`; graphemes equal to
    /// `transparency_char` get that attribute plus `transparency_flags`
    /// (restricted to the transparency bits), or full transparency when no
    /// usable flags are given. Cells past the end of a short line stay blank.
    pub fn from_text(
        text: &str,
        attr: &AttrOptions,
        transparency_char: Option<char>,
        transparency_flags: Option<AttrFlags>,
    ) -> Self {
        let cleaned: String = text.chars().filter(|c| *c == '\n' || !c.is_control()).collect();
        let lines: Vec<Vec<&str>> = cleaned
            .split('\n')
            .take(usize::from(u16::MAX))
            .map(|line| line.graphemes(true).collect())
            .collect();

        let longest = lines.iter().map(Vec::len).max().unwrap_or(0);
        let width = u16::try_from(longest.max(1)).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len().max(1)).unwrap_or(u16::MAX);

        let attr = Attr::from_options(attr);
        let transparent_attr = attr.with_flags(
            transparency_flags
                .map(|flags| flags & AttrFlags::TRANSPARENCY)
                .filter(|flags| !flags.is_empty())
                .unwrap_or(AttrFlags::TRANSPARENCY),
        );

        let mut buffer = Self::new(width, height);
        for (y, line) in (0..height).zip(&lines) {
            for (x, grapheme) in (0..width).zip(line) {
                let is_transparent = transparency_char
                    .is_some_and(|tc| grapheme.chars().eq(std::iter::once(tc)));
                let cell_attr = if is_transparent { transparent_attr } else { attr };
                buffer.write_cell(x, y, cell_attr, grapheme);
            }
        }

        buffer
    }

    /// Get the cursor hint.
    #[inline]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the cursor hint, clamped to the buffer.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor_x = x.min(self.width - 1);
        self.cursor_y = y.min(self.height - 1);
    }

    /// Write a run of text at (x, y), one grapheme per cell, clipped at the
    /// end of the row. The cursor hint moves past the last written cell.
    ///
    /// Returns the number of cells written.
    pub fn put(&mut self, x: u16, y: u16, attr: Attr, text: &str) -> usize {
        if y >= self.height {
            return 0;
        }

        let mut written = 0;
        for (col, grapheme) in (x..self.width).zip(text.graphemes(true)) {
            self.write_cell(col, y, attr, grapheme);
            written += 1;
        }

        if written > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let next = x.saturating_add(written as u16);
            self.set_cursor(next, y);
        }
        written
    }

    /// Resize the buffer, preserving the overlapping top-left content.
    ///
    /// New cells are blank. The shadow is discarded, so the next delta blit
    /// starts a fresh warm-up.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        assert!(new_width > 0 && new_height > 0, "Buffer dimensions must be non-zero");
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::new(new_width, new_height);
        let row_bytes = usize::from(self.width.min(new_width)) * ITEM_SIZE;
        for y in 0..self.height.min(new_height) {
            let old_start = usize::from(y) * usize::from(self.width) * ITEM_SIZE;
            let new_start = usize::from(y) * usize::from(new_width) * ITEM_SIZE;
            resized.bytes[new_start..new_start + row_bytes]
                .copy_from_slice(&self.bytes[old_start..old_start + row_bytes]);
        }

        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            to_width = new_width,
            to_height = new_height,
            "resized frame buffer"
        );

        self.bytes = resized.bytes;
        self.width = new_width;
        self.height = new_height;
        self.invalidate_shadow();
        self.set_cursor(self.cursor_x, self.cursor_y);
    }

    /// Drop the delta-render shadow.
    pub fn invalidate_shadow(&mut self) {
        if self.shadow.take().is_some() {
            tracing::trace!("shadow buffer discarded");
        }
        self.shadow_ready = false;
    }

    /// Whether a shadow snapshot exists.
    #[inline]
    pub const fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Whether the next delta blit will diff against the shadow.
    #[inline]
    pub const fn is_shadow_ready(&self) -> bool {
        self.shadow_ready
    }

    /// Hex dump: one text line per row; each cell prints its four attribute
    /// bytes and its character.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 2);
        for row in self.bytes.chunks_exact(usize::from(self.width) * ITEM_SIZE) {
            for at in (0..row.len()).step_by(ITEM_SIZE) {
                let _ = write!(
                    out,
                    "{:02x}{:02x}{:02x}{:02x} {} ",
                    row[at],
                    row[at + 1],
                    row[at + 2],
                    row[at + 3],
                    read_char(row, at)
                );
            }
            out.push('\n');
        }
        out
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        self.bytes.len() + self.shadow.as_ref().map_or(0, Vec::len) + std::mem::size_of::<Self>()
    }

    /// Attribute word of the cell at (x, y).
    #[inline]
    pub fn attr_at(&self, x: u16, y: u16) -> Option<Attr> {
        self.cell_offset(x, y).map(|at| read_attr(&self.bytes, at))
    }
}

impl Canvas for FrameBuffer {
    #[inline]
    fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &self.cursor())
            .field("shadow", &self.shadow.is_some())
            .field("shadow_ready", &self.shadow_ready)
            .finish_non_exhaustive()
    }
}
