//! Canvas: generic cell access over packed storage.

use super::cell::{read_attr, read_char, write_attr, write_char, Attr, ITEM_SIZE};

/// Read/write access to a grid of packed cells.
///
/// Implementors provide the dimensions and the raw row-major storage; the
/// provided methods handle addressing and the cell codec.
pub trait Canvas {
    /// Width in cells.
    fn width(&self) -> u16;

    /// Height in cells.
    fn height(&self) -> u16;

    /// Raw row-major cell storage.
    fn bytes(&self) -> &[u8];

    /// Mutable raw cell storage.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Byte offset of the cell at (x, y), or `None` if out of bounds.
    #[inline]
    fn cell_offset(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width() && y < self.height() {
            Some((usize::from(y) * usize::from(self.width()) + usize::from(x)) * ITEM_SIZE)
        } else {
            None
        }
    }

    /// Decode the cell at (x, y).
    #[inline]
    fn read_cell(&self, x: u16, y: u16) -> Option<(Attr, char)> {
        let at = self.cell_offset(x, y)?;
        let bytes = self.bytes();
        Some((read_attr(bytes, at), read_char(bytes, at)))
    }

    /// Encode a cell at (x, y). `text` is truncated to whole characters
    /// fitting 4 bytes.
    ///
    /// Returns `false` if out of bounds.
    #[inline]
    fn write_cell(&mut self, x: u16, y: u16, attr: Attr, text: &str) -> bool {
        let Some(at) = self.cell_offset(x, y) else {
            return false;
        };
        let bytes = self.bytes_mut();
        write_attr(bytes, attr, at);
        write_char(bytes, text, at);
        true
    }

    /// Set every cell to the same attribute and character.
    fn fill(&mut self, attr: Attr, text: &str) {
        let mut template = [0u8; ITEM_SIZE];
        write_attr(&mut template, attr, 0);
        write_char(&mut template, text, 0);
        self.fill_raw(&template);
    }

    /// Set every cell to a pre-encoded cell.
    fn fill_raw(&mut self, cell: &[u8; ITEM_SIZE]) {
        for chunk in self.bytes_mut().chunks_exact_mut(ITEM_SIZE) {
            chunk.copy_from_slice(cell);
        }
    }
}
