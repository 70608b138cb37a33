//! Region iteration: walk source and destination cells under clipping.
//!
//! A [`Transform`] maps cells of a source rectangle onto a destination
//! rectangle. It yields [`LineSpan`]s (maximal runs of cells that are
//! contiguous in both source and destination) in top-to-bottom,
//! left-to-right destination order, or the individual [`CellSpan`]s of those
//! runs. Every span carries byte offsets into the row-major storage of both
//! sides, scaled by `item_size`.
//!
//! | Mode | Destination footprint | Source cell for destination `(x, y)` |
//! |------|-----------------------|--------------------------------------|
//! | [`IterMode::Region`] | source domain moved by the offset | `(x - ox, y - oy)` |
//! | [`IterMode::Wrap`] | source domain, unmoved | rotated by the offset, modulo the domain |
//! | [`IterMode::Tile`] | the whole destination clip | repeated, phase shifted by the offset |

use super::Rect;

/// How source cells cover the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterMode {
    /// Plain copy, placed at the offset.
    #[default]
    Region,
    /// Drawn in place; content pushed past one edge re-enters at the other.
    Wrap,
    /// Repeated to fill the destination.
    Tile,
}

/// Geometry of one source-to-destination mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    /// Full extent of the source storage.
    pub src_rect: Rect,
    /// Full extent of the destination storage.
    pub dst_rect: Rect,
    /// Optional restriction of the source (defaults to `src_rect`).
    pub src_clip: Option<Rect>,
    /// Optional restriction of the destination (defaults to `dst_rect`).
    pub dst_clip: Option<Rect>,
    /// Horizontal offset applied to source coordinates.
    pub offset_x: i32,
    /// Vertical offset applied to source coordinates.
    pub offset_y: i32,
    /// Bytes per cell, used to scale the byte offsets.
    pub item_size: usize,
}

/// A run of cells contiguous in both source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// First source byte.
    pub src_start: usize,
    /// One past the last source byte.
    pub src_end: usize,
    /// First destination byte.
    pub dst_start: usize,
    /// One past the last destination byte.
    pub dst_end: usize,
    /// Source column of the first cell.
    pub src_x: i32,
    /// Source row.
    pub src_y: i32,
    /// Destination column of the first cell.
    pub dst_x: i32,
    /// Destination row.
    pub dst_y: i32,
    /// Number of cells in the run.
    pub len: usize,
}

/// A single cell of a [`LineSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    /// First source byte.
    pub src_start: usize,
    /// One past the last source byte.
    pub src_end: usize,
    /// First destination byte.
    pub dst_start: usize,
    /// One past the last destination byte.
    pub dst_end: usize,
    /// Source column.
    pub src_x: i32,
    /// Source row.
    pub src_y: i32,
    /// Destination column.
    pub dst_x: i32,
    /// Destination row.
    pub dst_y: i32,
}

impl LineSpan {
    /// Split the run into its cells.
    pub fn cells(self, item_size: usize) -> impl Iterator<Item = CellSpan> {
        (0..self.len).map(move |i| {
            let shift = i * item_size;
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let step = i as i32;
            CellSpan {
                src_start: self.src_start + shift,
                src_end: self.src_start + shift + item_size,
                dst_start: self.dst_start + shift,
                dst_end: self.dst_start + shift + item_size,
                src_x: self.src_x + step,
                src_y: self.src_y,
                dst_x: self.dst_x + step,
                dst_y: self.dst_y,
            }
        })
    }
}

impl Transform {
    /// Create a transform between two full rectangles, with no clip or offset.
    pub const fn new(src_rect: Rect, dst_rect: Rect, item_size: usize) -> Self {
        Self {
            src_rect,
            dst_rect,
            src_clip: None,
            dst_clip: None,
            offset_x: 0,
            offset_y: 0,
            item_size,
        }
    }

    /// Source cells eligible for copying.
    fn src_domain(&self) -> Rect {
        self.src_clip.map_or(self.src_rect, |clip| clip.intersection(&self.src_rect))
    }

    /// Destination cells eligible for writing.
    fn dst_domain(&self) -> Rect {
        self.dst_clip.map_or(self.dst_rect, |clip| clip.intersection(&self.dst_rect))
    }

    /// Iterate maximal contiguous runs, in destination order.
    pub fn lines(&self, mode: IterMode) -> Lines {
        let src = self.src_domain();
        let dst = self.dst_domain();

        let area = if src.is_empty() {
            Rect::ZERO
        } else {
            match mode {
                IterMode::Region => dst.intersection(&src.translate(self.offset_x, self.offset_y)),
                IterMode::Wrap => dst.intersection(&src),
                IterMode::Tile => dst,
            }
        };

        Lines {
            transform: *self,
            mode,
            src,
            area,
            x: area.x,
            y: area.y,
        }
    }

    /// Iterate single cells, in destination order.
    pub fn cells(&self, mode: IterMode) -> impl Iterator<Item = CellSpan> {
        let item_size = self.item_size;
        self.lines(mode).flat_map(move |line| line.cells(item_size))
    }

    #[allow(clippy::cast_sign_loss)]
    fn byte_offset(rect: Rect, x: i32, y: i32, item_size: usize) -> usize {
        (((y - rect.y) as usize) * (rect.width as usize) + ((x - rect.x) as usize)) * item_size
    }
}

/// Iterator over the [`LineSpan`]s of a [`Transform`].
#[derive(Debug, Clone)]
pub struct Lines {
    transform: Transform,
    mode: IterMode,
    src: Rect,
    area: Rect,
    x: i32,
    y: i32,
}

impl Lines {
    /// Source coordinate for destination coordinate `d` along one axis.
    ///
    /// Computed in `i64` so that any `i32` offset is valid; the wrapped result
    /// lies in `[start, start + size)` and narrows back losslessly.
    #[allow(clippy::cast_possible_truncation)]
    fn map_axis(mode: IterMode, d: i32, offset: i32, start: i32, size: i32) -> i32 {
        let shifted = i64::from(d) - i64::from(offset);
        let mapped = match mode {
            IterMode::Region => shifted,
            IterMode::Wrap | IterMode::Tile => {
                i64::from(start) + (shifted - i64::from(start)).rem_euclid(i64::from(size))
            }
        };
        mapped as i32
    }
}

impl Iterator for Lines {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        if self.area.is_empty() {
            return None;
        }

        if self.x >= self.area.right() {
            self.x = self.area.x;
            self.y += 1;
        }
        if self.y >= self.area.bottom() {
            return None;
        }

        let tr = &self.transform;
        let src_x = Self::map_axis(self.mode, self.x, tr.offset_x, self.src.x, self.src.width);
        let src_y = Self::map_axis(self.mode, self.y, tr.offset_y, self.src.y, self.src.height);
        let run = (self.area.right() - self.x).min(self.src.right() - src_x);

        #[allow(clippy::cast_sign_loss)]
        let len = run as usize;
        let src_start = Transform::byte_offset(tr.src_rect, src_x, src_y, tr.item_size);
        let dst_start = Transform::byte_offset(tr.dst_rect, self.x, self.y, tr.item_size);

        let span = LineSpan {
            src_start,
            src_end: src_start + len * tr.item_size,
            dst_start,
            dst_end: dst_start + len * tr.item_size,
            src_x,
            src_y,
            dst_x: self.x,
            dst_y: self.y,
            len,
        };

        self.x += run;
        Some(span)
    }
}
