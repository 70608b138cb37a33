//! Blitting: render a frame buffer onto a terminal or into another buffer.
//!
//! Terminal blits run in one of two modes:
//!
//! - **line mode**: every destination line is redrawn, with one cursor move
//!   per line.
//! - **cell mode**: only cells differing from the shadow (the snapshot of the
//!   last delta render) are drawn, moving the cursor only across gaps.
//!
//! Cell mode needs a trustworthy shadow. The first delta blit after a
//! non-delta blit, a resize, or a fresh buffer is a warm-up: it snapshots the
//! buffer, draws everything in line mode, then marks the shadow ready.

use super::buffer::FrameBuffer;
use super::cell::{
    read_attr, read_char, Attr, AttrFlags, ATTR_SIZE, BG_BYTE, FG_BYTE, FLAGS_BYTE, ITEM_SIZE,
    STYLE_BYTE,
};
use crate::error::Result;
use crate::layout::{IterMode, Rect, Transform};
use crate::terminal::{escape, Capabilities, OutputBuffer, Sink, Terminal};

/// Blit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitOptions {
    /// Restrict the source to this rectangle.
    pub src_clip: Option<Rect>,
    /// Restrict the destination to this rectangle.
    pub dst_clip: Option<Rect>,
    /// Horizontal displacement of the source on the destination.
    pub offset_x: i32,
    /// Vertical displacement of the source on the destination.
    pub offset_y: i32,
    /// How the source covers the destination.
    pub mode: IterMode,
    /// Draw only what changed since the last delta blit (terminal only).
    pub delta: bool,
    /// Composite transparent cells over the destination (buffer only).
    pub blending: bool,
}

impl BlitOptions {
    /// Default options: whole source at the origin, line mode, no blending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source clip (builder pattern).
    #[must_use]
    pub const fn with_src_clip(mut self, clip: Rect) -> Self {
        self.src_clip = Some(clip);
        self
    }

    /// Set the destination clip (builder pattern).
    #[must_use]
    pub const fn with_dst_clip(mut self, clip: Rect) -> Self {
        self.dst_clip = Some(clip);
        self
    }

    /// Set the offset (builder pattern).
    #[must_use]
    pub const fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the iteration mode (builder pattern).
    #[must_use]
    pub const fn with_mode(mut self, mode: IterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable delta rendering (builder pattern).
    #[must_use]
    pub const fn with_delta(mut self, delta: bool) -> Self {
        self.delta = delta;
        self
    }

    /// Enable or disable transparency blending (builder pattern).
    #[must_use]
    pub const fn with_blending(mut self, blending: bool) -> Self {
        self.blending = blending;
        self
    }

    fn transform(&self, src: Rect, dst: Rect) -> Transform {
        Transform {
            src_clip: self.src_clip,
            dst_clip: self.dst_clip,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            ..Transform::new(src, dst, ITEM_SIZE)
        }
    }
}

/// Counters describing one blit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlitStats {
    /// Cells drawn (terminal) or written (buffer).
    pub cells_touched: usize,
    /// Cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Attribute sequences emitted.
    pub attr_changes: usize,
    /// Chunks handed to the sink.
    pub sink_writes: usize,
}

/// Per-call rendering state.
struct RenderContext {
    out: OutputBuffer,
    last_attr: Option<Attr>,
    /// Where the terminal cursor sits after the last write.
    cursor: Option<(i32, i32)>,
    stats: BlitStats,
}

impl RenderContext {
    fn new() -> Self {
        Self {
            out: OutputBuffer::new(),
            last_attr: None,
            cursor: None,
            stats: BlitStats::default(),
        }
    }

    fn move_to(&mut self, caps: &Capabilities, x: i32, y: i32) {
        // Destination spans never leave the terminal rectangle
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (col, row) = (x as u16, y as u16);
        caps.move_to(col, row, self.out.text_mut());
        self.cursor = Some((x, y));
        self.stats.cursor_moves += 1;
    }

    /// Append the cell at `at`, preceded by an attribute sequence if needed.
    fn emit_cell(&mut self, caps: &Capabilities, bytes: &[u8], at: usize) {
        let attr = read_attr(bytes, at);
        if self.last_attr != Some(attr) {
            escape::transition(caps, attr, self.last_attr, self.out.text_mut());
            self.last_attr = Some(attr);
            self.stats.attr_changes += 1;
        }
        self.out.push(read_char(bytes, at));
        if let Some((x, y)) = self.cursor {
            self.cursor = Some((x + 1, y));
        }
    }

    fn flush_if_full<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.out.flush_if_full(sink)? {
            self.stats.sink_writes += 1;
        }
        Ok(())
    }

    fn finish<S: Sink + ?Sized>(mut self, sink: &mut S) -> Result<BlitStats> {
        if self.out.flush(sink)? {
            self.stats.sink_writes += 1;
        }
        Ok(self.stats)
    }
}

impl FrameBuffer {
    /// Render this buffer onto a terminal.
    ///
    /// With `opts.delta`, cells identical to the shadow are skipped once the
    /// shadow is ready; see the module docs for the warm-up. A non-delta blit
    /// clears shadow readiness.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. Output already handed over stays
    /// written, and the shadow is not marked ready.
    pub fn blit_to_terminal<S: Sink>(
        &mut self,
        term: &mut Terminal<S>,
        opts: &BlitOptions,
    ) -> Result<BlitStats> {
        let tr = opts.transform(
            Rect::from_size(self.width, self.height),
            Rect::from_size(term.width(), term.height()),
        );
        let (caps, sink) = term.parts_mut();

        let cell_mode = if opts.delta {
            self.prepare_shadow()
        } else {
            self.shadow_ready = false;
            false
        };

        let stats = if cell_mode {
            self.render_cells(&tr, opts.mode, caps, sink)?
        } else {
            self.render_lines(&tr, opts.mode, caps, sink)?
        };

        if opts.delta && !cell_mode {
            self.shadow_ready = true;
            tracing::trace!("shadow buffer ready");
        }

        tracing::debug!(
            mode = if cell_mode { "cell" } else { "line" },
            cells = stats.cells_touched,
            moves = stats.cursor_moves,
            attrs = stats.attr_changes,
            writes = stats.sink_writes,
            "blit to terminal"
        );
        Ok(stats)
    }

    /// Check the shadow before a delta blit.
    ///
    /// Returns `true` if it is ready for diffing. Otherwise it is refreshed
    /// to a copy of the current cells and `false` is returned.
    fn prepare_shadow(&mut self) -> bool {
        if self.shadow_ready && self.shadow.as_ref().is_some_and(|s| s.len() == self.bytes.len()) {
            return true;
        }

        match &mut self.shadow {
            Some(shadow) if shadow.len() == self.bytes.len() => shadow.copy_from_slice(&self.bytes),
            slot => *slot = Some(self.bytes.clone()),
        }
        self.shadow_ready = false;
        tracing::trace!(bytes = self.bytes.len(), "shadow buffer refreshed");
        false
    }

    fn render_lines<S: Sink + ?Sized>(
        &self,
        tr: &Transform,
        mode: IterMode,
        caps: &Capabilities,
        sink: &mut S,
    ) -> Result<BlitStats> {
        let mut ctx = RenderContext::new();

        for line in tr.lines(mode) {
            ctx.move_to(caps, line.dst_x, line.dst_y);
            for cell in line.cells(ITEM_SIZE) {
                ctx.emit_cell(caps, &self.bytes, cell.src_start);
            }
            ctx.stats.cells_touched += line.len;
            ctx.flush_if_full(sink)?;
        }

        ctx.finish(sink)
    }

    fn render_cells<S: Sink + ?Sized>(
        &mut self,
        tr: &Transform,
        mode: IterMode,
        caps: &Capabilities,
        sink: &mut S,
    ) -> Result<BlitStats> {
        let Self { bytes, shadow, .. } = self;
        let shadow = shadow.get_or_insert_with(|| bytes.clone());

        let mut ctx = RenderContext::new();
        // Tiling can visit a source cell more than once, so the shadow is
        // only updated after the pass.
        let mut changed = Vec::new();

        for cell in tr.cells(mode) {
            let range = cell.src_start..cell.src_end;
            if bytes[range.clone()] == shadow[range] {
                continue;
            }

            changed.push(cell.src_start);
            ctx.stats.cells_touched += 1;

            if ctx.cursor != Some((cell.dst_x, cell.dst_y)) {
                ctx.move_to(caps, cell.dst_x, cell.dst_y);
            }
            ctx.emit_cell(caps, bytes, cell.src_start);
            ctx.flush_if_full(sink)?;
        }

        for at in changed {
            shadow[at..at + ITEM_SIZE].copy_from_slice(&bytes[at..at + ITEM_SIZE]);
        }

        ctx.finish(sink)
    }

    /// Copy this buffer into another one.
    ///
    /// Without `opts.blending`, whole runs are copied verbatim. With it, each
    /// source cell is composited according to its transparency bits. The
    /// `delta` option does not apply here.
    pub fn blit_to_buffer(&self, dst: &mut Self, opts: &BlitOptions) -> BlitStats {
        let tr = opts.transform(
            Rect::from_size(self.width, self.height),
            Rect::from_size(dst.width, dst.height),
        );
        let mut stats = BlitStats::default();

        if opts.blending {
            for cell in tr.cells(opts.mode) {
                if blend_cell(&self.bytes, &mut dst.bytes, cell.src_start, cell.dst_start) {
                    stats.cells_touched += 1;
                }
            }
        } else {
            for line in tr.lines(opts.mode) {
                dst.bytes[line.dst_start..line.dst_end]
                    .copy_from_slice(&self.bytes[line.src_start..line.src_end]);
                stats.cells_touched += line.len;
            }
        }

        tracing::debug!(cells = stats.cells_touched, blending = opts.blending, "blit to buffer");
        stats
    }
}

/// Composite one source cell over one destination cell.
///
/// Opaque cells are copied whole and fully transparent ones are skipped.
/// Otherwise the foreground, background, style and character are each copied
/// unless their transparency bit is set; the destination keeps its own flags.
///
/// Returns whether anything was written.
fn blend_cell(src: &[u8], dst: &mut [u8], src_at: usize, dst_at: usize) -> bool {
    let transparency =
        AttrFlags::from_bits_truncate(src[src_at + FLAGS_BYTE]) & AttrFlags::TRANSPARENCY;

    if transparency.is_empty() {
        dst[dst_at..dst_at + ITEM_SIZE].copy_from_slice(&src[src_at..src_at + ITEM_SIZE]);
        return true;
    }
    if transparency == AttrFlags::TRANSPARENCY {
        return false;
    }

    let channels = [
        (AttrFlags::FG_TRANSPARENCY, FG_BYTE),
        (AttrFlags::BG_TRANSPARENCY, BG_BYTE),
        (AttrFlags::STYLE_TRANSPARENCY, STYLE_BYTE),
    ];
    for (flag, byte) in channels {
        if !transparency.contains(flag) {
            dst[dst_at + byte] = src[src_at + byte];
        }
    }
    if !transparency.contains(AttrFlags::CHAR_TRANSPARENCY) {
        dst[dst_at + ATTR_SIZE..dst_at + ITEM_SIZE]
            .copy_from_slice(&src[src_at + ATTR_SIZE..src_at + ITEM_SIZE]);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{AttrOptions, Canvas, Style};
    use crate::terminal::{ChannelSink, OUTPUT_THRESHOLD};
    use proptest::prelude::*;

    const RESET_WHITE: &str = "\x1b[0m\x1b[38;5;7m\x1b[48;5;0m";

    fn text(s: &str) -> FrameBuffer {
        FrameBuffer::from_text(s, &AttrOptions::default(), None, None)
    }

    fn term(width: u16, height: u16) -> Terminal<String> {
        Terminal::new(width, height, String::new())
    }

    fn delta() -> BlitOptions {
        BlitOptions::new().with_delta(true)
    }

    #[test]
    fn test_full_blit_output() {
        let mut buffer = text("ab\ncd");
        let mut term = term(10, 10);

        let stats = buffer.blit_to_terminal(&mut term, &BlitOptions::new()).unwrap();
        assert_eq!(
            stats,
            BlitStats {
                cells_touched: 4,
                cursor_moves: 2,
                attr_changes: 1,
                sink_writes: 1,
            }
        );
        assert_eq!(term.sink(), &format!("\x1b[1;1H{RESET_WHITE}ab\x1b[2;1Hcd"));
    }

    #[test]
    fn test_full_blit_offset_and_clip() {
        let mut buffer = text("abc\ndef");
        let mut term = term(4, 4);
        let opts = BlitOptions::new().with_offset(2, 3);

        let stats = buffer.blit_to_terminal(&mut term, &opts).unwrap();
        assert_eq!(stats.cells_touched, 2);
        assert_eq!(term.sink(), &format!("\x1b[4;3H{RESET_WHITE}ab"));
    }

    #[test]
    fn test_attr_change_mid_line() {
        let mut buffer = text("abc");
        buffer.write_cell(1, 0, Attr::DEFAULT.with_style(Style::BOLD), "B");
        let mut term = term(3, 1);

        let stats = buffer.blit_to_terminal(&mut term, &BlitOptions::new()).unwrap();
        assert_eq!(stats.attr_changes, 3);
        assert_eq!(term.sink(), &format!("\x1b[1;1H{RESET_WHITE}a\x1b[1mB\x1b[22mc"));
    }

    #[test]
    fn test_delta_warm_up_then_nothing() {
        let mut buffer = text("hello\nworld");
        let mut term = term(20, 5);

        let first = buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert_eq!(first.cells_touched, 10);
        assert_eq!(first.cursor_moves, 2);
        assert!(buffer.is_shadow_ready());

        let second = buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert_eq!(second, BlitStats::default());
    }

    #[test]
    fn test_delta_adjacent_cells_share_cursor_move() {
        let mut buffer = text("abcde");
        let mut term = term(5, 1);
        buffer.blit_to_terminal(&mut term, &delta()).unwrap();

        buffer.put(1, 0, Attr::DEFAULT, "xy");
        let mut term = Terminal::new(5, 1, String::new());
        let stats = buffer.blit_to_terminal(&mut term, &delta()).unwrap();

        assert_eq!(stats.cells_touched, 2);
        assert_eq!(stats.cursor_moves, 1);
        assert_eq!(term.sink(), &format!("\x1b[1;2H{RESET_WHITE}xy"));
    }

    #[test]
    fn test_delta_gap_moves_cursor() {
        let mut buffer = text("abcde");
        let mut term = term(5, 1);
        buffer.blit_to_terminal(&mut term, &delta()).unwrap();

        buffer.put(0, 0, Attr::DEFAULT, "x");
        buffer.put(4, 0, Attr::DEFAULT, "z");
        let stats = buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert_eq!(stats.cells_touched, 2);
        assert_eq!(stats.cursor_moves, 2);
    }

    #[test]
    fn test_non_delta_blit_resets_readiness() {
        let mut buffer = text("abc");
        let mut term = term(5, 1);

        buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert!(buffer.is_shadow_ready());

        buffer.blit_to_terminal(&mut term, &BlitOptions::new()).unwrap();
        assert!(!buffer.is_shadow_ready());

        // A changed cell after the full blit must not be missed: the next
        // delta blit is a warm-up drawing everything.
        buffer.put(0, 0, Attr::DEFAULT, "z");
        let stats = buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert_eq!(stats.cells_touched, 3);
        assert!(buffer.is_shadow_ready());
    }

    #[test]
    fn test_resize_forces_warm_up() {
        let mut buffer = text("abc");
        let mut term = term(10, 2);
        buffer.blit_to_terminal(&mut term, &delta()).unwrap();

        buffer.resize(4, 2);
        assert!(!buffer.has_shadow());

        let stats = buffer.blit_to_terminal(&mut term, &delta()).unwrap();
        assert_eq!(stats.cells_touched, 8);
        assert_eq!(stats.cursor_moves, 2);
        assert!(buffer.is_shadow_ready());
    }

    #[test]
    fn test_delta_tile_redraws_every_repeat() {
        let mut buffer = text("ab");
        let mut term = term(6, 1);
        let opts = delta().with_mode(IterMode::Tile);
        buffer.blit_to_terminal(&mut term, &opts).unwrap();

        buffer.put(0, 0, Attr::DEFAULT, "z");
        let mut term = Terminal::new(6, 1, String::new());
        let stats = buffer.blit_to_terminal(&mut term, &opts).unwrap();

        assert_eq!(stats.cells_touched, 3);
        assert_eq!(stats.cursor_moves, 3);
        assert_eq!(term.sink().matches('z').count(), 3);

        let stats = buffer.blit_to_terminal(&mut term, &opts).unwrap();
        assert_eq!(stats.cells_touched, 0);
    }

    #[test]
    fn test_large_blit_flushes_in_chunks() {
        let mut buffer = FrameBuffer::new(200, 50);
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut term = Terminal::new(200, 50, ChannelSink::new(tx));

        let stats = buffer.blit_to_terminal(&mut term, &BlitOptions::new()).unwrap();
        let chunks: Vec<String> = rx.try_iter().collect();

        assert!(stats.sink_writes > 1);
        assert_eq!(chunks.len(), stats.sink_writes);
        let (last, full) = chunks.split_last().unwrap();
        assert!(full.iter().all(|c| c.len() > OUTPUT_THRESHOLD));
        assert!(!last.is_empty());
        assert_eq!(chunks.concat().matches(' ').count(), 200 * 50);
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut buffer = text("abc");
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut term = Terminal::new(3, 1, ChannelSink::new(tx));

        assert!(buffer.blit_to_terminal(&mut term, &delta()).is_err());
        assert!(!buffer.is_shadow_ready());
    }

    fn screen(output: &[u8], width: u16, height: u16) -> vt100::Parser {
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(output);
        parser
    }

    fn assert_same_screen(a: &vt100::Parser, b: &vt100::Parser, width: u16, height: u16) {
        for row in 0..height {
            for col in 0..width {
                let (ca, cb) = (
                    a.screen().cell(row, col).unwrap(),
                    b.screen().cell(row, col).unwrap(),
                );
                assert_eq!(ca.contents(), cb.contents(), "contents at {col},{row}");
                assert_eq!(ca.fgcolor(), cb.fgcolor(), "fg at {col},{row}");
                assert_eq!(ca.bgcolor(), cb.bgcolor(), "bg at {col},{row}");
                assert_eq!(ca.bold(), cb.bold(), "bold at {col},{row}");
                assert_eq!(ca.italic(), cb.italic(), "italic at {col},{row}");
                assert_eq!(ca.underline(), cb.underline(), "underline at {col},{row}");
                assert_eq!(ca.inverse(), cb.inverse(), "inverse at {col},{row}");
            }
        }
    }

    #[test]
    fn test_delta_and_full_renders_reach_same_screen() {
        let (width, height) = (12, 4);
        let mut buffer = FrameBuffer::new(width, height);
        buffer.put(0, 0, Attr::new(2, 0, Style::BOLD, AttrFlags::empty()), "status: ok");
        buffer.put(0, 2, Attr::new(4, 1, Style::UNDERLINE, AttrFlags::empty()), "line two");

        let mut delta_term = Terminal::new(width, height, Vec::<u8>::new());
        buffer.blit_to_terminal(&mut delta_term, &delta()).unwrap();

        let frames: [(u16, u16, Attr, &str); 3] = [
            (8, 0, Attr::new(1, 0, Style::BOLD | Style::ITALIC, AttrFlags::empty()), "no"),
            (3, 2, Attr::new(4, 1, Style::DIM, AttrFlags::empty()), "XYZ"),
            (0, 3, Attr::new(7, 5, Style::INVERSE, AttrFlags::empty()), "tail row!"),
        ];
        for (x, y, attr, s) in frames {
            buffer.put(x, y, attr, s);
            buffer.blit_to_terminal(&mut delta_term, &delta()).unwrap();
        }

        let mut full_term = Terminal::new(width, height, Vec::<u8>::new());
        buffer.blit_to_terminal(&mut full_term, &BlitOptions::new()).unwrap();

        let by_delta = screen(delta_term.sink(), width, height);
        let by_full = screen(full_term.sink(), width, height);
        assert_same_screen(&by_delta, &by_full, width, height);
        assert_eq!(by_full.screen().cell(3, 0).unwrap().contents(), "t");
        assert!(by_full.screen().cell(3, 0).unwrap().inverse());
    }

    fn arb_cell() -> impl Strategy<Value = (u16, u16, u8, u8, u8, char)> {
        (0u16..6, 0u16..3, any::<u8>(), any::<u8>(), any::<u8>(), proptest::char::range('a', 'z'))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_delta_and_full_reach_same_screen(
            frames in proptest::collection::vec(proptest::collection::vec(arb_cell(), 0..10), 1..6),
            tile in any::<bool>(),
        ) {
            let (width, height) = (10, 5);
            let opts = if tile {
                BlitOptions::new().with_mode(IterMode::Tile).with_offset(1, 2)
            } else {
                BlitOptions::new().with_offset(2, 1)
            };

            let mut buffer = FrameBuffer::new(6, 3);
            let mut delta_term = Terminal::new(width, height, Vec::<u8>::new());
            let mut ch = [0u8; 4];

            for frame in frames {
                for (x, y, fg, bg, style, c) in frame {
                    let attr = Attr::new(fg, bg, Style::from_bits_retain(style), AttrFlags::empty());
                    buffer.write_cell(x, y, attr, c.encode_utf8(&mut ch));
                }
                buffer.blit_to_terminal(&mut delta_term, &opts.with_delta(true)).unwrap();
            }

            let mut full_term = Terminal::new(width, height, Vec::<u8>::new());
            buffer.blit_to_terminal(&mut full_term, &opts).unwrap();

            assert_same_screen(
                &screen(delta_term.sink(), width, height),
                &screen(full_term.sink(), width, height),
                width,
                height,
            );
        }
    }

    #[test]
    fn test_tile_extreme_offset() {
        let src = text("abc");
        let mut dst = FrameBuffer::new(6, 1);

        let opts = BlitOptions::new().with_mode(IterMode::Tile).with_offset(i32::MIN, 0);
        let stats = src.blit_to_buffer(&mut dst, &opts);
        assert_eq!(stats.cells_touched, 6);

        // 2^31 mod 3 == 2, so the first column shows the last source cell
        let row: String = (0..6).filter_map(|x| dst.read_cell(x, 0)).map(|c| c.1).collect();
        assert_eq!(row, "cabcab");
    }

    #[test]
    fn test_buffer_copy_region() {
        let src = text("ab\ncd");
        let mut dst = FrameBuffer::new(4, 4);

        let stats = src.blit_to_buffer(&mut dst, &BlitOptions::new().with_offset(1, 2));
        assert_eq!(stats.cells_touched, 4);
        assert_eq!(dst.read_cell(1, 2).map(|c| c.1), Some('a'));
        assert_eq!(dst.read_cell(2, 3).map(|c| c.1), Some('d'));
        assert_eq!(dst.read_cell(0, 2).map(|c| c.1), Some(' '));
    }

    #[test]
    fn test_buffer_copy_without_blending_is_verbatim() {
        let src = FrameBuffer::from_text("#", &AttrOptions::default(), Some('#'), None);
        let mut dst = text("x");

        src.blit_to_buffer(&mut dst, &BlitOptions::new());
        assert_eq!(dst.bytes(), src.bytes());
    }

    #[test]
    fn test_blending_fully_transparent_leaves_destination() {
        let mut src = FrameBuffer::new(2, 1);
        src.fill(Attr::CLEAR, "#");
        let mut dst = text("xy");
        let before = dst.bytes().to_vec();

        let stats = src.blit_to_buffer(&mut dst, &BlitOptions::new().with_blending(true));
        assert_eq!(stats.cells_touched, 0);
        assert_eq!(dst.bytes(), &before[..]);
    }

    #[test]
    fn test_blending_opaque_overwrites() {
        let mut src = FrameBuffer::new(2, 1);
        src.fill(Attr::new(3, 4, Style::BOLD, AttrFlags::FG_BLENDING), "o");
        let mut dst = text("xy");

        src.blit_to_buffer(&mut dst, &BlitOptions::new().with_blending(true));
        assert_eq!(dst.bytes(), src.bytes());
    }

    #[test]
    fn test_blending_partial_channels() {
        let mut src = FrameBuffer::new(1, 1);
        src.write_cell(
            0,
            0,
            Attr::new(3, 4, Style::ITALIC, AttrFlags::BG_TRANSPARENCY | AttrFlags::CHAR_TRANSPARENCY),
            "s",
        );
        let mut dst = FrameBuffer::new(1, 1);
        dst.write_cell(0, 0, Attr::new(1, 2, Style::BOLD, AttrFlags::empty()), "d");

        src.blit_to_buffer(&mut dst, &BlitOptions::new().with_blending(true));
        let (attr, ch) = dst.read_cell(0, 0).unwrap();
        assert_eq!(attr.fg(), 3);
        assert_eq!(attr.bg(), 2);
        assert_eq!(attr.style(), Style::ITALIC);
        assert_eq!(attr.flags(), AttrFlags::empty());
        assert_eq!(ch, 'd');
    }

    #[test]
    fn test_buffer_wrap() {
        let src = text("abc");
        let mut dst = FrameBuffer::new(3, 1);

        src.blit_to_buffer(&mut dst, &BlitOptions::new().with_mode(IterMode::Wrap).with_offset(1, 0));
        let row: String = (0..3).filter_map(|x| dst.read_cell(x, 0)).map(|c| c.1).collect();
        assert_eq!(row, "cab");
    }
}
