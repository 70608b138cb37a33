//! Layout module: Rectangles and the region iteration engine.
//!
//! Blits never walk buffers directly: they ask a [`Transform`] for the
//! clipped spans to visit, in one of three [`IterMode`]s.

mod iter;
mod rect;

pub use iter::{CellSpan, IterMode, LineSpan, Lines, Transform};
pub use rect::Rect;
