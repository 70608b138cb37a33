//! Buffer module: packed cell storage and everything built on it.
//!
//! This module contains:
//! - [`cell`] codec: the 8-byte cell layout, [`Attr`] words and their flags
//! - [`AttrOptions`]: loosely typed attribute input
//! - [`FrameBuffer`]: a grid of packed cells, addressed through [`Canvas`]
//! - Blitting onto terminals and other buffers ([`BlitOptions`])
//! - The `SB` file format

pub mod cell;
mod attr;
#[allow(clippy::module_inception)]
mod buffer;
mod blit;
mod canvas;
mod persist;

pub use attr::{AttrOptions, ColorSpec, FALLBACK_BG, FALLBACK_FG};
pub use blit::{BlitOptions, BlitStats};
pub use buffer::FrameBuffer;
pub use canvas::Canvas;
pub use cell::{Attr, AttrFlags, Style, ATTR_SIZE, BLANK_CELL, CHAR_SIZE, ITEM_SIZE};
pub use persist::{FORMAT_VERSION, MAGIC};
