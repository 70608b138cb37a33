//! # Cellblit
//!
//! Packed character-cell screen buffers for terminal applications.
//!
//! Every cell is 8 bytes: a 32-bit attribute word (256-color foreground and
//! background, style bits, transparency bits) followed by one UTF-8 character.
//! Buffers can be composited into each other, saved to disk, and blitted onto
//! a terminal with as few escape sequences as possible.
//!
//! ## Core Concepts
//!
//! - **Packed cells**: one contiguous allocation, no per-cell objects
//! - **Delta rendering**: a shadow of the last frame lets a blit skip unchanged cells
//! - **Batched output**: escapes are accumulated and handed to the sink in large chunks
//! - **Region iteration**: clipped copies, wrap-around and tiling share one engine
//!
//! ## Example
//!
//! ```rust,no_run
//! use cellblit::{AttrOptions, BlitOptions, FrameBuffer, Terminal};
//!
//! let mut sprite = FrameBuffer::from_text("/\\\n\\/", &AttrOptions::fg("cyan"), None, None);
//! let mut term = Terminal::stdout()?;
//! sprite.blit_to_terminal(&mut term, &BlitOptions::new().with_offset(4, 2).with_delta(true))?;
//! # Ok::<(), cellblit::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod layout;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{
    Attr, AttrFlags, AttrOptions, BlitOptions, BlitStats, Canvas, ColorSpec, FrameBuffer, Style,
};
pub use error::{Error, Result};
pub use layout::{IterMode, Rect, Transform};
pub use terminal::{Capabilities, ChannelSink, Sink, StdoutSink, Terminal};
