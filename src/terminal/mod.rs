//! Terminal module: everything between a rendered cell and the terminal.
//!
//! - [`Capabilities`]: precomputed escape strings
//! - [`escape`]: full and delta attribute transitions
//! - [`OutputBuffer`]: output batching
//! - [`Sink`] / [`Terminal`]: raw output destinations
//! - [`color_index`]: color names

mod caps;
mod color;
pub mod escape;
mod output;
mod sink;

pub use caps::{Capabilities, SgrPair};
pub use color::color_index;
pub use output::{OutputBuffer, OUTPUT_THRESHOLD};
pub use sink::{ChannelSink, Sink, StdoutSink, Terminal};
