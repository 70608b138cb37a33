//! Error types for screen buffer operations.

use thiserror::Error;

/// Errors raised while loading, saving, or rendering a screen buffer.
///
/// File structure problems are always fatal to the load that found them.
/// Malformed cell contents are never reported here: they decode to a
/// placeholder instead.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with `SB\n`.
    #[error("magic number mismatch: this is not a screen buffer file")]
    MagicMismatch,

    /// No newline terminates the JSON header.
    #[error("no header found: this is not a screen buffer file")]
    MissingHeader,

    /// The header line is not a JSON object.
    #[error("no correct one-line JSON header found: {0}")]
    MalformedHeaderJson(#[source] serde_json::Error),

    /// A mandatory header field is absent.
    #[error("missing mandatory header field `{0}`: corrupted or obsolete screen buffer file")]
    MissingHeaderField(&'static str),

    /// The header declares a format version this crate cannot read.
    #[error("unsupported screen buffer file version {0}")]
    UnsupportedVersion(u64),

    /// Width or height is zero or does not fit in 16 bits.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// The requested width.
        width: u64,
        /// The requested height.
        height: u64,
    },

    /// The payload is not exactly `width * height` cells.
    #[error("bad file size: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        /// Length implied by the header.
        expected: u64,
        /// Actual file length.
        actual: u64,
    },
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
