//! Persistence: the `SB` file format.
//!
//! ```text
//! SB\n
//! {"version":2,"width":W,"height":H}\n
//! <W * H * 8 bytes of cells>
//! ```

use super::buffer::FrameBuffer;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// File signature.
pub const MAGIC: &[u8; 3] = b"SB\n";

/// The only format version written and accepted.
pub const FORMAT_VERSION: u64 = 2;

impl FrameBuffer {
    /// Decode a buffer from its serialized form.
    ///
    /// # Errors
    ///
    /// Fails on a wrong signature, a missing or malformed header, an
    /// unsupported version, out-of-range dimensions, or a payload whose size
    /// does not match the dimensions.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let rest = data.strip_prefix(MAGIC.as_slice()).ok_or(Error::MagicMismatch)?;
        let eol = rest.iter().position(|b| *b == b'\n').ok_or(Error::MissingHeader)?;

        // Unknown keys are ignored
        let header: Map<String, Value> =
            serde_json::from_slice(&rest[..eol]).map_err(Error::MalformedHeaderJson)?;
        let field = |name: &'static str| {
            header.get(name).and_then(Value::as_u64).ok_or(Error::MissingHeaderField(name))
        };
        let version = field("version")?;
        let width = field("width")?;
        let height = field("height")?;

        if version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let (Some(w), Some(h)) = (dimension(width), dimension(height)) else {
            return Err(Error::InvalidDimensions { width, height });
        };

        let payload = &rest[eol + 1..];
        let expected = Self::byte_len(w, h);
        if payload.len() != expected {
            return Err(Error::SizeMismatch {
                expected: (MAGIC.len() + eol + 1 + expected) as u64,
                actual: data.len() as u64,
            });
        }

        Ok(Self::from_raw(w, h, payload.to_vec()))
    }

    /// Read a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or any error of
    /// [`FrameBuffer::from_bytes`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let buffer = Self::from_bytes(&std::fs::read(path)?)?;
        tracing::debug!(
            path = %path.display(),
            width = buffer.width,
            height = buffer.height,
            "loaded frame buffer"
        );
        Ok(buffer)
    }

    /// Encode the buffer: signature, header line, raw cells.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = format!(
            r#"{{"version":{FORMAT_VERSION},"width":{},"height":{}}}"#,
            self.width, self.height
        );

        let mut out = Vec::with_capacity(MAGIC.len() + header.len() + 1 + self.bytes.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(header.as_bytes());
        out.push(b'\n');
        out.extend_from_slice(&self.bytes);
        out
    }

    /// Write the buffer to a file, replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes())?;
        tracing::debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "saved frame buffer"
        );
        Ok(())
    }
}

fn dimension(value: u64) -> Option<u16> {
    u16::try_from(value).ok().filter(|v| *v > 0)
}
