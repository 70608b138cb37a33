//! `OutputBuffer`: Batching accumulator for escape sequences.

use super::Sink;
use std::io;

/// Amount of pending output, in bytes, above which a blit hands its
/// accumulated text to the sink.
pub const OUTPUT_THRESHOLD: usize = 10_000;

/// Pre-allocated buffer for building terminal output.
///
/// Output is accumulated here and handed to the sink in large chunks, which
/// saves CPU both in this process and in the terminal.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: String,
    threshold: usize,
}

impl OutputBuffer {
    /// Create an output buffer flushing above `threshold` bytes.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            data: String::with_capacity(threshold + 256),
            threshold,
        }
    }

    /// Create a buffer using [`OUTPUT_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_threshold(OUTPUT_THRESHOLD)
    }

    /// Get the pending text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Get the pending length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mutable access for escape generators that append in place.
    #[inline]
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.data
    }

    /// Append a string.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Append a character.
    #[inline]
    pub fn push(&mut self, ch: char) {
        self.data.push(ch);
    }

    /// Write pending text to `sink` if it has grown past the threshold.
    ///
    /// Returns whether a write happened.
    pub fn flush_if_full<S: Sink + ?Sized>(&mut self, sink: &mut S) -> io::Result<bool> {
        if self.data.len() > self.threshold {
            self.flush(sink)
        } else {
            Ok(false)
        }
    }

    /// Write any pending text to `sink` and clear the buffer.
    ///
    /// Returns whether a write happened.
    pub fn flush<S: Sink + ?Sized>(&mut self, sink: &mut S) -> io::Result<bool> {
        if self.data.is_empty() {
            return Ok(false);
        }
        tracing::trace!(bytes = self.data.len(), "flushing output to sink");
        sink.write_raw(&self.data)?;
        self.data.clear();
        Ok(true)
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_if_full_respects_threshold() {
        let mut out = OutputBuffer::with_threshold(4);
        let mut sink = String::new();

        out.push_str("abcd");
        assert!(!out.flush_if_full(&mut sink).unwrap());
        assert!(sink.is_empty());

        out.push('e');
        assert!(out.flush_if_full(&mut sink).unwrap());
        assert_eq!(sink, "abcde");
        assert!(out.is_empty());
    }

    #[test]
    fn test_flush_empty_is_noop() {
        let mut out = OutputBuffer::new();
        let mut sink: Vec<u8> = Vec::new();
        assert!(!out.flush(&mut sink).unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_flush_remainder() {
        let mut out = OutputBuffer::new();
        let mut sink = String::new();
        out.push_str("\x1b[H");
        out.text_mut().push('x');
        assert_eq!(out.as_str(), "\x1b[Hx");
        assert!(out.flush(&mut sink).unwrap());
        assert_eq!(sink, "\x1b[Hx");
    }
}
