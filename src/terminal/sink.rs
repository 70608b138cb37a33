//! Sinks: where rendered escape streams go.

use super::Capabilities;
use crossbeam_channel::Sender;
use crossterm::{execute, style::Print};
use std::io::{self, Stdout};

/// A destination for raw terminal output.
///
/// Implementations must pass the text through untouched: no markup parsing,
/// no newline translation.
pub trait Sink {
    /// Write a chunk of raw output.
    fn write_raw(&mut self, raw: &str) -> io::Result<()>;
}

impl Sink for String {
    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        self.push_str(raw);
        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        self.extend_from_slice(raw.as_bytes());
        Ok(())
    }
}

/// Discards everything.
impl Sink for io::Sink {
    fn write_raw(&mut self, _raw: &str) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        (**self).write_raw(raw)
    }
}

/// Sink writing straight to the process's standard output.
pub struct StdoutSink {
    stdout: Stdout,
}

impl StdoutSink {
    /// Create a sink on `stdout`.
    pub fn new() -> Self {
        Self { stdout: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        execute!(self.stdout, Print(raw))
    }
}

/// Sink forwarding each chunk to another thread over a channel.
///
/// The receiving side owns the real output handle, so a slow terminal never
/// stalls the thread that renders.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    /// Create a sink sending on `tx`.
    pub const fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl Sink for ChannelSink {
    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        self.tx
            .send(raw.to_owned())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "output channel disconnected"))
    }
}

/// A terminal destination: its size, its escape strings, and its sink.
pub struct Terminal<S> {
    width: u16,
    height: u16,
    caps: Capabilities,
    sink: S,
}

impl<S: Sink> Terminal<S> {
    /// Create a terminal of the given size with ANSI capabilities.
    pub fn new(width: u16, height: u16, sink: S) -> Self {
        Self::with_capabilities(width, height, Capabilities::ansi(), sink)
    }

    /// Create a terminal with an explicit capability table.
    pub const fn with_capabilities(width: u16, height: u16, caps: Capabilities, sink: S) -> Self {
        Self {
            width,
            height,
            caps,
            sink,
        }
    }

    /// Terminal width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// The escape table.
    #[inline]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// The sink.
    #[inline]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Borrow the capability table and the sink at once.
    #[inline]
    pub fn parts_mut(&mut self) -> (&Capabilities, &mut S) {
        (&self.caps, &mut self.sink)
    }
}

impl Terminal<StdoutSink> {
    /// Terminal on standard output, sized to the current window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window size cannot be queried.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new(width, height, StdoutSink::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_vec_sinks() {
        let mut s = String::new();
        s.write_raw("a\x1b[1mb").unwrap();
        assert_eq!(s, "a\x1b[1mb");

        let mut v: Vec<u8> = Vec::new();
        v.write_raw("日").unwrap();
        assert_eq!(v, "日".as_bytes());
    }

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);
        sink.write_raw("hello").unwrap();
        assert_eq!(rx.recv().unwrap(), "hello");

        drop(rx);
        let err = sink.write_raw("lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_terminal_parts() {
        let mut term = Terminal::new(80, 24, String::new());
        assert_eq!((term.width(), term.height()), (80, 24));

        let (caps, sink) = term.parts_mut();
        sink.write_raw(&caps.style_reset).unwrap();
        assert_eq!(term.sink(), "\x1b[0m");

        term.resize(100, 30);
        assert_eq!(term.width(), 100);
    }
}
