//! Line collaborators.
//!
//! The codec never touches files or streams directly. A [`LineSupplier`]
//! hands it one physical line at a time and a [`LineSink`] accepts one fully
//! built line at a time. Both report failures through `std::io::Result`, so
//! I/O errors stay at this boundary instead of leaking into the codec.

use std::io::{self, BufRead, Write};

/// Produces physical lines, without their terminators.
pub trait LineSupplier {
    /// Returns the next line, or `None` at end of input.
    ///
    /// The returned slice borrows from the supplier and is valid until the
    /// next call.
    fn next_line(&mut self) -> io::Result<Option<&str>>;
}

/// Accepts complete lines.
pub trait LineSink {
    /// Writes `text` followed by a line terminator.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Pushes buffered lines to the underlying resource.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: LineSupplier + ?Sized> LineSupplier for &mut T {
    fn next_line(&mut self) -> io::Result<Option<&str>> {
        (**self).next_line()
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        (**self).write_line(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_terminator(buf: &mut String) {
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
}

/// A [`LineSupplier`] reading from any [`BufRead`], reusing a single buffer.
#[derive(Debug)]
pub struct BufReadLines<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> BufReadLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSupplier for BufReadLines<R> {
    fn next_line(&mut self) -> io::Result<Option<&str>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        trim_terminator(&mut self.buf);
        Ok(Some(&self.buf))
    }
}

/// A [`LineSupplier`] over an in-memory iterator of lines.
#[derive(Debug)]
pub struct IterLines<I> {
    iter: I,
    current: Option<String>,
}

impl<I: Iterator<Item = String>> IterLines<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(lines: T) -> Self {
        Self {
            iter: lines.into_iter(),
            current: None,
        }
    }
}

impl<I: Iterator<Item = String>> LineSupplier for IterLines<I> {
    fn next_line(&mut self) -> io::Result<Option<&str>> {
        self.current = self.iter.next();
        Ok(self.current.as_deref())
    }
}

/// A [`LineSink`] writing to any [`Write`], terminating each line with `\n`.
#[derive(Debug)]
pub struct WriteLines<W: Write> {
    writer: W,
}

impl<W: Write> WriteLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriteLines<W> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects lines in memory.
impl LineSink for Vec<String> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}
