use std::io::{self, Write};

/// Reçoit les lignes rendues, une par ligne balayée.
///
/// Implémenté par : `WriterSink` (stdout, fichiers), `Vec<String>` (tests).
///
/// # Example
/// ```
/// use mb_core::traits::LineSink;
///
/// let mut lines: Vec<String> = Vec::new();
/// lines.emit_line("  !!@").unwrap();
/// assert_eq!(lines, vec!["  !!@".to_string()]);
/// ```
pub trait LineSink {
    /// Emit one complete row. The terminator, if any, is the sink's concern.
    ///
    /// # Errors
    /// Returns an error if the underlying output fails.
    fn emit_line(&mut self, line: &str) -> io::Result<()>;

    /// Flush buffered output at the end of a pass.
    ///
    /// # Errors
    /// Returns an error if the underlying output fails.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LineSink for Vec<String> {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_owned());
        Ok(())
    }
}

/// Adapte un `io::Write` : chaque ligne est suivie de `\n`.
///
/// # Example
/// ```
/// use mb_core::traits::{LineSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.emit_line("ab").unwrap();
/// sink.emit_line("cd").unwrap();
/// assert_eq!(sink.into_inner(), b"ab\ncd\n");
/// ```
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Recover the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
