//! Destinations for user-facing report output

use std::io::Write;

/// Append-only line sink for report output.
///
/// Every component that prints something for the user writes through a
/// sink handed to it explicitly, so tests can capture the output.
pub trait ReportSink {
    fn write_line(&mut self, text: &str);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn write_line(&mut self, text: &str) {
        (**self).write_line(text);
    }
}

/// Sink that writes each line to an [`std::io::Write`] handle.
///
/// Write failures are logged and otherwise ignored; losing report output
/// must not abort a conversion that is halfway applied.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            tracing::warn!(error = %e, "Failed to write report output");
        }
    }
}

/// Sink that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Captured output joined with newlines, one per line.
    pub fn contents(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

impl ReportSink for BufferSink {
    fn write_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("one");
        sink.write_line("");
        assert_eq!(sink.into_inner(), b"one\n\n");
    }

    #[test]
    fn test_buffer_sink_through_mut_ref() {
        fn greet(mut sink: impl ReportSink) {
            sink.write_line("hello");
        }

        let mut buffer = BufferSink::new();
        greet(&mut buffer);
        assert_eq!(buffer.lines(), ["hello".to_string()]);
        assert_eq!(buffer.contents(), "hello\n");
    }
}
