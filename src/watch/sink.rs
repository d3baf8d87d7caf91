//! Output sinks for watch reports.

use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 8;

/// Receives one rendered report per tick.
pub trait OutputSink {
    fn emit(&mut self, report: &str) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        (**self).emit(report)
    }
}

/// Appends every report followed by a newline.
pub struct PlainSink<W: Write> {
    writer: W,
}

impl<W: Write> PlainSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for PlainSink<W> {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        writeln!(self.writer, "{report}")?;
        self.writer.flush()
    }
}

/// Redraws the previous report in place, so a terminal shows only the
/// latest one.
///
/// Lines longer than the terminal is wide wrap onto several rows; those rows
/// are counted so the redraw clears all of them.
pub struct LiveSink<W: Write> {
    writer: W,
    drawn_rows: usize,
    columns: Option<u16>,
}

impl<W: Write> LiveSink<W> {
    /// Sink that asks the terminal for its width before every redraw.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            drawn_rows: 0,
            columns: None,
        }
    }

    /// Use a fixed width instead of querying the terminal.
    #[must_use]
    pub const fn with_columns(mut self, columns: u16) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for LiveSink<W> {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        if self.drawn_rows > 0 {
            let up = u16::try_from(self.drawn_rows).unwrap_or(u16::MAX);
            queue!(self.writer, MoveToPreviousLine(up), Clear(ClearType::FromCursorDown))?;
        }
        writeln!(self.writer, "{report}")?;
        self.writer.flush()?;
        let columns = self
            .columns
            .or_else(|| terminal::size().ok().map(|(columns, _)| columns));
        self.drawn_rows = screen_rows(report, columns);
        Ok(())
    }
}

/// Terminal rows `report` occupies once printed. Without a known width every
/// line counts as one row.
fn screen_rows(report: &str, columns: Option<u16>) -> usize {
    report
        .split('\n')
        .map(|line| match columns {
            Some(columns) if columns > 0 => display_width(line)
                .div_ceil(usize::from(columns))
                .max(1),
            _ => 1,
        })
        .sum()
}

fn display_width(line: &str) -> usize {
    line.chars().fold(0, |col, c| match c {
        '\t' => (col / TAB_STOP + 1) * TAB_STOP,
        c => col + c.width().unwrap_or(0),
    })
}
