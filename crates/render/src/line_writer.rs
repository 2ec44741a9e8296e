//! Writes one line per tick to the output stream

use crate::markup::Markup;
use statline_core::Fragment;
use std::io::{self, Write};

/// Renders a tick's fragments as one line and flushes it immediately
pub struct LineWriter<W: Write> {
    out: W,
    markup: Markup,
    /// Reused between ticks to avoid reallocating
    line: String,
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W, markup: Markup) -> Self {
        Self {
            out,
            markup,
            line: String::with_capacity(256),
        }
    }

    /// Render `fragments` with a separator strictly between entries, terminate
    /// the line and flush.
    pub fn write_line(&mut self, fragments: &[Fragment]) -> io::Result<()> {
        self.line.clear();
        for (index, fragment) in fragments.iter().enumerate() {
            if index > 0 {
                self.markup.push_separator(&mut self.line);
            }
            self.markup.push_fragment(&mut self.line, fragment);
        }
        self.line.push('\n');

        self.out.write_all(self.line.as_bytes())?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
