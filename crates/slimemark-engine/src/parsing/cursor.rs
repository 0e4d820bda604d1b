/// A cursor over the lines of a document.
///
/// The lines themselves are never mutated; consuming a line only moves the
/// index forward. This lets the engine rewind when an extension declines a
/// block after looking ahead.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    i: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned at the first line.
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, i: 0 }
    }

    /// Splits `text` on `\n` and trims trailing whitespace from every line.
    pub fn split_lines(text: &str) -> Vec<String> {
        text.split('\n')
            .map(|line| line.trim_end().to_string())
            .collect()
    }

    /// Returns the line at the head without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.i).map(String::as_str)
    }

    /// Consumes and returns the head line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.i)?;
        self.i += 1;
        Some(line.as_str())
    }

    /// Consumes the head line while `pred` holds, returning the consumed lines.
    pub fn advance_while(&mut self, mut pred: impl FnMut(&str) -> bool) -> Vec<&'a str> {
        let mut taken = Vec::new();
        while let Some(line) = self.peek() {
            if !pred(line) {
                break;
            }
            self.i += 1;
            taken.push(line);
        }
        taken
    }

    /// Returns true once every line has been consumed.
    pub fn is_empty(&self) -> bool {
        self.i >= self.lines.len()
    }

    /// Index of the head line.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Number of lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.i)
    }

    /// Moves the head back to an earlier `position()`.
    pub fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.i, "rewind must not skip lines");
        self.i = position.min(self.lines.len());
    }
}
