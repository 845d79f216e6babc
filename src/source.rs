use crate::lexer::Span;

pub type Offset = usize;
/// Zero-indexed line number.
pub type Line = usize;
/// Zero-indexed column, counted in utf8 codepoints.
pub type Col = usize;

/// An expression to parse, together with a name to report it by in errors.
#[derive(Debug, Clone)]
pub struct Source {
    filename: String,
    source: String,
    newline_positions: Vec<Offset>,
}

impl Source {
    /// Scan the source for newlines, so that line lookups don't need to rescan it.
    pub fn new(filename: &str, source: String) -> Source {
        let mut pos = 0;
        let mut newline_positions = vec![0];
        for ch in source.chars() {
            pos += ch.len_utf8();
            if ch == '\n' {
                newline_positions.push(pos);
            }
        }
        Source {
            filename: filename.to_owned(),
            source,
            newline_positions,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the substring of the source covered by `span`.
    pub fn substr(&self, span: Span) -> &str {
        &self.source[span.0..span.1]
    }

    /// The line and column of a byte offset.
    pub fn line_col(&self, offset: Offset) -> (Line, Col) {
        let line = match self.newline_positions.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let start = self.newline_positions[line];
        let col = self.source[start..offset].chars().count();
        (line, col)
    }

    /// Get the contents of the `line`th line, excluding the line terminator.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than `line` lines.
    pub fn line_contents(&self, line: Line) -> &str {
        let start = self.newline_positions[line];
        let end = match self.newline_positions.get(line + 1) {
            Some(end) => *end,
            None => self.source.len(),
        };
        self.source[start..end].trim_end_matches(['\n', '\r'])
    }
}
