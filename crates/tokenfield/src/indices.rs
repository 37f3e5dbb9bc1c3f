//! Derived index tables over a token sequence.
//!
//! [`Indices::derive`] is a total, side-effect-free function of the token sequence: it
//! concatenates the buffer text, splits it into lines, and produces the offset/position
//! tables every other component consumes. All offsets are **character** offsets;
//! [`Indices::char_to_byte`] bridges back to byte offsets so algorithms can slice the
//! UTF-8 text without rescanning it.

use std::cmp::Ordering;
use std::ops::{Range, RangeInclusive};

use crate::token::Token;

/// Line/column coordinates in the buffer (both zero-based, in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column within the line, in characters.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Index tables derived from a token sequence.
///
/// Token-keyed tables are dense vectors indexed by [`TokenId`](crate::TokenId) index.
/// The tables are exactly as long as the text (plus the end-of-buffer sentinel where
/// noted), so out-of-range positions are not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indices {
    /// The buffer text: the concatenation of every token's text, in order.
    pub text: String,
    /// For each line, the absolute char offsets it contains. Every line holds at least
    /// one entry; the final line additionally carries a sentinel offset equal to the
    /// text length, so an empty final line is still addressable.
    pub line_offsets: Vec<Vec<usize>>,
    /// Column of the first non-whitespace character per line, `None` for blank lines.
    pub first_nonspace: Vec<Option<usize>>,
    /// Position of every char offset, plus one entry for the end-of-buffer position.
    pub positions: Vec<Position>,
    /// Byte offset of every char offset, plus one entry for the text's byte length.
    pub char_to_byte: Vec<usize>,
    /// Char-offset range of each token, in token order. Contiguous and gapless: the
    /// ranges partition `[0, char_len)`.
    pub token_offsets: Vec<Range<usize>>,
    /// Positions of each token's first and last character.
    pub token_positions: Vec<(Position, Position)>,
    /// Line span of each token.
    pub token_lines: Vec<RangeInclusive<usize>>,
}

impl Indices {
    /// Derive all index tables from `tokens`. Total for any token sequence, including
    /// the empty one.
    pub fn derive<T: Token>(tokens: &[T]) -> Self {
        let mut text = String::new();
        for token in tokens {
            text.push_str(token.text());
        }

        let mut positions = Vec::with_capacity(text.len() + 1);
        let mut char_to_byte = Vec::with_capacity(text.len() + 1);
        let mut line_offsets: Vec<Vec<usize>> = Vec::new();
        let mut first_nonspace: Vec<Option<usize>> = Vec::new();
        let mut current_line: Vec<usize> = Vec::new();
        let mut current_nonspace: Option<usize> = None;

        let mut line = 0;
        let mut column = 0;
        for (offset, (byte_offset, ch)) in text.char_indices().enumerate() {
            positions.push(Position::new(line, column));
            char_to_byte.push(byte_offset);
            current_line.push(offset);
            if current_nonspace.is_none() && !ch.is_whitespace() {
                current_nonspace = Some(column);
            }
            if ch == '\n' {
                line_offsets.push(std::mem::take(&mut current_line));
                first_nonspace.push(current_nonspace.take());
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        positions.push(Position::new(line, column));
        let char_len = positions.len() - 1;
        char_to_byte.push(text.len());
        current_line.push(char_len);
        line_offsets.push(current_line);
        first_nonspace.push(current_nonspace);

        let mut token_offsets = Vec::with_capacity(tokens.len());
        let mut token_positions = Vec::with_capacity(tokens.len());
        let mut token_lines = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for token in tokens {
            let start = offset;
            offset += token.text().chars().count();
            let first = positions[start];
            let last = if offset > start {
                positions[offset - 1]
            } else {
                first
            };
            token_offsets.push(start..offset);
            token_positions.push((first, last));
            token_lines.push(first.line..=last.line);
        }

        Self {
            text,
            line_offsets,
            first_nonspace,
            positions,
            char_to_byte,
            token_offsets,
            token_positions,
            token_lines,
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.positions.len() - 1
    }

    /// Number of lines, counting the trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Slice the text by char offsets.
    pub fn slice(&self, range: Range<usize>) -> &str {
        &self.text[self.char_to_byte[range.start]..self.char_to_byte[range.end]]
    }

    /// The character at char offset `offset`, if in bounds.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.char_len() {
            return None;
        }
        self.text[self.char_to_byte[offset]..].chars().next()
    }

    /// Absolute offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_offsets[line][0]
    }

    /// Absolute offset of the end of `line`'s content: its newline for every line but
    /// the last, the end-of-text sentinel for the last.
    pub fn line_end(&self, line: usize) -> usize {
        *self.line_offsets[line]
            .last()
            .expect("every line holds at least one offset")
    }

    /// Absolute offset of the first non-whitespace character of `line`, falling back to
    /// the line's content end for blank lines.
    pub fn line_indent_end(&self, line: usize) -> usize {
        match self.first_nonspace[line] {
            Some(column) => self.line_start(line) + column,
            None => self.line_end(line),
        }
    }
}
