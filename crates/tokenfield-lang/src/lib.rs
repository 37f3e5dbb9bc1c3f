#![warn(missing_docs)]
//! `tokenfield-lang` - data-driven editing configuration for `tokenfield`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any tokenizer or
//! rendering system. It provides small structs that hosts can use to configure the editing
//! engine in a language-aware way: which delimiter pairs auto-close, what one indentation
//! level looks like, and how much context scrolling keeps around the caret.
//!
//! Everything here is plain data with sensible defaults; enable the `serde` feature to
//! derive `Serialize`/`Deserialize` on all types.

/// A delimiter pair eligible for auto-pairing and auto-indentation.
///
/// `opening` and `closing` are the exact strings inserted into the buffer. Pairs whose
/// opening or closing text is longer than one character are still honored by the
/// backspace/empty-pair rules, but cannot be triggered by typing a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelimiterPair {
    /// Opening delimiter text (e.g. `(`, `{`).
    pub opening: String,
    /// Closing delimiter text (e.g. `)`, `}`).
    pub closing: String,
    /// Whether wrapping a multi-line selection in this pair re-indents the selected lines
    /// onto their own block (one extra indentation level, closer on its own line).
    pub reindent_selection: bool,
}

impl DelimiterPair {
    /// Create a pair that wraps selections inline, without re-indenting.
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
            reindent_selection: false,
        }
    }

    /// Create a pair that re-indents multi-line selections when wrapping them.
    pub fn reindenting(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
            reindent_selection: true,
        }
    }

    /// The opening delimiter as a single character, if it is one character long.
    pub fn opening_char(&self) -> Option<char> {
        single_char(&self.opening)
    }

    /// The closing delimiter as a single character, if it is one character long.
    pub fn closing_char(&self) -> Option<char> {
        single_char(&self.closing)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// How much context scrolling keeps visible around the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig {
    /// Characters to keep visible left/right of the target column.
    pub horizontal_threshold_chars: usize,
    /// Lines to keep visible above/below the target line.
    pub vertical_threshold_lines: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            horizontal_threshold_chars: 5,
            vertical_threshold_lines: 1,
        }
    }
}

/// Complete editing configuration consumed by `tokenfield`'s rule builder.
///
/// The default configuration auto-pairs `()`, `[]`, `{}` and `<>`, re-indents multi-line
/// selections for `{}` only, indents with four spaces, and expands tabs to four columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorConfig {
    /// Delimiter pairs handled by the auto-editing rules.
    pub pairs: Vec<DelimiterPair>,
    /// One level of indentation, as inserted verbatim.
    pub indent_unit: String,
    /// Number of columns a tab character expands to.
    pub tab_width: usize,
    /// Scroll margin configuration.
    pub scroll: ScrollConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pairs: vec![
                DelimiterPair::new("(", ")"),
                DelimiterPair::new("[", "]"),
                DelimiterPair::reindenting("{", "}"),
                DelimiterPair::new("<", ">"),
            ],
            indent_unit: "    ".to_string(),
            tab_width: 4,
            scroll: ScrollConfig::default(),
        }
    }
}

impl EditorConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the indentation unit.
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Replace the configured delimiter pairs.
    pub fn with_pairs(mut self, pairs: Vec<DelimiterPair>) -> Self {
        self.pairs = pairs;
        self
    }

    /// Look up the pair whose opening delimiter is `opening`.
    pub fn pair_for_opening(&self, opening: &str) -> Option<&DelimiterPair> {
        self.pairs.iter().find(|p| p.opening == opening)
    }
}
