#![warn(missing_docs)]
//! `tokenfield-tokenize-simple` - simple segmentation tokenizer for `tokenfield`.
//!
//! This crate is intended for lightweight hosts (plain config formats, bracket-heavy
//! DSLs, tests) where a full grammar or language server is unnecessary. Text is split
//! into whitespace, word, bracket and miscellaneous tokens along Unicode word
//! boundaries; an optional set of regex rules then assigns style ids to word tokens
//! (keywords, numbers and the like). It is *not* intended to be a parser.

use regex::Regex;
use tokenfield::{ScopeDirection, Token, Tokenize};
use tokenfield_lang::EditorConfig;
use unicode_segmentation::UnicodeSegmentation;

/// Identifier of a host-defined style, assigned by classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub u32);

/// What a [`SimpleToken`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleTokenKind {
    /// A run of whitespace.
    Whitespace,
    /// A word: letters, digits, underscores.
    Word,
    /// A scope delimiter together with the partner text it pairs with.
    Bracket {
        /// Which side of the scope this delimiter sits on.
        direction: ScopeDirection,
        /// The exact text of the delimiter this one matches.
        partner: String,
    },
    /// Anything else.
    Other,
}

/// A token produced by [`SimpleTokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleToken {
    text: String,
    kind: SimpleTokenKind,
    style: Option<StyleId>,
}

impl SimpleToken {
    /// The token's kind.
    pub fn kind(&self) -> &SimpleTokenKind {
        &self.kind
    }

    /// The style assigned by classification rules, if any.
    pub fn style(&self) -> Option<StyleId> {
        self.style
    }
}

impl Token for SimpleToken {
    fn text(&self) -> &str {
        &self.text
    }

    fn is_whitespace(&self) -> bool {
        self.kind == SimpleTokenKind::Whitespace
    }

    fn scope_direction(&self) -> Option<ScopeDirection> {
        match &self.kind {
            SimpleTokenKind::Bracket { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    fn scope_matches(&self, other: &Self) -> bool {
        let SimpleTokenKind::Bracket { direction, partner } = &self.kind else {
            return false;
        };
        other.scope_direction().is_some_and(|d| d != *direction) && other.text == *partner
    }

    fn is_symbol(&self) -> bool {
        self.kind == SimpleTokenKind::Word
    }

    fn is_same_symbol(&self, other: &Self) -> bool {
        self.kind == SimpleTokenKind::Word
            && other.kind == SimpleTokenKind::Word
            && self.text == other.text
    }
}

/// A single classification rule: word tokens fully matching `regex` get `style`.
#[derive(Debug, Clone)]
pub struct ClassifyRule {
    regex: Regex,
    style: StyleId,
}

impl ClassifyRule {
    /// Compile a rule. The pattern is anchored to the whole token text.
    pub fn new(pattern: &str, style: StyleId) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("^(?:{pattern})$"))?,
            style,
        })
    }

    /// The style this rule assigns.
    pub fn style(&self) -> StyleId {
        self.style
    }
}

/// A simple word-boundary tokenizer with configurable bracket pairs.
///
/// Single-character delimiter pairs from the configuration become scope tokens;
/// multi-character pairs are ignored here (a grammar-aware tokenizer is the right tool
/// for those).
#[derive(Debug, Clone, Default)]
pub struct SimpleTokenizer {
    pairs: Vec<(char, char)>,
    rules: Vec<ClassifyRule>,
}

impl SimpleTokenizer {
    /// Create a tokenizer recognizing the configuration's single-char delimiter pairs.
    pub fn new(config: &EditorConfig) -> Self {
        let pairs = config
            .pairs
            .iter()
            .filter_map(|pair| Some((pair.opening_char()?, pair.closing_char()?)))
            .collect();
        Self {
            pairs,
            rules: Vec::new(),
        }
    }

    /// Attach classification rules, applied to word tokens in order; the first match
    /// wins.
    pub fn with_rules(mut self, rules: Vec<ClassifyRule>) -> Self {
        self.rules = rules;
        self
    }

    fn bracket_kind(&self, c: char) -> Option<SimpleTokenKind> {
        for &(opening, closing) in &self.pairs {
            if c == opening {
                return Some(SimpleTokenKind::Bracket {
                    direction: ScopeDirection::Opens,
                    partner: closing.to_string(),
                });
            }
            if c == closing {
                return Some(SimpleTokenKind::Bracket {
                    direction: ScopeDirection::Closes,
                    partner: opening.to_string(),
                });
            }
        }
        None
    }

    fn classify_word(&self, text: &str) -> Option<StyleId> {
        self.rules
            .iter()
            .find(|rule| rule.regex.is_match(text))
            .map(|rule| rule.style)
    }

    fn is_bracket_char(&self, c: char) -> bool {
        self.pairs.iter().any(|&(o, cl)| c == o || c == cl)
    }
}

impl Tokenize<SimpleToken> for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<SimpleToken> {
        let mut tokens = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.chars().any(|c| self.is_bracket_char(c)) {
                // Word segmentation can clump punctuation; brackets always stand alone.
                for c in segment.chars() {
                    let kind = self
                        .bracket_kind(c)
                        .unwrap_or(if c.is_whitespace() {
                            SimpleTokenKind::Whitespace
                        } else {
                            SimpleTokenKind::Other
                        });
                    tokens.push(SimpleToken {
                        text: c.to_string(),
                        kind,
                        style: None,
                    });
                }
            } else if segment.chars().all(char::is_whitespace) {
                tokens.push(SimpleToken {
                    text: segment.to_string(),
                    kind: SimpleTokenKind::Whitespace,
                    style: None,
                });
            } else if segment.chars().all(|c| c.is_alphanumeric() || c == '_') {
                tokens.push(SimpleToken {
                    text: segment.to_string(),
                    kind: SimpleTokenKind::Word,
                    style: self.classify_word(segment),
                });
            } else {
                tokens.push(SimpleToken {
                    text: segment.to_string(),
                    kind: SimpleTokenKind::Other,
                    style: None,
                });
            }
        }
        tokens
    }
}
