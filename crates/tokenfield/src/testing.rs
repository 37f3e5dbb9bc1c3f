//! Shared fixtures for unit tests: a minimal bracket-aware token type and tokenizer.

use crate::state::{BufferState, SelectionRange};
use crate::token::{ScopeDirection, Token};

const OPENING: &str = "([{<";
const CLOSING: &str = ")]}>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TestTokenKind {
    Whitespace,
    Word,
    Bracket(ScopeDirection),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TestToken {
    pub(crate) text: String,
    pub(crate) kind: TestTokenKind,
}

impl Token for TestToken {
    fn text(&self) -> &str {
        &self.text
    }

    fn scope_direction(&self) -> Option<ScopeDirection> {
        match self.kind {
            TestTokenKind::Bracket(direction) => Some(direction),
            _ => None,
        }
    }

    fn scope_matches(&self, other: &Self) -> bool {
        let (TestTokenKind::Bracket(own), TestTokenKind::Bracket(their)) =
            (&self.kind, &other.kind)
        else {
            return false;
        };
        own != their
            && self
                .text
                .chars()
                .next()
                .and_then(partner_of)
                .is_some_and(|p| other.text == p.to_string())
    }

    fn is_symbol(&self) -> bool {
        self.kind == TestTokenKind::Word
    }

    fn is_same_symbol(&self, other: &Self) -> bool {
        self.kind == TestTokenKind::Word && other.kind == TestTokenKind::Word
            && self.text == other.text
    }
}

fn partner_of(bracket: char) -> Option<char> {
    OPENING
        .chars()
        .position(|c| c == bracket)
        .map(|i| CLOSING.as_bytes()[i] as char)
        .or_else(|| {
            CLOSING
                .chars()
                .position(|c| c == bracket)
                .map(|i| OPENING.as_bytes()[i] as char)
        })
}

/// Tokenize `text` the way a trivial host grammar would: identifier runs, individual
/// brackets, individual whitespace chars, individual other chars.
pub(crate) fn tokenize_chars(text: &str) -> Vec<TestToken> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            let mut word = String::new();
            while let Some(&w) = chars.peek() {
                if w.is_alphanumeric() || w == '_' {
                    word.push(w);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(TestToken {
                text: word,
                kind: TestTokenKind::Word,
            });
        } else {
            chars.next();
            let kind = if OPENING.contains(c) {
                TestTokenKind::Bracket(ScopeDirection::Opens)
            } else if CLOSING.contains(c) {
                TestTokenKind::Bracket(ScopeDirection::Closes)
            } else if c.is_whitespace() {
                TestTokenKind::Whitespace
            } else {
                TestTokenKind::Other
            };
            tokens.push(TestToken {
                text: c.to_string(),
                kind,
            });
        }
    }
    tokens
}

/// Build a validated snapshot with a collapsed caret at `caret`.
pub(crate) fn state_with_caret(text: &str, caret: usize) -> BufferState<TestToken> {
    BufferState::new(tokenize_chars(text), SelectionRange::caret(caret), None)
        .expect("test caret within bounds")
}

/// Build a validated snapshot with an explicit selection.
pub(crate) fn state_with_selection(text: &str, start: usize, end: usize) -> BufferState<TestToken> {
    BufferState::new(tokenize_chars(text), SelectionRange::new(start, end), None)
        .expect("test selection within bounds")
}
