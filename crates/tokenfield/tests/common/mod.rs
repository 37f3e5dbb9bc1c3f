//! Shared host-side fixtures: a minimal bracket-aware token type, tokenizer and
//! pipeline, built purely against the public API.

#![allow(dead_code)]

use tokenfield::{
    BufferState, EditPipeline, FnTokenizer, RawEdit, ScopeDirection, SelectionRange, Token,
    replace_tabs, standard_rules,
};
use tokenfield_lang::EditorConfig;

const OPENING: &str = "([{<";
const CLOSING: &str = ")]}>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    Word,
    Space,
    Bracket(ScopeDirection),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostToken {
    pub text: String,
    pub kind: HostKind,
}

impl Token for HostToken {
    fn text(&self) -> &str {
        &self.text
    }

    fn scope_direction(&self) -> Option<ScopeDirection> {
        match self.kind {
            HostKind::Bracket(direction) => Some(direction),
            _ => None,
        }
    }

    fn scope_matches(&self, other: &Self) -> bool {
        let (HostKind::Bracket(own), HostKind::Bracket(their)) = (&self.kind, &other.kind) else {
            return false;
        };
        if own == their {
            return false;
        }
        let (own_char, their_char) = match (self.text.chars().next(), other.text.chars().next()) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        partner_of(own_char) == Some(their_char)
    }

    fn is_symbol(&self) -> bool {
        self.kind == HostKind::Word
    }

    fn is_same_symbol(&self, other: &Self) -> bool {
        self.kind == HostKind::Word && other.kind == HostKind::Word && self.text == other.text
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

pub fn tokenize(text: &str) -> Vec<HostToken> {
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
            tokens.push(HostToken {
                text: word,
                kind: HostKind::Word,
            });
            continue;
        }
        chars.next();
        let kind = if OPENING.contains(c) {
            HostKind::Bracket(ScopeDirection::Opens)
        } else if CLOSING.contains(c) {
            HostKind::Bracket(ScopeDirection::Closes)
        } else if c.is_whitespace() {
            HostKind::Space
        } else {
            HostKind::Other
        };
        tokens.push(HostToken {
            text: c.to_string(),
            kind,
        });
    }
    tokens
}

pub fn state(text: &str, caret: usize) -> BufferState<HostToken> {
    BufferState::new(tokenize(text), SelectionRange::caret(caret), None).expect("valid fixture")
}

pub fn state_with_selection(text: &str, start: usize, end: usize) -> BufferState<HostToken> {
    BufferState::new(tokenize(text), SelectionRange::new(start, end), None).expect("valid fixture")
}

pub type HostPipeline = EditPipeline<HostToken, FnTokenizer<fn(&str) -> Vec<HostToken>>>;

pub fn pipeline() -> HostPipeline {
    let config = EditorConfig::default();
    EditPipeline::new(
        FnTokenizer(tokenize as fn(&str) -> Vec<HostToken>),
        standard_rules(&config),
    )
    .with_preprocessor(|edit| replace_tabs(edit, 4))
}

/// Simulate typing one character over the current selection, the way an input surface
/// would report it: old text with the selection replaced by `c`, caret after it.
pub fn type_char(state: &BufferState<HostToken>, c: char) -> RawEdit {
    let selection = state.selection();
    let text = state.text();
    let byte_min = char_to_byte(text, selection.min());
    let byte_max = char_to_byte(text, selection.max());
    let mut new_text = String::with_capacity(text.len() + c.len_utf8());
    new_text.push_str(&text[..byte_min]);
    new_text.push(c);
    new_text.push_str(&text[byte_max..]);
    RawEdit::new(new_text, SelectionRange::caret(selection.min() + 1))
}

/// Simulate a backspace press: erase the selection, or the char before a collapsed
/// caret.
pub fn press_backspace(state: &BufferState<HostToken>) -> RawEdit {
    let selection = state.selection();
    let (min, max) = if selection.is_collapsed() {
        (selection.min().saturating_sub(1), selection.max())
    } else {
        (selection.min(), selection.max())
    };
    let text = state.text();
    let byte_min = char_to_byte(text, min);
    let byte_max = char_to_byte(text, max);
    let mut new_text = String::with_capacity(text.len());
    new_text.push_str(&text[..byte_min]);
    new_text.push_str(&text[byte_max..]);
    RawEdit::new(new_text, SelectionRange::caret(min))
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
