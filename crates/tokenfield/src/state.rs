//! Buffer snapshots and the raw edits that produce them.
//!
//! A [`BufferState`] is an immutable snapshot: a token sequence plus selection and
//! (optional) IME composition. Every accepted edit produces a fresh snapshot; derived
//! tables ([`Indices`], [`BracketMatches`]) are memoized per snapshot and never mutated.
//! Construction validates selection and composition bounds and fails fast on violations
//! instead of clamping, which would silently corrupt downstream offset remapping.

use std::sync::OnceLock;

use thiserror::Error;

use crate::indices::Indices;
use crate::matching::{self, BracketMatches};
use crate::token::{Token, TokenId};

/// A selection span in char offsets. Half-open and unordered: `start` may exceed `end`
/// (the caret sits at `end`); use [`min`](SelectionRange::min)/[`max`](SelectionRange::max)
/// for the normalized bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// Anchor offset.
    pub start: usize,
    /// Caret offset.
    pub end: usize,
}

impl SelectionRange {
    /// Create a selection from anchor to caret.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed selection (a caret).
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The lower bound of the span.
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// The upper bound of the span.
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Whether the selection is a caret.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.max() - self.min()
    }

    /// Whether the selection covers no characters.
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

/// The raw `(text, selection, composition)` triple an input surface delivers, and the
/// output type of preprocessors and auto-editing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdit {
    /// Full buffer text after the edit.
    pub text: String,
    /// Selection after the edit, in char offsets.
    pub selection: SelectionRange,
    /// IME pre-edit range, if a composition is in progress.
    pub composition: Option<SelectionRange>,
}

impl RawEdit {
    /// Create a raw edit without a composition.
    pub fn new(text: impl Into<String>, selection: SelectionRange) -> Self {
        Self {
            text: text.into(),
            selection,
            composition: None,
        }
    }

    /// Attach an IME composition range.
    pub fn with_composition(mut self, composition: SelectionRange) -> Self {
        self.composition = Some(composition);
        self
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Caller contract violations detected at snapshot construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// The selection range exceeds the buffer length.
    #[error("selection {start}..{end} exceeds buffer length {len}")]
    SelectionOutOfBounds {
        /// Selection anchor.
        start: usize,
        /// Selection caret.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
    /// The composition range exceeds the buffer length.
    #[error("composition {start}..{end} exceeds buffer length {len}")]
    CompositionOutOfBounds {
        /// Composition start.
        start: usize,
        /// Composition end.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

/// An immutable buffer snapshot: tokens, selection and composition.
///
/// Derived tables are computed on first use and cached for the lifetime of the snapshot;
/// cloning a snapshot clones whatever has been derived so far.
#[derive(Debug, Clone)]
pub struct BufferState<T: Token> {
    tokens: Vec<T>,
    selection: SelectionRange,
    composition: Option<SelectionRange>,
    indices: OnceLock<Indices>,
    matches: OnceLock<BracketMatches>,
}

impl<T: Token> BufferState<T> {
    /// Build a snapshot, validating that selection and composition address positions
    /// inside the derived position table.
    pub fn new(
        tokens: Vec<T>,
        selection: SelectionRange,
        composition: Option<SelectionRange>,
    ) -> Result<Self, StateError> {
        let len: usize = tokens.iter().map(|t| t.text().chars().count()).sum();
        if selection.max() > len {
            return Err(StateError::SelectionOutOfBounds {
                start: selection.start,
                end: selection.end,
                len,
            });
        }
        if let Some(composition) = composition {
            if composition.max() > len {
                return Err(StateError::CompositionOutOfBounds {
                    start: composition.start,
                    end: composition.end,
                    len,
                });
            }
        }
        Ok(Self {
            tokens,
            selection,
            composition,
            indices: OnceLock::new(),
            matches: OnceLock::new(),
        })
    }

    /// The empty buffer with a caret at offset zero.
    pub fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            selection: SelectionRange::caret(0),
            composition: None,
            indices: OnceLock::new(),
            matches: OnceLock::new(),
        }
    }

    /// The snapshot's tokens, in buffer order.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Look up a token by id.
    pub fn token(&self, id: TokenId) -> Option<&T> {
        self.tokens.get(id.index())
    }

    /// The current selection.
    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    /// The current IME composition, if any.
    pub fn composition(&self) -> Option<SelectionRange> {
        self.composition
    }

    /// Derived index tables, computed once per snapshot.
    pub fn indices(&self) -> &Indices {
        self.indices.get_or_init(|| Indices::derive(&self.tokens))
    }

    /// Matched scope pairs, computed once per snapshot.
    pub fn matches(&self) -> &BracketMatches {
        self.matches
            .get_or_init(|| matching::match_scopes(&self.tokens))
    }

    /// The buffer text.
    pub fn text(&self) -> &str {
        &self.indices().text
    }

    /// Buffer length in characters.
    pub fn char_len(&self) -> usize {
        self.indices().char_len()
    }

    /// The snapshot as a raw edit, e.g. to seed a transformation.
    pub fn to_raw_edit(&self) -> RawEdit {
        RawEdit {
            text: self.text().to_string(),
            selection: self.selection,
            composition: self.composition,
        }
    }
}

/// Remap a char offset through a span replacement: the text in `edit_start..edit_end`
/// was replaced by `inserted_len` characters.
///
/// Offsets at or after the edited span shift by the length delta; offsets at or before
/// its start stay fixed; offsets strictly inside collapse to the span's start. A caret
/// sitting exactly on a collapsed span counts as "after" and shifts.
pub fn remap_offset(offset: usize, edit_start: usize, edit_end: usize, inserted_len: usize) -> usize {
    if offset >= edit_end {
        offset - (edit_end - edit_start) + inserted_len
    } else if offset <= edit_start {
        offset
    } else {
        edit_start
    }
}
