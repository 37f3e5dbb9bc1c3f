#![warn(missing_docs)]
//! Token Field - Headless Engine for Structure-Aware Code Editing
//!
//! # Overview
//!
//! `tokenfield` is a headless editing engine for building code-editing widgets: given a
//! mutable character buffer, it tokenizes it through a pluggable tokenizer, matches
//! scope-delimiter pairs, derives line/column index tables, classifies raw edits, and
//! applies auto-editing transformations (bracket auto-close, indent-aware newlines,
//! indent removal). It also supplies the viewport math for scroll-into-view behavior and
//! "sticky" out-of-view scope headers. It does not involve the rendering process: the
//! upper layer paints tokens however it likes and passes glyph metrics in as plain data.
//!
//! # Core Features
//!
//! - **Token-Indexed Text Model**: the buffer is a token sequence; offset/position/line
//!   tables are derived per immutable snapshot and memoized
//! - **Scope Matching**: stack-based pairing that localizes damage from mismatches
//! - **Edit Classification**: conservative diffing of raw input-surface edits into
//!   insert/backspace/other
//! - **Auto-Editing Rules**: a composable, priority-ordered rule chain
//! - **Scope Visibility**: fixed-point "pinned lines" resolution for sticky headers
//! - **Viewport Geometry**: pure scroll-target and visibility math
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Edit Pipeline (preprocess/classify/rules)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Visibility, Guides, Decorations, Geometry  │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Bracket Matching                           │  ← Structure
//! ├─────────────────────────────────────────────┤
//! │  Derived Indices (offsets/positions/lines)  │  ← Coordinates
//! ├─────────────────────────────────────────────┤
//! │  Buffer Snapshots (tokens + selection)      │  ← Text Model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use tokenfield::{
//!     BufferState, EditPipeline, FnTokenizer, RawEdit, ScopeDirection, SelectionRange,
//!     Token, standard_rules,
//! };
//! use tokenfield_lang::EditorConfig;
//!
//! // A minimal host token: one char per token, parens open/close scopes.
//! #[derive(Clone)]
//! struct Ch(String);
//!
//! impl Token for Ch {
//!     fn text(&self) -> &str {
//!         &self.0
//!     }
//!     fn scope_direction(&self) -> Option<ScopeDirection> {
//!         match self.0.as_str() {
//!             "(" => Some(ScopeDirection::Opens),
//!             ")" => Some(ScopeDirection::Closes),
//!             _ => None,
//!         }
//!     }
//!     fn scope_matches(&self, other: &Self) -> bool {
//!         self.0 == "(" && other.0 == ")" || self.0 == ")" && other.0 == "("
//!     }
//! }
//!
//! let pipeline = EditPipeline::new(
//!     FnTokenizer(|text: &str| text.chars().map(|c| Ch(c.to_string())).collect()),
//!     standard_rules(&EditorConfig::default()),
//! );
//!
//! let state = pipeline
//!     .bootstrap(RawEdit::new("ab", SelectionRange::caret(1)))
//!     .unwrap();
//!
//! // The input surface reports "a(b"; the engine auto-closes the bracket.
//! let state = pipeline
//!     .apply(&state, RawEdit::new("a(b", SelectionRange::caret(2)))
//!     .unwrap();
//! assert_eq!(state.text(), "a()b");
//! assert_eq!(state.selection(), SelectionRange::caret(2));
//! ```
//!
//! # Module Description
//!
//! - [`token`] - token capability model
//! - [`state`] - immutable buffer snapshots and raw edits
//! - [`indices`] - derived offset/position/line tables
//! - [`matching`] - scope-delimiter pairing
//! - [`classify`] - edit-intent classification
//! - [`rules`] - auto-editing rule chain
//! - [`preprocess`] - raw-edit preprocessors (tab expansion)
//! - [`processing`] - the assembled edit pipeline
//! - [`visibility`] - pinned-lines resolution for sticky headers
//! - [`guides`] - indentation guide markers
//! - [`geometry`] - viewport scroll math
//! - [`decorations`] - style side-tables (bracket/symbol highlighting)
//! - [`indent`] - block indent/outdent
//!
//! # Concurrency
//!
//! Single-threaded and pull-based: every derived structure is a pure function of the
//! current snapshot, recomputed (or memoized) on demand. Snapshots are immutable and
//! exchanged by reference; "replace the state" is the only mutation a host performs.

pub mod classify;
pub mod decorations;
pub mod geometry;
pub mod guides;
pub mod indent;
pub mod indices;
pub mod matching;
pub mod preprocess;
pub mod processing;
pub mod rules;
pub mod state;
#[cfg(test)]
mod testing;
pub mod token;
pub mod visibility;

pub use classify::{CharEvent, classify};
pub use decorations::{
    StyleOverlay, style_matched_pairs, style_pairs_at_selection, style_same_symbols,
    tokens_at_selection,
};
pub use geometry::{
    CellSize, Insets, ScrollAdjustment, ScrollOffsets, ScrollThresholds, ViewportSize,
    is_position_visible, offset_for_line_on_top, pinned_header_height, scroll_target,
};
pub use guides::{indentation_guides, indentation_guides_distinct};
pub use indent::{indent_selection, outdent_selection};
pub use indices::{Indices, Position};
pub use matching::{BracketMatches, match_scopes};
pub use preprocess::{Preprocessor, replace_tabs};
pub use processing::{EditPipeline, FnTokenizer, Tokenize};
pub use rules::{
    BackspaceEmptyPair, BackspaceIndent, CloseBracket, EditRule, NewlineIndent, OpenBracket,
    ReuseClosingChar, RuleChain, standard_rules,
};
pub use state::{BufferState, RawEdit, SelectionRange, StateError, remap_offset};
pub use token::{ScopeDirection, Token, TokenId};
pub use visibility::{pinned_lines, pinned_lines_with};
