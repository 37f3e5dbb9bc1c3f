//! Presentation side-tables over immutable snapshots.
//!
//! Tokens themselves never carry mutable presentation state; per-snapshot style
//! overrides live in a [`StyleOverlay`] keyed by token identity, which the renderer
//! merges over its base styles. The helpers below fill an overlay for the common
//! decorations: rainbow bracket pairs, the pair under the caret, and occurrences of the
//! symbol under the caret.

use std::collections::HashMap;

use crate::matching::BracketMatches;
use crate::state::BufferState;
use crate::token::{ScopeDirection, Token, TokenId};

/// Style overrides keyed by token identity, scoped to one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOverlay<S> {
    map: HashMap<TokenId, S>,
}

impl<S> StyleOverlay<S> {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Set the override for a token, replacing any previous one.
    pub fn set(&mut self, id: TokenId, style: S) {
        self.map.insert(id, style);
    }

    /// The override for a token, if any.
    pub fn get(&self, id: TokenId) -> Option<&S> {
        self.map.get(&id)
    }

    /// Iterate over all overrides in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &S)> {
        self.map.iter().map(|(id, style)| (*id, style))
    }

    /// Number of overridden tokens.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the overlay holds no overrides.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all overrides.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<S> Default for StyleOverlay<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens whose range contains the selection.
///
/// A collapsed caret on the boundary between two tokens belongs to both, so up to two
/// ids are returned for it; a non-collapsed selection yields the single token covering
/// it, if one does.
pub fn tokens_at_selection<T: Token>(state: &BufferState<T>) -> Vec<TokenId> {
    let selection = state.selection();
    let indices = state.indices();
    let mut found = Vec::new();
    for (index, range) in indices.token_offsets.iter().enumerate() {
        if range.start <= selection.min() && selection.max() <= range.end {
            found.push(TokenId(index));
        } else if !found.is_empty() {
            break;
        }
    }
    found
}

/// Visit every matched pair in enumeration order with its nesting depth and fill the
/// overlay from the styler's output, e.g. to color pairs by depth.
///
/// `styler` receives the entry index, the pair's nesting depth, and the opening and
/// closing ids, and returns the styles for opening and closing respectively.
pub fn style_matched_pairs<T: Token, S>(
    tokens: &[T],
    matches: &BracketMatches,
    overlay: &mut StyleOverlay<S>,
    mut styler: impl FnMut(usize, usize, TokenId, TokenId) -> (S, S),
) {
    let mut depth = 0usize;
    for (index, (id, partner)) in matches.iter().enumerate() {
        if tokens[id.index()].scope_direction() != Some(ScopeDirection::Opens) {
            depth = depth.saturating_sub(1);
            continue;
        }
        let (opening_style, closing_style) = styler(index, depth, id, partner);
        overlay.set(id, opening_style);
        overlay.set(partner, closing_style);
        depth += 1;
    }
}

/// Style the scope token(s) under the caret together with their partners.
pub fn style_pairs_at_selection<T: Token, S>(
    state: &BufferState<T>,
    matches: &BracketMatches,
    overlay: &mut StyleOverlay<S>,
    styler: impl Fn(TokenId) -> S,
) {
    for id in tokens_at_selection(state) {
        if state.tokens()[id.index()].scope_direction().is_none() {
            continue;
        }
        overlay.set(id, styler(id));
        if let Some(partner) = matches.partner(id) {
            overlay.set(partner, styler(partner));
        }
    }
}

/// Style every occurrence of the symbol under the caret.
///
/// Fires only when exactly one symbol token sits under the caret, so an ambiguous
/// boundary between two symbols highlights nothing.
pub fn style_same_symbols<T: Token, S>(
    state: &BufferState<T>,
    overlay: &mut StyleOverlay<S>,
    styler: impl Fn(TokenId) -> S,
) {
    let selected: Vec<TokenId> = tokens_at_selection(state)
        .into_iter()
        .filter(|id| state.tokens()[id.index()].is_symbol())
        .collect();
    let [anchor] = selected.as_slice() else {
        return;
    };
    let anchor_token = &state.tokens()[anchor.index()];
    for (index, token) in state.tokens().iter().enumerate() {
        if token.is_symbol() && anchor_token.is_same_symbol(token) {
            overlay.set(TokenId(index), styler(TokenId(index)));
        }
    }
}
