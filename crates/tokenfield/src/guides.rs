//! Indentation guide markers for matched scope pairs.

use std::collections::HashSet;

use crate::indices::Position;
use crate::matching::BracketMatches;
use crate::state::BufferState;
use crate::token::{ScopeDirection, Token};

/// One guide marker per line strictly between a matched pair's lines.
///
/// The guide column is the minimum first-non-whitespace column across the opening
/// token's own line span. Lines indented deeper than that column are skipped; blank
/// lines and lines starting at or left of the column get a marker. Unmatched scope
/// tokens produce no guides. Markers are emitted pair by pair in match-enumeration
/// order, so nested pairs can contribute duplicate positions.
pub fn indentation_guides<T: Token>(
    state: &BufferState<T>,
    matches: &BracketMatches,
) -> Vec<Position> {
    let indices = state.indices();
    let tokens = state.tokens();
    let mut guides = Vec::new();

    for (opening, closing) in matches.iter() {
        if tokens[opening.index()].scope_direction() != Some(ScopeDirection::Opens) {
            continue;
        }
        let opening_lines = indices.token_lines[opening.index()].clone();
        let closing_lines = &indices.token_lines[closing.index()];
        let Some(column) = opening_lines
            .filter_map(|line| indices.first_nonspace[line])
            .min()
        else {
            continue;
        };
        let first = indices.token_lines[opening.index()].end() + 1;
        for line in first..*closing_lines.start() {
            match indices.first_nonspace[line] {
                Some(own) if own > column => {}
                _ => guides.push(Position::new(line, column)),
            }
        }
    }
    guides
}

/// [`indentation_guides`] with duplicates removed, preserving emission order.
pub fn indentation_guides_distinct<T: Token>(
    state: &BufferState<T>,
    matches: &BracketMatches,
) -> Vec<Position> {
    let mut seen = HashSet::new();
    indentation_guides(state, matches)
        .into_iter()
        .filter(|guide| seen.insert(*guide))
        .collect()
}
