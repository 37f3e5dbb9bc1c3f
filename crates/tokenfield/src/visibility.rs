//! Scope visibility: which lines must stay visible above a scrolled viewport.
//!
//! Given a candidate top line, [`pinned_lines`] returns the lines opening every scope
//! still open at that line, for "sticky header" rendering. Pinning N header lines itself
//! pushes the effective top line down by N, potentially exposing further open scopes, so
//! the resolver iterates to a fixed point. Termination is guaranteed: the open-scope set
//! is bounded by the scope-token count and must grow strictly for the loop to continue.

use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;

use crate::state::BufferState;
use crate::token::{ScopeDirection, Token, TokenId};
use crate::matching::BracketMatches;

/// Lines to pin above a viewport whose first visible line is `top_line`, mapping each
/// open scope to its opening token's own line span.
pub fn pinned_lines<T: Token>(
    top_line: usize,
    state: &BufferState<T>,
    matches: &BracketMatches,
) -> BTreeSet<usize> {
    pinned_lines_with(top_line, state, matches, |id| {
        Some(state.indices().token_lines[id.index()].clone())
    })
}

/// [`pinned_lines`] with a caller-supplied selector mapping each open scope-opening
/// token to the line range it pins, or `None` to pin nothing for it.
pub fn pinned_lines_with<T: Token>(
    top_line: usize,
    state: &BufferState<T>,
    matches: &BracketMatches,
    selector: impl Fn(TokenId) -> Option<RangeInclusive<usize>>,
) -> BTreeSet<usize> {
    let indices = state.indices();
    let tokens = state.tokens();

    let mut open: HashSet<TokenId> = HashSet::new();
    let mut top = top_line;
    let mut index = 0;
    loop {
        let old_size = open.len();
        let mut added_this_pass: Vec<TokenId> = Vec::new();
        while index < tokens.len() {
            // Only tokens fully above the candidate top line participate.
            if indices.token_positions[index].1.line >= top + 1 {
                break;
            }
            match tokens[index].scope_direction() {
                Some(ScopeDirection::Opens) => {
                    let id = TokenId(index);
                    if open.insert(id) {
                        added_this_pass.push(id);
                    }
                }
                Some(ScopeDirection::Closes) => {
                    // Closers whose opener is not in the set are skipped, keeping the
                    // scan resilient to mismatches outside the window.
                    if let Some(opening) = matches.partner(TokenId(index)) {
                        open.remove(&opening);
                    }
                }
                None => {}
            }
            index += 1;
        }
        if open.len() <= old_size {
            // The final pass did not stabilize the set: back its additions out.
            for id in added_this_pass {
                open.remove(&id);
            }
            break;
        }
        top += open.len() - old_size;
    }

    let mut lines = BTreeSet::new();
    for id in open {
        if let Some(range) = selector(id) {
            lines.extend(range);
        }
    }
    lines
}
