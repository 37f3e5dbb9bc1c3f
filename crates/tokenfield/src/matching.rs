//! Scope-delimiter pairing over a token sequence.
//!
//! A single left-to-right scan maintains a stack of not-yet-matched opening tokens. When
//! a closing token arrives, the stack is searched from the top down for the first opening
//! that accepts it; openings skipped over by that search are discarded as unmatched.
//! This recovery policy localizes damage: a corrupted pair never disturbs matching
//! outside its own span. Unmatched tokens are simply absent from the result, never an
//! error.

use std::collections::HashMap;

use crate::token::{ScopeDirection, Token, TokenId};

/// Matched scope-token pairs for one token sequence.
///
/// The map is symmetric: every matched opening maps to its closer and vice versa.
/// Enumeration follows token order, so callers can assign nesting depths or colors
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketMatches {
    entries: Vec<(TokenId, TokenId)>,
    map: HashMap<TokenId, TokenId>,
}

impl BracketMatches {
    /// The partner of `id`, if `id` is a matched scope token.
    pub fn partner(&self, id: TokenId) -> Option<TokenId> {
        self.map.get(&id).copied()
    }

    /// Whether `id` participates in a matched pair.
    pub fn contains(&self, id: TokenId) -> bool {
        self.map.contains_key(&id)
    }

    /// All matched scope tokens with their partners, in token order. Each pair appears
    /// twice: once keyed by its opening and once by its closing.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, TokenId)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of matched scope tokens (twice the number of pairs).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair was matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pair scope-opening and scope-closing tokens in `tokens`.
pub fn match_scopes<T: Token>(tokens: &[T]) -> BracketMatches {
    let mut map: HashMap<TokenId, TokenId> = HashMap::new();
    let mut stack: Vec<TokenId> = Vec::new();
    let mut order: Vec<TokenId> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let Some(direction) = token.scope_direction() else {
            continue;
        };
        let id = TokenId(index);
        order.push(id);
        match direction {
            ScopeDirection::Opens => stack.push(id),
            ScopeDirection::Closes => {
                let Some(found) = stack
                    .iter()
                    .rposition(|open| tokens[open.index()].scope_matches(token))
                else {
                    // No opening accepts this closer: leave it unmatched, stack intact.
                    continue;
                };
                let opening = stack[found];
                map.insert(opening, id);
                map.insert(id, opening);
                // Openings above the match are discarded as unmatched.
                stack.truncate(found);
            }
        }
    }

    let mut entries = Vec::with_capacity(map.len());
    for id in order {
        if let Some(&partner) = map.get(&id) {
            entries.push((id, partner));
        }
    }
    BracketMatches { entries, map }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tokenize_chars;

    fn pairs_of(text: &str) -> Vec<(usize, usize)> {
        let tokens = tokenize_chars(text);
        match_scopes(&tokens)
            .iter()
            .map(|(a, b)| (a.index(), b.index()))
            .collect()
    }

    #[test]
    fn nested_pairs_match_inside_out() {
        // "({})": ( at 0, { at 1, } at 2, ) at 3.
        assert_eq!(pairs_of("({})"), vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn unmatched_tokens_are_absent() {
        let tokens = tokenize_chars("(");
        let matches = match_scopes(&tokens);
        assert!(matches.is_empty());
        assert_eq!(matches.partner(TokenId(0)), None);
    }

    #[test]
    fn closer_matching_a_non_top_entry_discards_intervening_openings() {
        // "({)": the ) matches ( below the {, which is discarded unmatched.
        let tokens = tokenize_chars("({)");
        let matches = match_scopes(&tokens);
        assert_eq!(matches.partner(TokenId(0)), Some(TokenId(2)));
        assert_eq!(matches.partner(TokenId(1)), None);
    }

    #[test]
    fn unmatched_closer_leaves_the_stack_untouched() {
        // "(})": } matches nothing; ( still pairs with ).
        let tokens = tokenize_chars("(})");
        let matches = match_scopes(&tokens);
        assert_eq!(matches.partner(TokenId(0)), Some(TokenId(2)));
        assert_eq!(matches.partner(TokenId(1)), None);
    }

    #[test]
    fn corrupted_pair_does_not_leak_outside_its_span() {
        // "(a[b)c]d": ( and ) pair up; [ is discarded by the ) recovery; ] stays
        // unmatched. Well-formed text around the corruption is unaffected.
        let tokens = tokenize_chars("{x}(a[b)c]d{y}");
        let matches = match_scopes(&tokens);
        let id_of = |c: char| {
            TokenId(
                tokens
                    .iter()
                    .position(|t| crate::token::Token::text(t) == c.to_string())
                    .expect("token present"),
            )
        };
        assert_eq!(matches.partner(id_of('{')), Some(id_of('}')));
        assert_eq!(matches.partner(id_of('(')), Some(id_of(')')));
        assert_eq!(matches.partner(id_of('[')), None);
        assert_eq!(matches.partner(id_of(']')), None);
        // The trailing {y} pair, after the corruption, also matches.
        let trailing_open = TokenId(tokens.len() - 3);
        assert_eq!(matches.partner(trailing_open), Some(TokenId(tokens.len() - 1)));
    }

    #[test]
    fn malformed_interleaving_produces_only_valid_pairs() {
        // "{[}]": } matches { (discarding [), then ] finds nothing left.
        let tokens = tokenize_chars("{[}]");
        let matches = match_scopes(&tokens);
        assert_eq!(matches.partner(TokenId(0)), Some(TokenId(2)));
        assert_eq!(matches.partner(TokenId(1)), None);
        assert_eq!(matches.partner(TokenId(3)), None);
    }

    #[test]
    fn matching_is_idempotent() {
        let tokens = tokenize_chars("fn f() { [a] (b) }");
        assert_eq!(match_scopes(&tokens), match_scopes(&tokens));
    }

    #[test]
    fn enumeration_follows_token_order() {
        let tokens = tokenize_chars("()[]");
        let matches = match_scopes(&tokens);
        let order: Vec<usize> = matches.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
