//! Auto-editing transformation rules.
//!
//! Each rule is an independent, composable handler: given the classified event and the
//! previous snapshot, it either produces a rewritten raw edit or declines with `None`.
//! Rules never assume they run exclusively, so every one guards on its full
//! preconditions. A [`RuleChain`] applies rules in priority order and the first result
//! wins; when nothing fires, the caller falls back to the (preprocessed) raw edit.
//!
//! All rules remap selection and composition offsets through the edits they perform.
//! Replacements and removals go through [`remap_offset`]; the opening-bracket rule
//! instead tracks each insertion point individually so that the caret lands *between* a
//! freshly inserted pair.

use tokenfield_lang::EditorConfig;

use crate::classify::CharEvent;
use crate::matching::BracketMatches;
use crate::state::{BufferState, RawEdit, SelectionRange, remap_offset};
use crate::token::{ScopeDirection, Token, TokenId};

/// A single auto-editing transformation rule.
pub trait EditRule<T: Token> {
    /// Rewrite the edit, or decline with `None` when the preconditions do not hold.
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        matches: &BracketMatches,
    ) -> Option<RawEdit>;
}

/// An ordered chain of rules; the first rule producing a result wins.
pub struct RuleChain<T: Token> {
    rules: Vec<Box<dyn EditRule<T>>>,
}

impl<T: Token> RuleChain<T> {
    /// Build a chain from rules in priority order.
    pub fn new(rules: Vec<Box<dyn EditRule<T>>>) -> Self {
        Self { rules }
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: impl EditRule<T> + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Apply the chain.
    pub fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        matches: &BracketMatches,
    ) -> Option<RawEdit> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(event, state, matches))
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Token> Default for RuleChain<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

/// Reuse a closing character already present at the caret: typing it moves the caret
/// past the existing character instead of inserting a duplicate.
pub struct ReuseClosingChar {
    chars: String,
}

impl ReuseClosingChar {
    /// `chars` is the set of characters eligible for reuse (typically all closers).
    pub fn new(chars: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
        }
    }
}

impl<T: Token> EditRule<T> for ReuseClosingChar {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        _matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Insert(c) = *event else {
            return None;
        };
        if !self.chars.contains(c) {
            return None;
        }
        let selection = state.selection();
        if !selection.is_collapsed() {
            return None;
        }
        let indices = state.indices();
        if indices.char_at(selection.start) != Some(c) {
            return None;
        }
        Some(RawEdit {
            text: indices.text.clone(),
            selection: SelectionRange::new(selection.start + 1, selection.end + 1),
            composition: state.composition(),
        })
    }
}

/// Insert an opening delimiter together with its closer around the selection.
///
/// With [`reindent_selection`](OpenBracket::reindent_selection) enabled, wrapping a
/// multi-line selection instead produces a block: opener, newline, the selected lines
/// indented one extra level (preserving relative indentation), and the closer on its own
/// line at the first selected line's original indentation.
pub struct OpenBracket {
    opening_char: char,
    opening: String,
    closing: String,
    indent: Option<String>,
    reindent_selection: bool,
}

impl OpenBracket {
    /// Create the rule for one delimiter pair, triggered by typing `opening_char`.
    pub fn new(opening_char: char, opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening_char,
            opening: opening.into(),
            closing: closing.into(),
            indent: Some("    ".to_string()),
            reindent_selection: false,
        }
    }

    /// Replace the indentation unit used when re-indenting a wrapped selection.
    /// `None` disables re-indentation entirely.
    pub fn indent_unit(mut self, indent: Option<String>) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable multi-line re-indentation.
    pub fn reindent_selection(mut self, reindent: bool) -> Self {
        self.reindent_selection = reindent;
        self
    }
}

impl<T: Token> EditRule<T> for OpenBracket {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        _matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Insert(c) = *event else {
            return None;
        };
        if c != self.opening_char {
            return None;
        }
        let indices = state.indices();
        let selection = state.selection();
        let min = selection.min();
        let max = selection.max();
        let min_line = indices.positions[min].line;
        let max_line = indices.positions[max].line;

        let reindent = self.reindent_selection && !selection.is_collapsed();
        let (opening, closing) = if reindent {
            let lead = indices.slice(indices.line_start(min_line)..indices.line_indent_end(min_line));
            (
                format!("{}\n{lead}{}", self.opening, self.indent.as_deref().unwrap_or("")),
                format!("\n{lead}{}", self.closing),
            )
        } else {
            (self.opening.clone(), self.closing.clone())
        };

        // Every insertion is recorded as (old offset, inserted chars); offsets at or
        // after an insertion point shift by its length.
        let mut inserts: Vec<(usize, usize)> = Vec::new();
        let mut out = String::with_capacity(indices.text.len() + opening.len() + closing.len());

        out.push_str(indices.slice(0..min));
        out.push_str(&opening);
        inserts.push((min, opening.chars().count()));

        if !selection.is_collapsed() {
            match (&self.indent, reindent && min_line != max_line) {
                (Some(indent), true) => {
                    let first_line_end = indices.line_end(min_line);
                    out.push_str(indices.slice(min..first_line_end));
                    out.push('\n');
                    for line in (min_line + 1)..=max_line {
                        let line_start = indices.line_start(line);
                        let line_end = indices.line_end(line).min(max);
                        let nonspace = indices.line_indent_end(line).min(line_end);
                        out.push_str(indices.slice(line_start..nonspace));
                        out.push_str(indent);
                        inserts.push((nonspace, indent.chars().count()));
                        out.push_str(indices.slice(nonspace..line_end));
                        if line < max_line {
                            out.push('\n');
                        }
                    }
                }
                _ => out.push_str(indices.slice(min..max)),
            }
        }

        out.push_str(&closing);
        inserts.push((max + 1, closing.chars().count()));
        out.push_str(indices.slice(max..indices.char_len()));

        let shift = |offset: usize| -> usize {
            offset
                + inserts
                    .iter()
                    .filter(|&&(at, _)| offset >= at)
                    .map(|&(_, len)| len)
                    .sum::<usize>()
        };
        Some(RawEdit {
            text: out,
            selection: SelectionRange::new(shift(selection.start), shift(selection.end)),
            composition: state
                .composition()
                .map(|r| SelectionRange::new(shift(r.start), shift(r.end))),
        })
    }
}

/// Dedent-to-match on typing a closing delimiter at the start of a line.
///
/// When the caret sits at or before the line's first non-whitespace column, the line's
/// indentation is replaced with the indentation of the line holding the nearest
/// qualifying opening token, and the closer is appended after it.
pub struct CloseBracket {
    opening: String,
    closing_char: char,
    closing: String,
}

impl CloseBracket {
    /// Create the rule for one delimiter pair, triggered by typing `closing_char`.
    pub fn new(opening: impl Into<String>, closing_char: char, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing_char,
            closing: closing.into(),
        }
    }
}

impl<T: Token> EditRule<T> for CloseBracket {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Insert(c) = *event else {
            return None;
        };
        if c != self.closing_char {
            return None;
        }
        let indices = state.indices();
        let selection = state.selection();
        let position = indices.positions[selection.min()];
        let caret_line = position.line;
        if let Some(column) = indices.first_nonspace[caret_line] {
            if position.column > column {
                return None;
            }
        }
        let old_start = indices.line_start(caret_line);
        let old_finish = indices.line_indent_end(caret_line);

        // Nearest opening of this kind that ends before the caret and whose closer, if
        // any, still lies at or after the selection.
        let opening_index = state.tokens().iter().enumerate().rev().find_map(|(i, t)| {
            if t.scope_direction() != Some(ScopeDirection::Opens) || t.text() != self.opening {
                return None;
            }
            let range = &indices.token_offsets[i];
            if range.is_empty() || range.end > selection.min() {
                return None;
            }
            match matches.partner(TokenId(i)) {
                None => Some(i),
                Some(partner) => {
                    (indices.token_offsets[partner.index()].start >= selection.max()).then_some(i)
                }
            }
        })?;

        let opening_line = indices.token_positions[opening_index].0.line;
        let new_start = indices.line_start(opening_line);
        let new_finish = indices.line_indent_end(opening_line);
        let inserted_len = (new_finish - new_start) + self.closing.chars().count();

        let mut out = String::with_capacity(indices.text.len() + self.closing.len());
        out.push_str(indices.slice(0..old_start));
        out.push_str(indices.slice(new_start..new_finish));
        out.push_str(&self.closing);
        out.push_str(indices.slice(old_finish..indices.char_len()));

        let remap = |offset: usize| remap_offset(offset, old_start, old_finish, inserted_len);
        Some(RawEdit {
            text: out,
            selection: SelectionRange::new(remap(selection.start), remap(selection.end)),
            composition: state
                .composition()
                .map(|r| SelectionRange::new(remap(r.start), remap(r.end))),
        })
    }
}

/// Indent-aware newline.
///
/// Inserting `'\n'` copies the current line's leading whitespace and appends one indent
/// unit per scope opened on the current line whose closer is not yet before the caret.
/// When the very next non-whitespace content is such a scope's closer and that closer
/// also spans the current line, an extra line break with the original indentation is
/// inserted before it, putting the closer on its own dedented line.
pub struct NewlineIndent {
    indent: String,
}

impl NewlineIndent {
    /// Create the rule with the given indent unit.
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl<T: Token> EditRule<T> for NewlineIndent {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Insert('\n') = *event else {
            return None;
        };
        let indices = state.indices();
        let selection = state.selection();
        let min = selection.min();
        let max = selection.max();
        let current_line = indices.positions[min].line;

        let open_scopes: Vec<TokenId> = state
            .tokens()
            .iter()
            .enumerate()
            .filter_map(|(i, t)| {
                if t.scope_direction() != Some(ScopeDirection::Opens) {
                    return None;
                }
                if let Some(partner) = matches.partner(TokenId(i)) {
                    if indices.token_offsets[partner.index()].start < min {
                        return None;
                    }
                }
                let range = &indices.token_offsets[i];
                let on_current_line = *indices.token_lines[i].end() == current_line;
                let before_caret = !range.is_empty() && range.end - 1 <= min;
                (on_current_line && before_caret).then_some(TokenId(i))
            })
            .collect();

        let line_start = indices.line_start(current_line);
        let line_indent_end = indices.line_indent_end(current_line);
        let lead = indices.slice(line_start..line_indent_end);
        let inserted_len =
            1 + (line_indent_end - line_start) + open_scopes.len() * self.indent.chars().count();

        let mut out = String::with_capacity(indices.text.len() + inserted_len + 1);
        out.push_str(indices.slice(0..min));
        out.push('\n');
        out.push_str(lead);
        for _ in 0..open_scopes.len() {
            out.push_str(&self.indent);
        }

        let first_nonspace_after = indices
            .slice(max..indices.char_len())
            .chars()
            .position(|ch| !ch.is_whitespace())
            .map(|k| max + k);
        if let Some(next_content) = first_nonspace_after {
            let closer_follows = open_scopes.iter().any(|id| {
                let Some(partner) = matches.partner(*id) else {
                    return false;
                };
                indices.token_offsets[partner.index()].contains(&next_content)
                    && indices.token_lines[partner.index()].contains(&current_line)
            });
            if closer_follows {
                out.push('\n');
                out.push_str(indices.slice(line_start..line_indent_end));
            }
        }
        out.push_str(indices.slice(max..indices.char_len()));

        let remap = |offset: usize| remap_offset(offset, min, max, inserted_len);
        Some(RawEdit {
            text: out,
            selection: SelectionRange::new(remap(selection.start), remap(selection.end)),
            composition: state
                .composition()
                .map(|r| SelectionRange::new(remap(r.start), remap(r.end))),
        })
    }
}

/// Remove one whole indent unit on backspace at the start of a line's content.
pub struct BackspaceIndent {
    indent: String,
}

impl BackspaceIndent {
    /// Create the rule with the given indent unit.
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl<T: Token> EditRule<T> for BackspaceIndent {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        _matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Backspace = event else {
            return None;
        };
        let selection = state.selection();
        if !selection.is_collapsed() {
            return None;
        }
        let offset = selection.start;
        let indent_len = self.indent.chars().count();
        if indent_len == 0 || offset < indent_len {
            return None;
        }
        let indices = state.indices();
        let position = indices.positions[offset];
        if let Some(column) = indices.first_nonspace[position.line] {
            if column < position.column {
                return None;
            }
        }
        if indices.slice(offset - indent_len..offset) != self.indent {
            return None;
        }

        let mut out = String::with_capacity(indices.text.len());
        out.push_str(indices.slice(0..offset - indent_len));
        out.push_str(indices.slice(offset..indices.char_len()));

        let remap = |o: usize| remap_offset(o, offset - indent_len, offset, 0);
        Some(RawEdit {
            text: out,
            selection: SelectionRange::caret(offset - indent_len),
            composition: state
                .composition()
                .map(|r| SelectionRange::new(remap(r.start), remap(r.end))),
        })
    }
}

/// Remove both delimiters on backspace inside an empty pair.
pub struct BackspaceEmptyPair {
    opening: String,
    closing: String,
}

impl BackspaceEmptyPair {
    /// Create the rule for one delimiter pair.
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }
}

impl<T: Token> EditRule<T> for BackspaceEmptyPair {
    fn apply(
        &self,
        event: &CharEvent,
        state: &BufferState<T>,
        _matches: &BracketMatches,
    ) -> Option<RawEdit> {
        let CharEvent::Backspace = event else {
            return None;
        };
        let selection = state.selection();
        if !selection.is_collapsed() {
            return None;
        }
        let offset = selection.start;
        let opening_len = self.opening.chars().count();
        let closing_len = self.closing.chars().count();
        if opening_len == 0 || offset < opening_len {
            return None;
        }
        let indices = state.indices();
        if offset + closing_len > indices.char_len() {
            return None;
        }
        if indices.slice(offset - opening_len..offset) != self.opening {
            return None;
        }
        if indices.slice(offset..offset + closing_len) != self.closing {
            return None;
        }

        let mut out = String::with_capacity(indices.text.len());
        out.push_str(indices.slice(0..offset - opening_len));
        out.push_str(indices.slice(offset + closing_len..indices.char_len()));

        let remap = |o: usize| remap_offset(o, offset - opening_len, offset + closing_len, 0);
        Some(RawEdit {
            text: out,
            selection: SelectionRange::caret(offset - opening_len),
            composition: state
                .composition()
                .map(|r| SelectionRange::new(remap(r.start), remap(r.end))),
        })
    }
}

/// Build the canonical rule chain for a configuration: closing-char reuse first, then
/// per-pair opening/closing rules, the newline rule, indent removal, and finally
/// per-pair empty-pair removal.
pub fn standard_rules<T: Token>(config: &EditorConfig) -> RuleChain<T> {
    let mut rules: Vec<Box<dyn EditRule<T>>> = Vec::new();

    let closers: String = config
        .pairs
        .iter()
        .filter_map(|pair| pair.closing_char())
        .collect();
    rules.push(Box::new(ReuseClosingChar::new(closers)));

    for pair in &config.pairs {
        let (Some(opening_char), Some(closing_char)) = (pair.opening_char(), pair.closing_char())
        else {
            continue;
        };
        rules.push(Box::new(
            OpenBracket::new(opening_char, &pair.opening, &pair.closing)
                .indent_unit(Some(config.indent_unit.clone()))
                .reindent_selection(pair.reindent_selection),
        ));
        rules.push(Box::new(CloseBracket::new(
            &pair.opening,
            closing_char,
            &pair.closing,
        )));
    }

    rules.push(Box::new(NewlineIndent::new(&config.indent_unit)));
    rules.push(Box::new(BackspaceIndent::new(&config.indent_unit)));
    for pair in &config.pairs {
        rules.push(Box::new(BackspaceEmptyPair::new(&pair.opening, &pair.closing)));
    }

    RuleChain::new(rules)
}
