//! Block indentation: shift the selected line range by one indent unit.
//!
//! These are the Tab / Shift-Tab operations of an editing host, expressed as pure
//! transformations on a snapshot. Insertions and removals happen at each line's first
//! non-whitespace position; selection and composition endpoints shift by whatever
//! landed before them, with removals capped at the distance to the removal point.

use crate::state::{BufferState, RawEdit, SelectionRange};
use crate::token::Token;

/// Insert one indent unit at the start of every selected line's content.
///
/// Declines on a collapsed selection: indenting is a selection operation; a collapsed
/// Tab press should insert indentation at the caret instead.
pub fn indent_selection<T: Token>(state: &BufferState<T>, indent: &str) -> Option<RawEdit> {
    let selection = state.selection();
    if selection.is_collapsed() {
        return None;
    }
    let indices = state.indices();
    let first_line = indices.positions[selection.min()].line;
    let last_line = indices.positions[selection.max()].line;
    let indent_len = indent.chars().count();

    let mut inserts: Vec<usize> = Vec::new();
    let mut out =
        String::with_capacity(indices.text.len() + (last_line - first_line + 1) * indent.len());
    if first_line > 0 {
        out.push_str(indices.slice(0..indices.line_end(first_line - 1) + 1));
    }
    for line in first_line..=last_line {
        let start = indices.line_start(line);
        let end = indices.line_end(line);
        let at = indices.line_indent_end(line);
        out.push_str(indices.slice(start..at));
        out.push_str(indent);
        inserts.push(at);
        out.push_str(indices.slice(at..end));
        if line != last_line {
            out.push('\n');
        }
    }
    if last_line + 1 < indices.line_count() {
        let next_start = indices.line_start(last_line + 1);
        out.push_str(indices.slice(next_start - 1..indices.char_len()));
    }

    let shift =
        |offset: usize| offset + inserts.iter().filter(|&&at| offset >= at).count() * indent_len;
    Some(RawEdit {
        text: out,
        selection: SelectionRange::new(shift(selection.start), shift(selection.end)),
        composition: state
            .composition()
            .map(|c| SelectionRange::new(shift(c.start), shift(c.end))),
    })
}

/// Remove up to one indent unit of whitespace before every selected line's content.
///
/// Works on collapsed selections too: the caret's line is outdented.
pub fn outdent_selection<T: Token>(state: &BufferState<T>, indent: &str) -> RawEdit {
    let selection = state.selection();
    let indices = state.indices();
    let first_line = indices.positions[selection.min()].line;
    let last_line = indices.positions[selection.max()].line;
    let indent_len = indent.chars().count();

    // (removal start, removed chars) per line, in original offsets.
    let mut removals: Vec<(usize, usize)> = Vec::new();
    let mut out = String::with_capacity(indices.text.len());
    if first_line > 0 {
        out.push_str(indices.slice(0..indices.line_end(first_line - 1) + 1));
    }
    for line in first_line..=last_line {
        let start = indices.line_start(line);
        let end = indices.line_end(line);
        let at = indices.line_indent_end(line);
        let removed = indent_len.min(at - start);
        out.push_str(indices.slice(start..at - removed));
        removals.push((at - removed, removed));
        out.push_str(indices.slice(at..end));
        if line != last_line {
            out.push('\n');
        }
    }
    if last_line + 1 < indices.line_count() {
        let next_start = indices.line_start(last_line + 1);
        out.push_str(indices.slice(next_start - 1..indices.char_len()));
    }

    let shift = |offset: usize| {
        let mut shifted = offset;
        for &(at, removed) in &removals {
            if offset >= at {
                shifted -= removed.min(offset - at);
            }
        }
        shifted
    };
    RawEdit {
        text: out,
        selection: SelectionRange::new(shift(selection.start), shift(selection.end)),
        composition: state
            .composition()
            .map(|c| SelectionRange::new(shift(c.start), shift(c.end))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state_with_caret, state_with_selection};

    #[test]
    fn indent_shifts_every_selected_line() {
        let state = state_with_selection("one\ntwo\nthree\n", 1, 9);
        let edit = indent_selection(&state, "    ").expect("selection not collapsed");
        assert_eq!(edit.text, "    one\n    two\n    three\n");
        assert_eq!(edit.selection, SelectionRange::new(5, 21));
    }

    #[test]
    fn indent_declines_on_a_collapsed_caret() {
        let state = state_with_caret("one\n", 1);
        assert!(indent_selection(&state, "    ").is_none());
    }

    #[test]
    fn indent_inserts_at_existing_content_start() {
        let state = state_with_selection("  a\nb\n", 0, 5);
        let edit = indent_selection(&state, "  ").expect("fires");
        assert_eq!(edit.text, "    a\n  b\n");
    }

    #[test]
    fn outdent_removes_one_unit_per_line() {
        let state = state_with_selection("    one\n    two\n", 4, 12);
        let edit = outdent_selection(&state, "    ");
        assert_eq!(edit.text, "one\ntwo\n");
        assert_eq!(edit.selection, SelectionRange::new(0, 4));
    }

    #[test]
    fn outdent_caps_at_the_available_indentation() {
        let state = state_with_selection("  a\nb\n", 0, 5);
        let edit = outdent_selection(&state, "    ");
        assert_eq!(edit.text, "a\nb\n");
    }

    #[test]
    fn outdent_works_on_a_collapsed_caret() {
        let state = state_with_caret("    x\n", 5);
        let edit = outdent_selection(&state, "    ");
        assert_eq!(edit.text, "x\n");
        assert_eq!(edit.selection, SelectionRange::caret(1));
    }

    #[test]
    fn indent_then_outdent_round_trips() {
        let state = state_with_selection("alpha\n  beta\n", 0, 12);
        let indented = indent_selection(&state, "    ").expect("fires");
        let reparsed = crate::state::BufferState::new(
            crate::testing::tokenize_chars(&indented.text),
            indented.selection,
            None,
        )
        .expect("valid");
        let restored = outdent_selection(&reparsed, "    ");
        assert_eq!(restored.text, "alpha\n  beta\n");
    }

    #[test]
    fn surrounding_lines_are_untouched() {
        let state = state_with_selection("keep\n  mid\nkeep2\n", 6, 9);
        let edit = indent_selection(&state, "  ").expect("fires");
        assert_eq!(edit.text, "keep\n    mid\nkeep2\n");
    }
}
