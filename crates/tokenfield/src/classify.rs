//! Edit-intent classification by pure snapshot diffing.
//!
//! Input surfaces deliver an arbitrary new `(text, selection, composition)` triple; no
//! event metadata is trusted. The classifier decides by equality and length checks alone
//! whether the transition was a single-character insertion, a backspace, or something
//! else. Classification is deliberately conservative: a false positive would corrupt the
//! auto-editing rules downstream, so any doubt yields [`CharEvent::Misc`].

use crate::state::{BufferState, RawEdit, SelectionRange, remap_offset};
use crate::token::Token;

/// What a raw edit transition amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharEvent {
    /// Exactly one character was typed at the previously collapsed or selected position.
    Insert(char),
    /// The previous selection, or the single character before a collapsed caret, was
    /// erased.
    Backspace,
    /// Any transition that is not provably one of the above.
    Misc,
}

/// Classify the transition from `old` to `new`.
pub fn classify<T: Token>(old: &BufferState<T>, new: &RawEdit) -> CharEvent {
    let old_text = old.text();
    if old_text == new.text {
        return CharEvent::Misc;
    }
    let old_len = old.char_len();
    let old_selection = old.selection();
    let old_composition = old.composition();

    if is_backspace(old_text, old_len, old_selection, old_composition, new) {
        return CharEvent::Backspace;
    }
    if let Some(c) = inserted_char(old_text, old_len, old_selection, old_composition, new) {
        return CharEvent::Insert(c);
    }
    CharEvent::Misc
}

fn is_backspace(
    old_text: &str,
    old_len: usize,
    old_selection: SelectionRange,
    old_composition: Option<SelectionRange>,
    new: &RawEdit,
) -> bool {
    if erased_selection(old_text, old_len, old_selection, old_composition, new) {
        return true;
    }
    // A plain backspace is "collapse, then erase the char before the caret".
    if old_selection.is_collapsed() && old_selection.start > 0 {
        let synthetic = SelectionRange::new(old_selection.end - 1, old_selection.end);
        return erased_selection(old_text, old_len, synthetic, old_composition, new);
    }
    false
}

fn erased_selection(
    old_text: &str,
    old_len: usize,
    old_selection: SelectionRange,
    old_composition: Option<SelectionRange>,
    new: &RawEdit,
) -> bool {
    if !new.selection.is_collapsed() || old_selection.is_collapsed() {
        return false;
    }
    if new.selection.min() != old_selection.min() {
        return false;
    }
    if new.char_len() != old_len - old_selection.len() {
        return false;
    }
    let min = old_selection.min();
    let max = old_selection.max();
    if !prefixes_equal(old_text, &new.text, min) {
        return false;
    }
    if !suffixes_equal(old_text, max, &new.text, max - old_selection.len()) {
        return false;
    }
    composition_consistent(old_composition, new.composition, min, max, 0)
}

fn inserted_char(
    old_text: &str,
    old_len: usize,
    old_selection: SelectionRange,
    old_composition: Option<SelectionRange>,
    new: &RawEdit,
) -> Option<char> {
    if !new.selection.is_collapsed() {
        return None;
    }
    if new.selection.min() != old_selection.min() + 1 {
        return None;
    }
    if new.char_len() != old_len - old_selection.len() + 1 {
        return None;
    }
    let min = old_selection.min();
    let max = old_selection.max();
    if !prefixes_equal(old_text, &new.text, min) {
        return None;
    }
    if !suffixes_equal(old_text, max, &new.text, max - old_selection.len() + 1) {
        return None;
    }
    if !composition_consistent(old_composition, new.composition, min, max, 1) {
        return None;
    }
    new.text.chars().nth(min)
}

fn prefixes_equal(old_text: &str, new_text: &str, chars: usize) -> bool {
    old_text.chars().take(chars).eq(new_text.chars().take(chars))
}

fn suffixes_equal(old_text: &str, old_from: usize, new_text: &str, new_from: usize) -> bool {
    old_text
        .chars()
        .skip(old_from)
        .eq(new_text.chars().skip(new_from))
}

/// The composition, when present, must remap under the same span mapping as the edit
/// itself. A vanished composition is a commit/cancel and is accepted; a composition
/// appearing out of nowhere means the IME drove the edit, which must not be classified
/// as plain typing.
fn composition_consistent(
    old: Option<SelectionRange>,
    new: Option<SelectionRange>,
    edit_start: usize,
    edit_end: usize,
    inserted_len: usize,
) -> bool {
    match (old, new) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(old), Some(new)) => {
            new.start == remap_offset(old.start, edit_start, edit_end, inserted_len)
                && new.end == remap_offset(old.end, edit_start, edit_end, inserted_len)
        }
    }
}
