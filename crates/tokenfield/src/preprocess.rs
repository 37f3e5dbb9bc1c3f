//! Generic raw-edit preprocessors, applied before classification.

use crate::state::{RawEdit, SelectionRange};

/// A preprocessor rewrites a raw edit before it is classified (e.g. tab expansion).
pub type Preprocessor = Box<dyn Fn(RawEdit) -> RawEdit>;

/// Expand every tab character to `tab_width` spaces, shifting selection and composition
/// offsets accordingly.
///
/// A span's start shifts for tabs strictly before it, its end for tabs at or before it,
/// so a selection hugging a tab grows over the expansion rather than splitting it.
pub fn replace_tabs(raw: RawEdit, tab_width: usize) -> RawEdit {
    if !raw.text.contains('\t') {
        return raw;
    }
    let growth = tab_width as isize - 1;
    let mut selection_start = 0isize;
    let mut selection_end = 0isize;
    let mut composition_start = 0isize;
    let mut composition_end = 0isize;
    for (i, c) in raw.text.chars().enumerate() {
        if c != '\t' {
            continue;
        }
        if i < raw.selection.start {
            selection_start += growth;
        }
        if i <= raw.selection.end {
            selection_end += growth;
        }
        if let Some(composition) = raw.composition {
            if i < composition.start {
                composition_start += growth;
            }
            if i <= composition.end {
                composition_end += growth;
            }
        }
    }

    let shift = |offset: usize, delta: isize| (offset as isize + delta).max(0) as usize;
    RawEdit {
        text: raw.text.replace('\t', &" ".repeat(tab_width)),
        selection: SelectionRange::new(
            shift(raw.selection.start, selection_start),
            shift(raw.selection.end, selection_end),
        ),
        composition: raw.composition.map(|c| {
            SelectionRange::new(shift(c.start, composition_start), shift(c.end, composition_end))
        }),
    }
}
