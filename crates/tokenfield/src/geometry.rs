//! Viewport scroll geometry.
//!
//! Pure math over caller-supplied glyph metrics: the rendering layer measures its font
//! and passes a [`CellSize`]; the engine never consults font tables. All functions are
//! per-axis and side-effect-free; the host owns the actual scrolling (and any
//! animation of it) and simply applies the returned targets.

use crate::indices::Position;
use crate::matching::BracketMatches;
use crate::state::BufferState;
use crate::token::Token;
use crate::visibility::pinned_lines;

/// Pixel size of one monospaced glyph cell, supplied by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    /// Advance width of one character cell.
    pub width: f32,
    /// Height of one line.
    pub height: f32,
}

impl CellSize {
    /// Create a cell size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Extra pixels reserved at the viewport edges, e.g. space taken by a pinned scope
/// header above the content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Pixels reserved at the top edge.
    pub top: f32,
    /// Pixels reserved at the bottom edge.
    pub bottom: f32,
    /// Pixels reserved at the leading edge.
    pub start: f32,
    /// Pixels reserved at the trailing edge.
    pub end: f32,
}

/// Pixel size of the scrollable viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

/// Current scroll offsets in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffsets {
    /// Vertical scroll offset.
    pub vertical: f32,
    /// Horizontal scroll offset.
    pub horizontal: f32,
}

/// How much context to keep visible beyond the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollThresholds {
    /// Characters to keep visible left/right of the target.
    pub horizontal_chars: usize,
    /// Lines to keep visible above/below the target.
    pub vertical_lines: usize,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            horizontal_chars: 5,
            vertical_lines: 1,
        }
    }
}

impl From<&tokenfield_lang::ScrollConfig> for ScrollThresholds {
    fn from(config: &tokenfield_lang::ScrollConfig) -> Self {
        Self {
            horizontal_chars: config.horizontal_threshold_chars,
            vertical_lines: config.vertical_threshold_lines,
        }
    }
}

/// Per-axis scroll targets; `None` means the axis already shows the target with the
/// requested margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollAdjustment {
    /// New vertical offset, if a vertical move is needed.
    pub vertical: Option<f32>,
    /// New horizontal offset, if a horizontal move is needed.
    pub horizontal: Option<f32>,
}

/// Whether the cell at `position` lies fully inside the scrolled viewport, contracted
/// by `insets`.
pub fn is_position_visible(
    cell: CellSize,
    position: Position,
    scroll: ScrollOffsets,
    viewport: ViewportSize,
    insets: Insets,
) -> bool {
    let line_top = position.line as f32 * cell.height;
    if scroll.vertical > line_top - insets.top {
        return false;
    }
    if scroll.vertical < line_top - viewport.height + insets.bottom {
        return false;
    }

    let char_left = position.column as f32 * cell.width;
    if scroll.horizontal > char_left - insets.start {
        return false;
    }
    if scroll.horizontal < char_left - viewport.width + insets.end {
        return false;
    }
    true
}

/// Minimal scroll offsets bringing `position` into view with the threshold margins.
///
/// Each axis is computed independently. When the viewport is too small to honor a
/// margin, successively smaller margins are tried down to zero; when even a zero margin
/// cannot be satisfied the axis is left untouched. Targets clamp at zero.
pub fn scroll_target(
    cell: CellSize,
    position: Position,
    scroll: ScrollOffsets,
    viewport: ViewportSize,
    insets: Insets,
    thresholds: ScrollThresholds,
) -> ScrollAdjustment {
    ScrollAdjustment {
        vertical: vertical_target(
            cell,
            position.line,
            scroll.vertical,
            viewport.height,
            insets,
            thresholds.vertical_lines,
        ),
        horizontal: horizontal_target(
            cell,
            position.column,
            scroll.horizontal,
            viewport.width,
            insets,
            thresholds.horizontal_chars,
        ),
    }
}

fn vertical_target(
    cell: CellSize,
    line: usize,
    current: f32,
    viewport_height: f32,
    insets: Insets,
    threshold_lines: usize,
) -> Option<f32> {
    let line_top = line as f32 * cell.height;
    for n in (0..=threshold_lines).rev() {
        let margin = n as f32 * cell.height;
        let above = line_top - margin - insets.top;
        let below = line_top - viewport_height + cell.height + margin + insets.bottom;
        let needs_up = current >= above;
        let needs_down = current <= below;
        if needs_up && needs_down {
            // Viewport too small for this margin; retry with a smaller one.
            continue;
        }
        if needs_up {
            return Some(above.max(0.0));
        }
        if needs_down {
            return Some(below.max(0.0));
        }
        return None;
    }
    None
}

fn horizontal_target(
    cell: CellSize,
    column: usize,
    current: f32,
    viewport_width: f32,
    insets: Insets,
    threshold_chars: usize,
) -> Option<f32> {
    let char_left = column as f32 * cell.width;
    for n in (0..=threshold_chars).rev() {
        let margin = n as f32 * cell.width;
        let left = char_left - margin - insets.start;
        let right = char_left - viewport_width + margin + insets.end;
        let needs_left = current >= left;
        let needs_right = current <= right;
        if needs_left && needs_right {
            continue;
        }
        if needs_left {
            return Some(left.max(0.0));
        }
        if needs_right {
            return Some(right.max(0.0));
        }
        return None;
    }
    None
}

/// Pixel height of the pinned scope header shown when line `line` is the top visible
/// line, capped at `max_height`.
pub fn pinned_header_height<T: Token>(
    line: usize,
    cell: CellSize,
    state: &BufferState<T>,
    matches: &BracketMatches,
    divider: f32,
    max_height: f32,
) -> f32 {
    let lines = pinned_lines(line, state, matches);
    if lines.is_empty() {
        return 0.0;
    }
    (lines.len() as f32 * cell.height + divider).min(max_height)
}

/// Extra top inset making line `line` land *below* the pinned header when scrolled to.
///
/// Walks candidate top lines upward from `line` until the gap to `line` clears the
/// header height at that candidate.
pub fn offset_for_line_on_top<T: Token>(
    line: usize,
    cell: CellSize,
    state: &BufferState<T>,
    matches: &BracketMatches,
    divider: f32,
    max_height: f32,
) -> f32 {
    for attempt in (0..=line).rev() {
        let header = pinned_header_height(attempt, cell, state, matches, divider, max_height);
        let gap = (line - attempt) as f32 * cell.height;
        if gap >= header {
            return gap;
        }
    }
    line as f32 * cell.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: CellSize = CellSize {
        width: 8.0,
        height: 16.0,
    };
    const VIEWPORT: ViewportSize = ViewportSize {
        width: 640.0,
        height: 320.0,
    };

    #[test]
    fn position_inside_the_window_is_visible() {
        let scroll = ScrollOffsets {
            vertical: 0.0,
            horizontal: 0.0,
        };
        assert!(is_position_visible(
            CELL,
            Position::new(5, 10),
            scroll,
            VIEWPORT,
            Insets::default()
        ));
    }

    #[test]
    fn position_above_the_window_is_not_visible() {
        let scroll = ScrollOffsets {
            vertical: 160.0,
            horizontal: 0.0,
        };
        assert!(!is_position_visible(
            CELL,
            Position::new(2, 0),
            scroll,
            VIEWPORT,
            Insets::default()
        ));
    }

    #[test]
    fn top_inset_shrinks_the_visible_window() {
        let scroll = ScrollOffsets {
            vertical: 160.0,
            horizontal: 0.0,
        };
        // Line 12 starts at y=192, 32px below the scroll offset.
        let position = Position::new(12, 0);
        assert!(is_position_visible(CELL, position, scroll, VIEWPORT, Insets::default()));
        let insets = Insets {
            top: 48.0,
            ..Insets::default()
        };
        assert!(!is_position_visible(CELL, position, scroll, VIEWPORT, insets));
    }

    #[test]
    fn no_adjustment_when_the_target_is_well_inside() {
        let adjustment = scroll_target(
            CELL,
            Position::new(10, 10),
            ScrollOffsets::default(),
            VIEWPORT,
            Insets::default(),
            ScrollThresholds::default(),
        );
        assert_eq!(adjustment, ScrollAdjustment::default());
    }

    #[test]
    fn scrolling_up_keeps_the_margin_above_the_target() {
        let scroll = ScrollOffsets {
            vertical: 480.0,
            horizontal: 0.0,
        };
        let adjustment = scroll_target(
            CELL,
            Position::new(20, 0),
            scroll,
            VIEWPORT,
            Insets::default(),
            ScrollThresholds::default(),
        );
        // Line 20 is at y=320; one threshold line above is 304.
        assert_eq!(adjustment.vertical, Some(304.0));
        // Column 0 clamps its (negative) margin target to zero.
        assert_eq!(adjustment.horizontal, Some(0.0));
    }

    #[test]
    fn scrolling_down_keeps_the_margin_below_the_target() {
        let adjustment = scroll_target(
            CELL,
            Position::new(40, 0),
            ScrollOffsets::default(),
            VIEWPORT,
            Insets::default(),
            ScrollThresholds::default(),
        );
        // Line 40 at y=640: target 640 - 320 + 16 + 16 = 352.
        assert_eq!(adjustment.vertical, Some(352.0));
    }

    #[test]
    fn margins_shrink_when_the_viewport_is_tiny() {
        let tiny = ViewportSize {
            width: 24.0,
            height: 20.0,
        };
        let scroll = ScrollOffsets {
            vertical: 310.0,
            horizontal: 0.0,
        };
        let adjustment = scroll_target(
            CELL,
            Position::new(20, 0),
            scroll,
            tiny,
            Insets::default(),
            ScrollThresholds::default(),
        );
        // A one-line margin cannot fit in a 20px viewport, so the zero-margin
        // target wins: 320 - 20 + 16 = 316.
        assert_eq!(adjustment.vertical, Some(316.0));
    }

    #[test]
    fn targets_clamp_at_zero() {
        let scroll = ScrollOffsets {
            vertical: 100.0,
            horizontal: 0.0,
        };
        let adjustment = scroll_target(
            CELL,
            Position::new(0, 0),
            scroll,
            VIEWPORT,
            Insets::default(),
            ScrollThresholds::default(),
        );
        assert_eq!(adjustment.vertical, Some(0.0));
    }

    #[test]
    fn horizontal_margin_uses_the_char_threshold() {
        let scroll = ScrollOffsets {
            vertical: 0.0,
            horizontal: 940.0,
        };
        let adjustment = scroll_target(
            CELL,
            Position::new(0, 120),
            scroll,
            VIEWPORT,
            Insets::default(),
            ScrollThresholds::default(),
        );
        // Column 120 at x=960; five threshold chars left is 920.
        assert_eq!(adjustment.horizontal, Some(920.0));
    }

    mod header {
        use super::*;
        use crate::testing::state_with_caret;

        #[test]
        fn header_height_counts_pinned_lines() {
            let state = state_with_caret("x\nf() {\n  a\n  b\n  c\n}\n", 0);
            let height =
                pinned_header_height(3, CELL, &state, state.matches(), 1.0, 1000.0);
            assert_eq!(height, 17.0); // one pinned line + divider
            let none = pinned_header_height(0, CELL, &state, state.matches(), 1.0, 1000.0);
            assert_eq!(none, 0.0);
        }

        #[test]
        fn header_height_is_capped() {
            let state = state_with_caret("{\n{\n{\n  a\n  b\n  c\n}\n}\n}\n", 0);
            let height = pinned_header_height(3, CELL, &state, state.matches(), 0.0, 24.0);
            assert_eq!(height, 24.0);
        }

        #[test]
        fn offset_for_line_clears_the_header() {
            let state = state_with_caret("f() {\n  a\n  b\n  c\n  d\n  e\n}\n", 0);
            // Scrolling to line 3 must leave room for the one-line header.
            let offset =
                offset_for_line_on_top(3, CELL, &state, state.matches(), 0.0, 1000.0);
            assert_eq!(offset, 16.0);
        }
    }
}
