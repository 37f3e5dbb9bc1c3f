//! Resolve pinned header lines and indentation guides for a scrolled viewport.
//!
//! Run with: `cargo run --example sticky_scopes`

use tokenfield::{
    BufferState, CellSize, ScopeDirection, SelectionRange, Token, indentation_guides_distinct,
    pinned_header_height, pinned_lines,
};

#[derive(Debug, Clone)]
struct ExToken {
    text: String,
    scope: Option<ScopeDirection>,
}

impl Token for ExToken {
    fn text(&self) -> &str {
        &self.text
    }

    fn scope_direction(&self) -> Option<ScopeDirection> {
        self.scope
    }

    fn scope_matches(&self, other: &Self) -> bool {
        matches!(
            (self.text.as_str(), other.text.as_str()),
            ("{", "}") | ("}", "{")
        )
    }
}

fn tokenize(text: &str) -> Vec<ExToken> {
    text.chars()
        .map(|c| ExToken {
            text: c.to_string(),
            scope: match c {
                '{' => Some(ScopeDirection::Opens),
                '}' => Some(ScopeDirection::Closes),
                _ => None,
            },
        })
        .collect()
}

const SOURCE: &str = "\
impl Widget {
    fn layout(&self) {
        for child in &self.children {
            child.measure();
            child.arrange();
            child.paint();
        }
    }
}
";

fn main() {
    let state = BufferState::new(tokenize(SOURCE), SelectionRange::caret(0), None)
        .expect("valid buffer");
    let matches = state.matches();
    let cell = CellSize::new(8.0, 16.0);

    for top_line in 0..6 {
        let pinned = pinned_lines(top_line, &state, matches);
        let height = pinned_header_height(top_line, cell, &state, matches, 1.0, 200.0);
        println!("top line {top_line}: pinned {pinned:?} header {height}px");
    }

    println!("guides:");
    for guide in indentation_guides_distinct(&state, matches) {
        println!("  line {} column {}", guide.line, guide.column);
    }
}
