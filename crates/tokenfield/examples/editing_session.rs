//! Drive the edit pipeline by hand: type a function skeleton and watch the
//! auto-editing rules shape it.
//!
//! Run with: `cargo run --example editing_session`

use tokenfield::{
    BufferState, EditPipeline, FnTokenizer, RawEdit, ScopeDirection, SelectionRange, Token,
    replace_tabs, standard_rules,
};
use tokenfield_lang::EditorConfig;

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
            ("(", ")") | (")", "(") | ("{", "}") | ("}", "{") | ("[", "]") | ("]", "[")
        )
    }
}

fn tokenize(text: &str) -> Vec<ExToken> {
    text.chars()
        .map(|c| ExToken {
            text: c.to_string(),
            scope: match c {
                '(' | '{' | '[' => Some(ScopeDirection::Opens),
                ')' | '}' | ']' => Some(ScopeDirection::Closes),
                _ => None,
            },
        })
        .collect()
}

fn type_char(state: &BufferState<ExToken>, c: char) -> RawEdit {
    let caret = state.selection().min();
    let byte = state
        .text()
        .char_indices()
        .nth(caret)
        .map(|(b, _)| b)
        .unwrap_or(state.text().len());
    let mut text = state.text().to_string();
    text.insert(byte, c);
    RawEdit::new(text, SelectionRange::caret(caret + 1))
}

fn show(step: &str, state: &BufferState<ExToken>) {
    println!("after {step:<12} {:?} caret={}", state.text(), state.selection().end);
}

fn main() {
    let pipeline = EditPipeline::new(
        FnTokenizer(tokenize as fn(&str) -> Vec<ExToken>),
        standard_rules(&EditorConfig::default()),
    )
    .with_preprocessor(|edit| replace_tabs(edit, 4));

    let mut state = pipeline
        .bootstrap(RawEdit::new("fn f", SelectionRange::caret(4)))
        .expect("valid buffer");
    show("bootstrap", &state);

    for (step, c) in [("open paren", '('), ("close paren", ')'), ("open brace", '{')] {
        state = pipeline
            .apply(&state, type_char(&state, c))
            .expect("valid edit");
        show(step, &state);
    }

    // Enter between the braces: the body is split over three lines with an indent.
    state = pipeline
        .apply(&state, type_char(&state, '\n'))
        .expect("valid edit");
    show("newline", &state);
}
