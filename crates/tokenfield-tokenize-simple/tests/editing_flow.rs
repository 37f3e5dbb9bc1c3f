//! The full editing flow driven through [`SimpleTokenizer`]: raw input-surface edits
//! in, auto-edited snapshots out.

use tokenfield::{
    BufferState, EditPipeline, RawEdit, SelectionRange, Token, pinned_lines, replace_tabs,
    standard_rules, tokens_at_selection,
};
use tokenfield_lang::EditorConfig;
use tokenfield_tokenize_simple::{SimpleToken, SimpleTokenizer};

type Pipeline = EditPipeline<SimpleToken, SimpleTokenizer>;

fn pipeline() -> Pipeline {
    let config = EditorConfig::default();
    EditPipeline::new(SimpleTokenizer::new(&config), standard_rules(&config))
        .with_preprocessor(|edit| replace_tabs(edit, 4))
}

fn type_char(state: &BufferState<SimpleToken>, c: char) -> RawEdit {
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

#[test]
fn a_typing_session_builds_a_block() {
    let p = pipeline();
    let mut state = p
        .bootstrap(RawEdit::new("fn go", SelectionRange::caret(5)))
        .expect("valid");

    for c in ['(', ')', ' ', '{'] {
        state = p.apply(&state, type_char(&state, c)).expect("valid");
    }
    assert_eq!(state.text(), "fn go() {}");
    assert_eq!(state.selection(), SelectionRange::caret(9));

    state = p.apply(&state, type_char(&state, '\n')).expect("valid");
    assert_eq!(state.text(), "fn go() {\n    \n}");
    assert_eq!(state.selection(), SelectionRange::caret(14));
}

#[test]
fn reuse_skips_over_tokenized_closers() {
    let p = pipeline();
    let state = p
        .bootstrap(RawEdit::new("f(x)", SelectionRange::caret(3)))
        .expect("valid");
    let next = p.apply(&state, type_char(&state, ')')).expect("valid");
    assert_eq!(next.text(), "f(x)");
    assert_eq!(next.selection(), SelectionRange::caret(4));
}

#[test]
fn snapshots_expose_matching_and_selection_queries() {
    let p = pipeline();
    let state = p
        .bootstrap(RawEdit::new("fn go() { body }", SelectionRange::caret(11)))
        .expect("valid");

    // The caret sits inside "body"-adjacent whitespace; some token contains it.
    assert!(!tokens_at_selection(&state).is_empty());

    // The brace pair matches across the tokenizer's word segmentation.
    let matches = state.matches();
    let brace = state
        .tokens()
        .iter()
        .position(|t| t.text() == "{")
        .expect("brace present");
    assert!(matches.partner(tokenfield::TokenId(brace)).is_some());
}

#[test]
fn pinned_lines_work_over_simple_tokens() {
    let p = pipeline();
    let source = "fn outer() {\n    a();\n    b();\n    c();\n}\n";
    let state = p
        .bootstrap(RawEdit::new(source, SelectionRange::caret(0)))
        .expect("valid");
    let pinned = pinned_lines(2, &state, state.matches());
    assert_eq!(pinned.into_iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn multibyte_text_keeps_offsets_in_chars() {
    let p = pipeline();
    let state = p
        .bootstrap(RawEdit::new("λx", SelectionRange::caret(1)))
        .expect("valid");
    let next = p.apply(&state, type_char(&state, '(')).expect("valid");
    assert_eq!(next.text(), "λ()x");
    assert_eq!(next.selection(), SelectionRange::caret(2));
}
