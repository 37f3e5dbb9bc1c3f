//! The edit pipeline: preprocess, classify, apply auto-editing rules, re-tokenize.
//!
//! This ties the engine together in the data flow consumed by hosts: a raw edit from the
//! input surface is classified against the previous snapshot, offered to the rule chain,
//! and the winning rewrite (or the preprocessed original) is re-tokenized into the next
//! snapshot. Everything is synchronous and pull-based; the host owns the snapshot and
//! replaces it wholesale.

use log::{debug, trace};

use crate::classify::classify;
use crate::preprocess::Preprocessor;
use crate::rules::RuleChain;
use crate::state::{BufferState, RawEdit, StateError};
use crate::token::Token;

/// A pluggable tokenizer: splits buffer text into host tokens.
///
/// Tokens are produced fresh on every pass; the engine never mutates them.
pub trait Tokenize<T: Token> {
    /// Tokenize `text` into a sequence whose concatenated texts reproduce `text`.
    fn tokenize(&self, text: &str) -> Vec<T>;
}

/// Adapter turning a plain function or closure into a [`Tokenize`] implementation.
pub struct FnTokenizer<F>(pub F);

impl<T: Token, F: Fn(&str) -> Vec<T>> Tokenize<T> for FnTokenizer<F> {
    fn tokenize(&self, text: &str) -> Vec<T> {
        (self.0)(text)
    }
}

/// The assembled engine: tokenizer, preprocessors and rule chain.
pub struct EditPipeline<T: Token, K: Tokenize<T>> {
    tokenizer: K,
    preprocessors: Vec<Preprocessor>,
    rules: RuleChain<T>,
}

impl<T: Token, K: Tokenize<T>> EditPipeline<T, K> {
    /// Create a pipeline without preprocessors.
    pub fn new(tokenizer: K, rules: RuleChain<T>) -> Self {
        Self {
            tokenizer,
            preprocessors: Vec::new(),
            rules,
        }
    }

    /// Append a preprocessor, applied in registration order.
    pub fn with_preprocessor(
        mut self,
        preprocessor: impl Fn(RawEdit) -> RawEdit + 'static,
    ) -> Self {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Tokenize an initial buffer into the first snapshot.
    pub fn bootstrap(&self, raw: RawEdit) -> Result<BufferState<T>, StateError> {
        self.apply(&BufferState::empty(), raw)
    }

    /// Process one edit transition from `prev` into a fresh snapshot.
    ///
    /// Classification runs against the raw edit exactly as delivered; the preprocessed
    /// edit is only used when no rule fires, so rules see (and rewrite) the previous
    /// snapshot's text rather than a half-transformed one.
    pub fn apply(&self, prev: &BufferState<T>, raw: RawEdit) -> Result<BufferState<T>, StateError> {
        let event = classify(prev, &raw);
        trace!("edit classified as {event:?}");

        let chosen = match self.rules.apply(&event, prev, prev.matches()) {
            Some(rewritten) => {
                debug!("auto-edit rule rewrote the {event:?} edit");
                rewritten
            }
            None => self
                .preprocessors
                .iter()
                .fold(raw, |edit, preprocessor| preprocessor(edit)),
        };

        let tokens = self.tokenizer.tokenize(&chosen.text);
        BufferState::new(tokens, chosen.selection, chosen.composition)
    }
}
