//! Typed error surface for dictionary persistence.
//!
//! The core never panics on malformed input; load failures are reported through
//! [`DictionaryError`] and leave no partially constructed state behind.

use thiserror::Error;

/// Errors that can arise while saving or loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The underlying character source/sink reported an I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The trie dump was malformed (bad key, or an unbalanced `^`).
    #[error("malformed trie dump at line {line}, column {column}")]
    MalformedTrie { line: u32, column: u32 },

    /// A rule record didn't parse (missing `*` separator, bad flag code, etc).
    #[error("malformed rule record at line {line}, column {column}")]
    MalformedRule { line: u32, column: u32 },

    /// A numeric field was empty, non-decimal, negative, or overflowed `i32`.
    #[error("malformed integer field at line {line}, column {column}")]
    MalformedInt { line: u32, column: u32 },
}

/// Returned by [`crate::dictionary::Dictionary::add_rule`] when neither
/// direction of a bidirectional rule addition is legal.
#[derive(Debug, Error)]
#[error("rule rejected: not legal in either direction")]
pub struct RuleRejected;

pub type Result<T> = std::result::Result<T, DictionaryError>;
