// ABOUTME: Error types for span extraction and markup cleaning.
// ABOUTME: Provides CleanError with Tokenize and Unbalanced variants.

use std::fmt;
use thiserror::Error;

use crate::style::Style;

/// Errors that can occur while walking an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    /// The tokenizer rejected the input for a reason other than end of input.
    #[error("failed to tokenize html at byte {offset}: {message}")]
    Tokenize { offset: usize, message: String },

    /// An end tag arrived while its style was not open.
    #[error("malformed html: {style} depth below 0 at byte {offset}")]
    Unbalanced { style: Style, offset: usize },
}

impl CleanError {
    /// Creates a Tokenize error from an underlying lexer error.
    pub fn tokenize(offset: usize, err: impl fmt::Display) -> Self {
        CleanError::Tokenize {
            offset,
            message: err.to_string(),
        }
    }

    pub fn unbalanced(style: Style, offset: usize) -> Self {
        CleanError::Unbalanced { style, offset }
    }

    pub fn is_tokenize(&self) -> bool {
        matches!(self, CleanError::Tokenize { .. })
    }

    pub fn is_unbalanced(&self) -> bool {
        matches!(self, CleanError::Unbalanced { .. })
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
