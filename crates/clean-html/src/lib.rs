// ABOUTME: Extracts plain text and bold/italic spans from restricted HTML fragments.
// ABOUTME: Offers span extraction with source and cleaned-buffer offsets, plus offset-free cleaners.

pub mod clean;
pub mod error;
pub mod extract;
pub mod options;
pub mod portions;
pub mod style;
pub mod tokenizer;

pub use clean::{clean_plain_text, clean_preserving_style_tags, clean_preserving_style_tags_with};
pub use error::{CleanError, Result};
pub use extract::{
    extract_spans, extract_spans_and_clean, extract_spans_and_clean_with, extract_spans_with,
};
pub use options::{BreakTags, Options};
pub use portions::{Portions, TextSpan};
pub use style::Style;
