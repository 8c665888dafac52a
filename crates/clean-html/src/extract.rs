// ABOUTME: Depth-tracking extraction loop producing styled text spans from an HTML fragment.
// ABOUTME: Optionally rewrites the fragment to cleaned markup, tracking offsets in both buffers.

use log::{debug, trace};

use crate::clean::canonical_markup;
use crate::error::{CleanError, Result};
use crate::options::Options;
use crate::portions::{Portions, TextSpan};
use crate::style::{DepthUnderflow, Style, StyleDepth};
use crate::tokenizer::{TagName, Token, Tokenizer};

/// Write offsets into the source and cleaned buffers, moved in lockstep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    /// Start of the next text span in the source.
    source: usize,
    /// End of the cleaned buffer written so far.
    cleaned: usize,
}

struct Extraction<'o> {
    options: &'o Options,
    cursor: Cursor,
    depth: StyleDepth,
    portions: Portions,
    /// Present only when rewriting.
    cleaned: Option<Vec<u8>>,
}

impl<'o> Extraction<'o> {
    fn new(options: &'o Options, rewrite_capacity: Option<usize>) -> Self {
        Self {
            options,
            cursor: Cursor::default(),
            depth: StyleDepth::new(),
            portions: Portions::default(),
            cleaned: rewrite_capacity.map(Vec::with_capacity),
        }
    }

    fn run(mut self, input: &[u8]) -> Result<(Portions, Option<Vec<u8>>)> {
        let mut tokenizer = Tokenizer::new(input);

        while let Some(token) = tokenizer.next_token()? {
            match token {
                Token::Text(raw) => self.text(raw),
                other => self.markup(other, tokenizer.position())?,
            }
            self.cursor.source = tokenizer.position();
        }

        debug_assert!(
            self.cleaned.is_none() || self.portions.adjusted.len() == self.portions.len()
        );
        trace!(
            "extracted {} spans from {} bytes (cleaned: {:?})",
            self.portions.len(),
            input.len(),
            self.cleaned.as_ref().map(Vec::len)
        );
        Ok((self.portions, self.cleaned))
    }

    fn text(&mut self, raw: &[u8]) {
        let start = self.cursor.source;
        self.portions.spans.push(TextSpan {
            range: start..start + raw.len(),
            bold: self.depth.is_active(Style::Bold),
            italic: self.depth.is_active(Style::Italic),
        });
        if self.cleaned.is_some() {
            let cleaned_start = self.cursor.cleaned;
            self.write(raw);
            self.portions.adjusted.push(cleaned_start..self.cursor.cleaned);
        }
    }

    /// `end` is the source offset just past the token.
    fn markup(&mut self, token: Token<'_>, end: usize) -> Result<()> {
        match token {
            Token::StartTag(name) => {
                if let TagName::Style(style) = TagName::classify(name) {
                    self.depth.open(style);
                }
            }
            Token::EndTag(name) => {
                if let TagName::Style(style) = TagName::classify(name) {
                    self.depth.close(style).map_err(|DepthUnderflow(style)| {
                        debug!(
                            "rejecting html: unbalanced {} ending at byte {}",
                            style.close_tag(),
                            end
                        );
                        CleanError::unbalanced(style, end)
                    })?;
                }
            }
            _ => {}
        }
        if self.cleaned.is_some() {
            if let Some(markup) = canonical_markup(token, self.options) {
                self.write(markup.as_bytes());
            }
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) {
        if let Some(out) = self.cleaned.as_mut() {
            out.extend_from_slice(bytes);
            self.cursor.cleaned += bytes.len();
        }
    }
}

/// Extracts styled text spans from `input` in source coordinates.
///
/// Fails if the tokenizer rejects the input or an `</b>`/`</i>` closes a
/// style that is not open. No partial result is returned on failure.
pub fn extract_spans(input: &[u8]) -> Result<Portions> {
    extract_spans_with(input, &Options::default())
}

/// Like [`extract_spans`]. Options only affect cleaned output, so spans come
/// out the same for every setting.
pub fn extract_spans_with(input: &[u8], options: &Options) -> Result<Portions> {
    let (portions, _) = Extraction::new(options, None).run(input)?;
    Ok(portions)
}

/// Extracts styled text spans and rewrites `input` to cleaned markup.
///
/// The returned buffer holds only text, canonical `<b>`/`<i>` tags and one
/// space per line break. `portions.adjusted()[i]` indexes the same text in
/// that buffer that `portions.spans()[i]` indexes in `input`.
pub fn extract_spans_and_clean(input: &[u8]) -> Result<(Portions, Vec<u8>)> {
    extract_spans_and_clean_with(input, &Options::default())
}

/// Like [`extract_spans_and_clean`], with `options.break_tags` choosing which
/// `<br>` spellings become a space in the cleaned buffer.
pub fn extract_spans_and_clean_with(
    input: &[u8],
    options: &Options,
) -> Result<(Portions, Vec<u8>)> {
    let (portions, cleaned) = Extraction::new(options, Some(input.len())).run(input)?;
    Ok((portions, cleaned.unwrap_or_default()))
}
