// ABOUTME: Offset-free cleaners producing plain text or text with canonical b/i markup.
// ABOUTME: Also owns the token-to-markup table shared with the span extractor's rewrite mode.

use crate::error::Result;
use crate::options::Options;
use crate::tokenizer::{TagName, Token, Tokenizer};

/// Canonical markup a non-text token contributes to cleaned output, if any.
pub(crate) fn canonical_markup(token: Token<'_>, options: &Options) -> Option<&'static str> {
    match token {
        Token::StartTag(name) => match TagName::classify(name) {
            TagName::Style(style) => Some(style.open_tag()),
            TagName::Break if options.breaks_on_start_tag() => Some(" "),
            _ => None,
        },
        Token::EndTag(name) => match TagName::classify(name) {
            TagName::Style(style) => Some(style.close_tag()),
            _ => None,
        },
        Token::SelfClosingTag(name) if TagName::classify(name) == TagName::Break => Some(" "),
        _ => None,
    }
}

/// Returns the text content of `input` with every tag removed.
///
/// Entity references are copied as written; nothing is decoded.
pub fn clean_plain_text(input: &[u8]) -> Result<Vec<u8>> {
    let mut tokenizer = Tokenizer::new(input);
    let mut out = Vec::with_capacity(input.len());

    while let Some(token) = tokenizer.next_token()? {
        if let Token::Text(raw) = token {
            out.extend_from_slice(raw);
        }
    }
    Ok(out)
}

/// Returns `input` reduced to text, `<b>`/`<i>` pairs and a space per `<br>`.
///
/// Style tags are re-emitted as they appear; nesting balance is not checked.
pub fn clean_preserving_style_tags(input: &[u8]) -> Result<Vec<u8>> {
    clean_preserving_style_tags_with(input, &Options::default())
}

/// Like [`clean_preserving_style_tags`], with `options.break_tags` choosing
/// which `<br>` spellings become a space.
pub fn clean_preserving_style_tags_with(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    let mut tokenizer = Tokenizer::new(input);
    let mut out = Vec::with_capacity(input.len());

    while let Some(token) = tokenizer.next_token()? {
        match token {
            Token::Text(raw) => out.extend_from_slice(raw),
            other => {
                if let Some(markup) = canonical_markup(other, options) {
                    out.extend_from_slice(markup.as_bytes());
                }
            }
        }
    }
    Ok(out)
}
