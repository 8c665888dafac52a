// ABOUTME: Byte-level HTML fragment tokenizer yielding Text/StartTag/EndTag/SelfClosingTag/Other.
// ABOUTME: Tracks the absolute read offset and handles raw-text elements like script and style.

use memchr::{memchr, memmem};

use crate::error::{CleanError, Result};
use crate::style::Style;

/// Elements whose content is text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&[u8]] = &[
    b"iframe",
    b"noembed",
    b"noframes",
    b"noscript",
    b"plaintext",
    b"script",
    b"style",
    b"textarea",
    b"title",
    b"xmp",
];

/// Tag names the extraction loop cares about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    Style(Style),
    Break,
    Other,
}

impl TagName {
    pub fn classify(name: &[u8]) -> Self {
        if let Some(style) = Style::from_tag_name(name) {
            TagName::Style(style)
        } else if name.eq_ignore_ascii_case(b"br") {
            TagName::Break
        } else {
            TagName::Other
        }
    }
}

/// A token borrowed from the input. Text carries its raw, undecoded bytes;
/// tags carry their name as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a [u8]),
    StartTag(&'a [u8]),
    EndTag(&'a [u8]),
    SelfClosingTag(&'a [u8]),
    /// Comments, doctypes, processing instructions and CDATA sections.
    Other,
}

/// Pull tokenizer over one input buffer. Created per call, never shared.
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    /// Name of the raw-text element whose content comes next.
    raw_text: Option<&'a [u8]>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    /// Absolute byte offset just past the most recently returned token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next token, or `None` once the input is exhausted.
    ///
    /// The only lexical error is a tag still open at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        if let Some(name) = self.raw_text.take() {
            let end = self.raw_text_end(name);
            if end > self.pos {
                return Ok(Some(self.take_text(end)));
            }
        }
        if starts_markup(self.input, self.pos) {
            self.markup().map(Some)
        } else {
            let end = self.text_end();
            Ok(Some(self.take_text(end)))
        }
    }

    fn take_text(&mut self, end: usize) -> Token<'a> {
        let text = &self.input[self.pos..end];
        self.pos = end;
        Token::Text(text)
    }

    /// End of the text run at `pos`: the next `<` that opens markup.
    fn text_end(&self) -> usize {
        let mut i = self.pos + 1;
        while let Some(off) = memchr(b'<', &self.input[i.min(self.input.len())..]) {
            let lt = i + off;
            if starts_markup(self.input, lt) {
                return lt;
            }
            i = lt + 1;
        }
        self.input.len()
    }

    /// Offset of `</name` closing the raw-text element, or end of input.
    fn raw_text_end(&self, name: &[u8]) -> usize {
        let input = self.input;
        if name.eq_ignore_ascii_case(b"plaintext") {
            return input.len();
        }
        let mut i = self.pos;
        while let Some(off) = memmem::find(&input[i..], b"</") {
            let lt = i + off;
            let name_end = lt + 2 + name.len();
            let closes = input
                .get(lt + 2..name_end)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
                && input
                    .get(name_end)
                    .is_some_and(|&b| is_ws(b) || b == b'/' || b == b'>');
            if closes {
                return lt;
            }
            i = lt + 2;
        }
        input.len()
    }

    /// Lexes the markup at `pos`, which `starts_markup` has accepted.
    fn markup(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];

        if rest.starts_with(b"<!--") {
            self.pos = comment_end(input, start);
            return Ok(Token::Other);
        }
        match rest[1] {
            b'!' | b'?' => {
                self.pos = bogus_comment_end(input, start + 2);
                Ok(Token::Other)
            }
            b'/' if rest[2] == b'>' => {
                self.pos = start + 3;
                Ok(Token::Other)
            }
            b'/' if !rest[2].is_ascii_alphabetic() => {
                self.pos = bogus_comment_end(input, start + 2);
                Ok(Token::Other)
            }
            _ => self.tag(),
        }
    }

    fn tag(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let Some(gt) = find_tag_end(input, start) else {
            log::debug!("rejecting html: tag at byte {} not closed", start);
            return Err(CleanError::tokenize(start, "tag not closed at end of input"));
        };
        self.pos = gt + 1;

        let is_end = input[start + 1] == b'/';
        let name_start = if is_end { start + 2 } else { start + 1 };
        let name_len = input[name_start..gt]
            .iter()
            .position(|&b| is_ws(b) || b == b'/')
            .unwrap_or(gt - name_start);
        let name = &input[name_start..name_start + name_len];

        if is_end {
            return Ok(Token::EndTag(name));
        }
        if gt > name_start && input[gt - 1] == b'/' {
            return Ok(Token::SelfClosingTag(name));
        }
        if RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| name.eq_ignore_ascii_case(raw))
        {
            self.raw_text = Some(name);
        }
        Ok(Token::StartTag(name))
    }
}

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// A `<` opens markup only when followed by a tag name, `/`, `!` or `?`.
/// Anything else (`1 < 2`, a trailing `<`) is text.
fn starts_markup(input: &[u8], i: usize) -> bool {
    if input.get(i) != Some(&b'<') {
        return false;
    }
    match input.get(i + 1) {
        Some(b) if b.is_ascii_alphabetic() => true,
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => input.get(i + 2).is_some(),
        _ => false,
    }
}

/// Find the `>` closing the tag that starts at `i`, skipping quoted values.
fn find_tag_end(input: &[u8], mut i: usize) -> Option<usize> {
    i += 1;
    let mut quote: u8 = 0;
    while i < input.len() {
        let b = input[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Offset past a `<!--` comment; an unterminated comment runs to end of input.
fn comment_end(input: &[u8], start: usize) -> usize {
    let body = start + 4;
    let rest = &input[body..];
    if rest.starts_with(b">") {
        return body + 1;
    }
    if rest.starts_with(b"->") {
        return body + 2;
    }
    memmem::find(rest, b"-->").map_or(input.len(), |off| body + off + 3)
}

/// Offset past the next `>` at or after `from`, or end of input.
fn bogus_comment_end(input: &[u8], from: usize) -> usize {
    let from = from.min(input.len());
    memchr(b'>', &input[from..]).map_or(input.len(), |off| from + off + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(input: &str) -> Vec<(Token<'_>, usize)> {
        let mut tokenizer = Tokenizer::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(token) = tokenizer.next_token().unwrap() {
            out.push((token, tokenizer.position()));
        }
        out
    }

    fn tokens(input: &str) -> Vec<Token<'_>> {
        collect(input).into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(TagName::classify(b"b"), TagName::Style(Style::Bold));
        assert_eq!(TagName::classify(b"BR"), TagName::Break);
        assert_eq!(TagName::classify(b"span"), TagName::Other);
    }

    #[test]
    fn test_token_kinds() {
        assert_eq!(
            tokens("a<i>b</i><br/><span>c</span><!-- x --><!DOCTYPE html><?pi?>"),
            vec![
                Token::Text(b"a"),
                Token::StartTag(b"i"),
                Token::Text(b"b"),
                Token::EndTag(b"i"),
                Token::SelfClosingTag(b"br"),
                Token::StartTag(b"span"),
                Token::Text(b"c"),
                Token::EndTag(b"span"),
                Token::Other,
                Token::Other,
                Token::Other,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let positions: Vec<usize> = collect("<b>hi</b>").into_iter().map(|(_, p)| p).collect();
        assert_eq!(positions, vec![3, 5, 9]);
    }

    #[test]
    fn test_tag_with_attributes() {
        assert_eq!(
            collect(r#"<b class="x>y">z</b >"#),
            vec![
                (Token::StartTag(b"b"), 15),
                (Token::Text(b"z"), 16),
                (Token::EndTag(b"b"), 21),
            ]
        );
        assert_eq!(tokens("<br />"), vec![Token::SelfClosingTag(b"br")]);
    }

    #[test]
    fn test_entities_stay_in_one_run() {
        assert_eq!(tokens("Tom &amp; Jerry"), vec![Token::Text(b"Tom &amp; Jerry")]);
        assert_eq!(tokens("AT&T &nbsp x"), vec![Token::Text(b"AT&T &nbsp x")]);
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        assert_eq!(tokens("1 < 2 > 0"), vec![Token::Text(b"1 < 2 > 0")]);
        assert_eq!(tokens("a<"), vec![Token::Text(b"a<")]);
        assert_eq!(tokens("a</"), vec![Token::Text(b"a</")]);
        assert_eq!(
            tokens("x<3<b>y"),
            vec![Token::Text(b"x<3"), Token::StartTag(b"b"), Token::Text(b"y")]
        );
    }

    #[test]
    fn test_raw_text_elements() {
        assert_eq!(
            tokens("<script>if(a<b)x()</b></script>!"),
            vec![
                Token::StartTag(b"script"),
                Token::Text(b"if(a<b)x()</b>"),
                Token::EndTag(b"script"),
                Token::Text(b"!"),
            ]
        );
        assert_eq!(
            tokens("<STYLE></STYLE>"),
            vec![Token::StartTag(b"STYLE"), Token::EndTag(b"STYLE")]
        );
        assert_eq!(
            tokens("<title>a</titles></title>"),
            vec![
                Token::StartTag(b"title"),
                Token::Text(b"a</titles>"),
                Token::EndTag(b"title"),
            ]
        );
    }

    #[test]
    fn test_unterminated_raw_text_runs_to_end() {
        assert_eq!(
            tokens("<script>x<b>"),
            vec![Token::StartTag(b"script"), Token::Text(b"x<b>")]
        );
    }

    #[test]
    fn test_odd_markup_is_other() {
        assert_eq!(tokens("a</>b"), vec![Token::Text(b"a"), Token::Other, Token::Text(b"b")]);
        assert_eq!(tokens("</ x>y"), vec![Token::Other, Token::Text(b"y")]);
        assert_eq!(tokens("<!-->a"), vec![Token::Other, Token::Text(b"a")]);
        assert_eq!(tokens("<!-- open"), vec![Token::Other]);
    }

    #[test]
    fn test_unclosed_tag_is_error() {
        let mut tokenizer = Tokenizer::new(b"text <b");
        assert_eq!(tokenizer.next_token().unwrap(), Some(Token::Text(b"text ")));
        let err = tokenizer.next_token().unwrap_err();
        assert_eq!(err, CleanError::tokenize(5, "tag not closed at end of input"));
    }

    #[test]
    fn test_empty_input() {
        assert!(collect("").is_empty());
    }
}
