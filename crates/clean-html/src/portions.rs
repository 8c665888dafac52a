// ABOUTME: Result types for span extraction: styled text spans and their cleaned-buffer offsets.
// ABOUTME: Portions pairs source-coordinate spans with index-aligned adjusted ranges.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One run of plain text in source coordinates plus the styles active over it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub range: Range<usize>,
    pub bold: bool,
    pub italic: bool,
}

/// Spans extracted from one input buffer.
///
/// `spans` index into the buffer the extraction ran over and mean nothing
/// against any other. `adjusted` is empty unless the input was also cleaned,
/// in which case `adjusted[i]` locates `spans[i]` inside the cleaned buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portions {
    pub spans: Vec<TextSpan>,
    pub adjusted: Vec<Range<usize>>,
}

impl Portions {
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn adjusted(&self) -> &[Range<usize>] {
        &self.adjusted
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Source slices covered by each span, in order.
    /// Spans that fall outside `source` yield empty slices.
    pub fn texts<'s>(&'s self, source: &'s [u8]) -> impl Iterator<Item = &'s [u8]> + 's {
        self.spans
            .iter()
            .map(move |span| source.get(span.range.clone()).unwrap_or_default())
    }

    /// Concatenation of every span's source text.
    pub fn plain_text(&self, source: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(source.len());
        for text in self.texts(source) {
            out.extend_from_slice(text);
        }
        out
    }
}
