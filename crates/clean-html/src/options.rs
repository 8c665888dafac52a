// ABOUTME: Configuration for span extraction and cleaning, with Default and fluent setters.
// ABOUTME: Controls which br spellings are rewritten to a single space.

/// Which line-break spellings are rewritten to a single space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakTags {
    /// `<br>`, `<br/>` and `<br />`.
    #[default]
    AnyForm,
    /// Only the self-closing `<br/>` and `<br />`.
    SelfClosingOnly,
}

/// Options shared by the extraction and cleaning entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub break_tags: BreakTags,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn break_tags(mut self, break_tags: BreakTags) -> Self {
        self.break_tags = break_tags;
        self
    }

    pub(crate) fn breaks_on_start_tag(&self) -> bool {
        self.break_tags == BreakTags::AnyForm
    }
}
