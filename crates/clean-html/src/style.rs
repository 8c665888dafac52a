// ABOUTME: Style categories recognised in markup and the per-category nesting depth table.
// ABOUTME: Maps tag names to Bold/Italic and emits their canonical open/close literals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A style axis tracked while walking the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    Bold,
    Italic,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Bold, Style::Italic];

    /// Returns the style a tag name selects, ignoring ASCII case.
    pub fn from_tag_name(name: &[u8]) -> Option<Style> {
        if name.eq_ignore_ascii_case(b"b") {
            Some(Style::Bold)
        } else if name.eq_ignore_ascii_case(b"i") {
            Some(Style::Italic)
        } else {
            None
        }
    }

    /// Canonical opening tag written to cleaned output.
    pub fn open_tag(self) -> &'static str {
        match self {
            Style::Bold => "<b>",
            Style::Italic => "<i>",
        }
    }

    /// Canonical closing tag written to cleaned output.
    pub fn close_tag(self) -> &'static str {
        match self {
            Style::Bold => "</b>",
            Style::Italic => "</i>",
        }
    }

    fn index(self) -> usize {
        match self {
            Style::Bold => 0,
            Style::Italic => 1,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
        };
        write!(f, "{}", s)
    }
}

/// Close attempted on a style whose depth is already zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthUnderflow(pub Style);

/// Open-tag counters, one per style. Never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDepth {
    depths: [usize; 2],
}

impl StyleDepth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, style: Style) {
        self.depths[style.index()] += 1;
    }

    /// Decrements the counter for `style`, leaving it untouched on underflow.
    pub fn close(&mut self, style: Style) -> Result<(), DepthUnderflow> {
        let depth = &mut self.depths[style.index()];
        match depth.checked_sub(1) {
            Some(next) => {
                *depth = next;
                Ok(())
            }
            None => Err(DepthUnderflow(style)),
        }
    }

    pub fn depth(&self, style: Style) -> usize {
        self.depths[style.index()]
    }

    pub fn is_active(&self, style: Style) -> bool {
        self.depth(style) > 0
    }
}
