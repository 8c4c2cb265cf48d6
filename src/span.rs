use std::ops::Range;

/// Location of a match inside an ingredient line
///
/// The offsets are zero-indexed byte offsets from the beginning of the line,
/// so they can be used to slice the original `&str`. Use
/// [`Span::to_chars_span`] to get character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// End (exclusive) offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the span as a range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Len of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same span but counted in characters of `source`
    ///
    /// `source` has to be the text the span was created from.
    pub fn to_chars_span(&self, source: &str) -> Span {
        let start = source[..self.start].chars().count();
        let len = source[self.range()].chars().count();
        Span::new(start, start + len)
    }
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(value: Span) -> Self {
        value.start..value.end
    }
}

impl<'h> From<regex::Match<'h>> for Span {
    fn from(value: regex::Match<'h>) -> Self {
        Self::new(value.start(), value.end())
    }
}
