use std::ops::Range;

/// A byte range in the XML source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// A zero-length span at `offset`.
    pub fn point(offset: usize) -> Self {
        Self::new(offset..offset)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn to_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

/// Converts a 1-based row/column position into a byte offset into `source`.
///
/// Columns count characters, not bytes. Positions past the end clamp to the
/// source length.
pub(crate) fn offset_of(source: &str, row: u32, col: u32) -> usize {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == row as usize {
            let column_bytes: usize = line
                .chars()
                .take(col.saturating_sub(1) as usize)
                .map(char::len_utf8)
                .sum();
            return offset + column_bytes;
        }
        offset += line.len();
    }
    source.len()
}
