use std::ops::Range;

/// Half-open row range `[start, end)` owned by one worker for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "chunk start {} past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Chunk> for Range<usize> {
    fn from(c: Chunk) -> Self {
        c.range()
    }
}
