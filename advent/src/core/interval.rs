//! Half-open integer spans used to push whole seed ranges through an almanac.

/// A half-open interval `[start, end)`.
///
/// `start <= end` always holds; an empty span has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    start: i64,
    end: i64,
}

impl Span {
    /// Build `[start, end)`, clamping `end` up to `start` when reversed.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Build `[start, start + len)`. `None` if `len` is negative or the end overflows.
    pub fn from_len(start: i64, len: i64) -> Option<Self> {
        if len < 0 {
            return None;
        }
        let end = start.checked_add(len)?;
        Some(Self { start, end })
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end
    }

    /// Overlapping part of two spans, `None` when they do not overlap.
    pub fn intersection(&self, other: Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Span { start, end })
    }

    /// Parts of `self` left of and right of `other`, each `None` when empty.
    pub fn difference(&self, other: Span) -> (Option<Span>, Option<Span>) {
        let left = Span::new(self.start, self.end.min(other.start));
        let right = Span::new(self.start.max(other.end), self.end);
        (
            (!left.is_empty()).then_some(left),
            (!right.is_empty()).then_some(right),
        )
    }

    /// Move the span by `offset`. Callers guarantee the result fits in `i64`.
    pub fn shift(&self, offset: i64) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Sort spans and merge overlapping or touching neighbours, dropping empties.
pub fn coalesce(mut spans: Vec<Span>) -> Vec<Span> {
    spans.retain(|span| !span.is_empty());
    spans.sort_unstable();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}
