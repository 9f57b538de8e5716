use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` in a source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `other` lies entirely within `self`.
    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest span covering both.
    pub fn join(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_and_join() {
        let outer = Span::new(2, 10);
        assert!(outer.covers(Span::new(2, 10)));
        assert!(outer.covers(Span::new(3, 5)));
        assert!(!outer.covers(Span::new(1, 5)));
        assert_eq!(Span::new(4, 6).join(Span::new(1, 3)), Span::new(1, 6));
        assert!(outer.contains_offset(9));
        assert!(!outer.contains_offset(10));
    }
}
