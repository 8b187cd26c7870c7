//! Token spans and the run scanner shared by fingerprinting and extraction.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Half-open token index range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
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

    /// Also true for inverted spans.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Tokens covered by the span joined with single spaces.
    ///
    /// The span is clamped to `tokens`, so an out-of-range or inverted span
    /// yields only the tokens that exist (possibly an empty string).
    pub fn join<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let end = self.end.min(tokens.len());
        let start = self.start.min(end);
        tokens[start..end]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Span> for (usize, usize) {
    fn from(s: Span) -> Self {
        (s.start, s.end)
    }
}

/// Iterator over maximal runs of `true` in a classification vector.
///
/// Runs of `false` yield nothing.
#[derive(Debug, Clone)]
pub struct TrueRuns<'a> {
    vector: &'a [bool],
    pos: usize,
}

impl Iterator for TrueRuns<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let start = self.pos + self.vector[self.pos..].iter().position(|&b| b)?;
        let len = self.vector[start..].iter().take_while(|&&b| b).count();
        self.pos = start + len;
        Some(start..self.pos)
    }
}

pub fn true_runs(vector: &[bool]) -> TrueRuns<'_> {
    TrueRuns { vector, pos: 0 }
}

/// Longest run of `true`. Ties go to the earliest run.
pub fn longest_span(vector: &[bool]) -> Option<Span> {
    true_runs(vector)
        .fold(None::<Range<usize>>, |best, run| match best {
            Some(b) if b.len() >= run.len() => Some(b),
            _ => Some(run),
        })
        .map(Span::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(v: &[u8]) -> Vec<bool> {
        v.iter().map(|&b| b == 1).collect()
    }

    #[test]
    fn test_true_runs() {
        let v = bits(&[1, 1, 0, 1, 1, 1, 0]);
        let runs: Vec<_> = true_runs(&v).collect();
        assert_eq!(runs, vec![0..2, 3..6]);
        assert_eq!(true_runs(&[]).count(), 0);
        assert_eq!(true_runs(&bits(&[0, 0, 0])).count(), 0);
        assert_eq!(true_runs(&bits(&[0, 1])).collect::<Vec<_>>(), vec![1..2]);
    }

    #[test]
    fn test_longest_span() {
        assert_eq!(
            longest_span(&bits(&[1, 1, 0, 1, 1, 1, 0])),
            Some(Span::new(3, 6))
        );
        assert_eq!(longest_span(&bits(&[0, 1, 1, 0, 1])), Some(Span::new(1, 3)));
        assert_eq!(longest_span(&bits(&[0, 0, 0])), None);
        assert_eq!(longest_span(&[]), None);
    }

    #[test]
    fn test_longest_span_tie_goes_to_first() {
        assert_eq!(
            longest_span(&bits(&[1, 1, 0, 1, 1, 0, 1, 1])),
            Some(Span::new(0, 2))
        );
    }

    #[test]
    fn test_join_and_overlap() {
        let tokens = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(Span::new(3, 6).join(&tokens), "d e f");
        assert!(Span::new(0, 3).overlaps(&Span::new(2, 4)));
        assert!(!Span::new(0, 2).overlaps(&Span::new(2, 4)));
        assert!(Span::new(3, 2).is_empty());
    }

    #[test]
    fn test_join_clamps_to_tokens() {
        let tokens = ["a", "b", "c"];
        assert_eq!(Span::new(1, 10).join(&tokens), "b c");
        assert_eq!(Span::new(5, 8).join(&tokens), "");
        assert_eq!(Span::new(2, 1).join(&tokens), "");
        assert_eq!(Span::new(0, 1).join::<&str>(&[]), "");
    }
}
