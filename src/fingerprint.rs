//! Run-length fingerprints of per-token gazetteer matches.
//!
//! A fingerprint is the list of lengths of the maximal `true` runs in a
//! classification vector: `[T, T, F, T, T, T, F]` becomes `(2, 3)`. Its
//! shape says how name-like a record is. Ukrainian full names are usually
//! three words (given name, patronymic, family name), so a single run of
//! three is the cleanest signal.

use std::fmt;

use serde::Serialize;

use crate::span::true_runs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint(Vec<usize>);

impl Fingerprint {
    pub fn of(vector: &[bool]) -> Self {
        Self(true_runs(vector).map(|run| run.len()).collect())
    }

    pub fn runs(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn longest(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }

    /// Exactly one run, with a length in `min..=max`.
    pub fn is_single_run_within(&self, min: usize, max: usize) -> bool {
        matches!(self.0.as_slice(), [len] if (min..=max).contains(len))
    }

    pub fn class(&self) -> FingerprintClass {
        FingerprintClass::of(self)
    }
}

impl From<Vec<usize>> for Fingerprint {
    fn from(runs: Vec<usize>) -> Self {
        Self(runs)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let runs: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "({})", runs.join(", "))
    }
}

/// Bins a name fingerprint falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FingerprintClass {
    /// One run of exactly three.
    Ideal = 1,
    /// Longest run is three, plus other runs.
    AlmostIdeal = 2,
    /// One run longer than three.
    Complicated = 3,
    /// Longest run is over three, plus other runs.
    ComplicatedAndStrange = 4,
    Empty = 5,
    /// Only single-token runs.
    AlmostEmpty = 6,
    /// Longest run is two, like a partially recognized name.
    Incomplete = 7,
    Junk = 666,
}

impl FingerprintClass {
    /// First matching rule wins.
    pub fn of(fingerprint: &Fingerprint) -> Self {
        let Some(longest) = fingerprint.longest() else {
            return Self::Empty;
        };
        let single = fingerprint.runs().len() == 1;

        match longest {
            3 if single => Self::Ideal,
            3 => Self::AlmostIdeal,
            n if n > 3 && single => Self::Complicated,
            n if n > 3 => Self::ComplicatedAndStrange,
            1 => Self::AlmostEmpty,
            2 => Self::Incomplete,
            _ => Self::Junk,
        }
    }

    /// Classes with at least one run of three or more tokens.
    pub fn admits_name(self) -> bool {
        matches!(
            self,
            Self::Ideal | Self::AlmostIdeal | Self::Complicated | Self::ComplicatedAndStrange
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ideal => "IDEAL",
            Self::AlmostIdeal => "ALMOST_IDEAL",
            Self::Complicated => "COMPLICATED",
            Self::ComplicatedAndStrange => "COMPLICATED_AND_STRANGE",
            Self::Empty => "EMPTY",
            Self::AlmostEmpty => "ALMOST_EMPTY",
            Self::Incomplete => "INCOMPLETE",
            Self::Junk => "JUNK",
        }
    }
}

impl fmt::Display for FingerprintClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn fingerprint(vector: &[bool]) -> Fingerprint {
    Fingerprint::of(vector)
}

pub fn classify_fingerprint(fingerprint: &Fingerprint) -> FingerprintClass {
    FingerprintClass::of(fingerprint)
}
