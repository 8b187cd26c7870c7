//! Static word lists used for membership-based token classification.
//!
//! Names, countries and ownership markers are plain UTF-8 text files, one
//! entry per line. Entries are trimmed and lowercased on load; lookups are
//! exact-string afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::error::{Error, Result};

/// Anything that can answer "is this token one of mine?".
pub trait Lexicon: Send + Sync {
    fn contains(&self, token: &str) -> bool;
}

impl Lexicon for HashSet<String> {
    fn contains(&self, token: &str) -> bool {
        HashSet::contains(self, token)
    }
}

/// Per-token membership vector of `tokens` against `lexicon`.
pub fn membership<L, S>(lexicon: &L, tokens: &[S]) -> Vec<bool>
where
    L: Lexicon + ?Sized,
    S: AsRef<str>,
{
    tokens.iter().map(|t| lexicon.contains(t.as_ref())).collect()
}

/// Immutable lookup set built once from include/exclude word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gazetteer {
    entries: HashSet<String>,
}

impl Gazetteer {
    /// Union of all `include` lists minus the union of all `exclude` lists.
    ///
    /// Included entries of one character or less are dropped; excluded
    /// entries are taken as-is.
    pub fn load<P: AsRef<Path>>(include: &[P], exclude: &[P]) -> Result<Self> {
        let mut entries = HashSet::new();
        for path in include {
            entries.extend(
                read_entries(path.as_ref())?
                    .into_iter()
                    .filter(|e| e.chars().count() > 1),
            );
        }
        info!("{} chunks added to the chunks dict", entries.len());

        let mut junk = HashSet::new();
        for path in exclude {
            junk.extend(read_entries(path.as_ref())?);
        }
        info!("{} chunks added to the junk dict", junk.len());

        entries.retain(|e| !junk.contains(e));
        info!("{} chunks left after filtering junk", entries.len());

        Ok(Self { entries })
    }

    /// Load a single marker list. No length filter is applied.
    pub fn load_markers(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let entries: HashSet<String> = read_entries(path)?.into_iter().collect();
        info!("Loaded {} markers from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    /// Build from in-memory entries, normalized the same way as files.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .filter_map(|e| normalize(e.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any token is in the gazetteer.
    pub fn intersects<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        tokens.iter().any(|t| self.entries.contains(t.as_ref()))
    }
}

impl Lexicon for Gazetteer {
    fn contains(&self, token: &str) -> bool {
        self.entries.contains(token)
    }
}

fn normalize(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn read_entries(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read word list {}: {}", path.display(), e);
        Error::resource(path, e)
    })?;
    Ok(content.lines().filter_map(normalize).collect())
}
