//! YAML pipeline profiles.
//!
//! A profile names every word-list resource and picks the parser strategy:
//!
//! ```yaml
//! markers:
//!   beneficial_ownership: datasets/beneficiary_ownership_markers.txt
//!   absent: datasets/beneficiary_ownership_absent_markers.txt
//!   reference: datasets/beneficiary_owner_is_founder_markers.txt
//! parser:
//!   kind: heuristic
//!   names:
//!     include: [datasets/names.txt]
//!     exclude: [datasets/names_junk.txt]
//!   countries:
//!     include: [datasets/countries.txt]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::categorizer::Categorizer;
use crate::ensemble::{EnsembleParser, DEFAULT_CUTOFF};
use crate::error::{Error, Result};
use crate::gazetteer::Gazetteer;
use crate::parser::{Extractor, HeuristicParser, RecordParser};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub markers: MarkerPaths,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPaths {
    pub beneficial_ownership: PathBuf,
    pub absent: PathBuf,
    pub reference: PathBuf,
}

/// Include/exclude word lists making up one gazetteer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerSpec {
    #[serde(default)]
    pub include: Vec<PathBuf>,
    #[serde(default)]
    pub exclude: Vec<PathBuf>,
}

impl GazetteerSpec {
    pub fn load(&self) -> Result<Gazetteer> {
        Gazetteer::load(&self.include, &self.exclude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParserConfig {
    Heuristic {
        names: GazetteerSpec,
        countries: GazetteerSpec,
    },
    Ensemble {
        voters: Vec<ParserConfig>,
        #[serde(default = "default_cutoff")]
        cutoff: usize,
    },
}

fn default_cutoff() -> usize {
    DEFAULT_CUTOFF
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            ParserConfig::Heuristic { names, countries } => {
                if names.include.is_empty() || countries.include.is_empty() {
                    return Err(Error::config(
                        "heuristic parser needs at least one names and one countries list",
                    ));
                }
                Ok(())
            }
            ParserConfig::Ensemble { voters, .. } => {
                if voters.is_empty() {
                    return Err(Error::config("ensemble parser needs at least one voter"));
                }
                voters.iter().try_for_each(ParserConfig::validate)
            }
        }
    }

    /// Load every gazetteer and build the parser.
    pub fn build(&self) -> Result<Extractor> {
        self.validate()?;
        match self {
            ParserConfig::Heuristic { names, countries } => Ok(Extractor::Heuristic(
                HeuristicParser::new(names.load()?, countries.load()?),
            )),
            ParserConfig::Ensemble { voters, cutoff } => {
                let voters = voters
                    .iter()
                    .map(|v| v.build().map(|p| Box::new(p) as Box<dyn RecordParser>))
                    .collect::<Result<Vec<_>>>()?;
                info!("Built ensemble of {} voters, cutoff {}", voters.len(), cutoff);
                Ok(Extractor::Ensemble(EnsembleParser::new(voters, *cutoff)))
            }
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        match self {
            ParserConfig::Heuristic { names, countries } => {
                for path in names
                    .include
                    .iter_mut()
                    .chain(names.exclude.iter_mut())
                    .chain(countries.include.iter_mut())
                    .chain(countries.exclude.iter_mut())
                {
                    resolve(base, path);
                }
            }
            ParserConfig::Ensemble { voters, .. } => {
                for v in voters {
                    v.resolve_paths(base);
                }
            }
        }
    }
}

impl Profile {
    /// Parse a profile; paths are kept as written.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let profile: Profile = serde_yaml::from_str(yaml)?;
        profile.parser.validate()?;
        Ok(profile)
    }

    /// Read a profile file. Relative paths resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| Error::resource(path, e))?;
        let mut profile = Self::from_yaml_str(&yaml)?;
        if let Some(base) = path.parent() {
            profile.resolve_paths(base);
        }
        info!("Loaded profile {}", path.display());
        Ok(profile)
    }

    pub fn build_categorizer(&self) -> Result<Categorizer> {
        Categorizer::load(
            &self.markers.beneficial_ownership,
            &self.markers.absent,
            &self.markers.reference,
        )
    }

    pub fn build_parser(&self) -> Result<Extractor> {
        self.parser.build()
    }

    fn resolve_paths(&mut self, base: &Path) {
        resolve(base, &mut self.markers.beneficial_ownership);
        resolve(base, &mut self.markers.absent);
        resolve(base, &mut self.markers.reference);
        self.parser.resolve_paths(base);
    }
}

fn resolve(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}
