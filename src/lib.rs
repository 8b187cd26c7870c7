//! Beneficial ownership extraction from Ukrainian company registry founder records.
//!
//! Founder records are free text written by registry clerks. Each record is
//! tokenized, checked for beneficial ownership markers, and then parsed with
//! gazetteer lookups and run-length heuristics into the owner's name,
//! country of residence and address.
//!
//! ```no_run
//! use edr_bo_extract::{Pipeline, Profile};
//!
//! let profile = Profile::load("profiles/heuristic.yaml")?;
//! let pipeline = Pipeline::from_profile(&profile)?;
//! let outcome = pipeline.process_founder(
//!     "Кінцевий бенефіціарний власник - Шевчук Анатолій Миколайович, Україна, м. Київ",
//!     false,
//! );
//! # Ok::<(), edr_bo_extract::Error>(())
//! ```

pub mod categorizer;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod fingerprint;
pub mod gazetteer;
pub mod parser;
pub mod pipeline;
pub mod preprocess;
pub mod span;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use categorizer::{Categorizer, MarkerSignals};
pub use config::{GazetteerSpec, MarkerPaths, ParserConfig, Profile};
pub use ensemble::{Ballot, Candidate, EnsembleOutcome, EnsembleParser};
pub use error::{Error, Result};
pub use fingerprint::{classify_fingerprint, fingerprint, Fingerprint, FingerprintClass};
pub use gazetteer::{membership, Gazetteer, Lexicon};
pub use parser::{
    address_span, Entity, EntityRanges, ExtractionResult, Extractor, HeuristicParser,
    RecordParser, ADDRESS_ANCHOR,
};
pub use pipeline::{FounderOutcome, Pipeline};
pub use preprocess::tokenize;
pub use span::{longest_span, true_runs, Span};
pub use stats::ExtractionStats;
