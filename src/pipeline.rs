//! Tokenize, categorize and parse founder records.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::categorizer::Categorizer;
use crate::config::Profile;
use crate::error::Result;
use crate::parser::{ExtractionResult, Extractor, RecordParser};
use crate::preprocess::tokenize;

/// What the pipeline learned from one founder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FounderOutcome {
    #[serde(rename = "Raw founder record")]
    pub tokens: Vec<String>,
    #[serde(rename = "Is beneficial owner")]
    pub is_beneficial_owner: bool,
    #[serde(rename = "Beneficial ownership absent")]
    pub is_absent: bool,
    #[serde(rename = "Owner is founder")]
    pub is_reference: bool,
    /// Set only for beneficial ownership records.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ExtractionResult>,
}

#[derive(Debug)]
pub struct Pipeline {
    categorizer: Categorizer,
    parser: Extractor,
}

impl Pipeline {
    pub fn new(categorizer: Categorizer, parser: Extractor) -> Self {
        Self {
            categorizer,
            parser,
        }
    }

    /// Load every resource the profile names.
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Ok(Self::new(profile.build_categorizer()?, profile.build_parser()?))
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn parser(&self) -> &Extractor {
        &self.parser
    }

    pub fn process_tokens(&self, tokens: Vec<String>, include_range: bool) -> FounderOutcome {
        let signals = self.categorizer.signals(&tokens);
        let owner = signals
            .beneficial_ownership
            .then(|| self.parser.parse(&tokens, include_range));
        debug!(?signals, found = owner.is_some(), "processed founder record");

        FounderOutcome {
            tokens,
            is_beneficial_owner: signals.beneficial_ownership,
            is_absent: signals.absent,
            is_reference: signals.reference,
            owner,
        }
    }

    pub fn process_founder(&self, record: &str, include_range: bool) -> FounderOutcome {
        self.process_tokens(tokenize(record), include_range)
    }

    /// Process records in parallel. Output order matches input order.
    pub fn process_batch<S>(&self, records: &[S], include_range: bool) -> Vec<FounderOutcome>
    where
        S: AsRef<str> + Sync,
    {
        records
            .par_iter()
            .map(|r| self.process_founder(r.as_ref(), include_range))
            .collect()
    }
}
