//! Python bindings for the extraction pipeline.

use std::str::FromStr;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::Profile;
use crate::error::Error;
use crate::parser::{Entity, ExtractionResult, RecordParser};
use crate::pipeline::{FounderOutcome, Pipeline};
use crate::preprocess::tokenize;

impl From<Error> for PyErr {
    fn from(e: Error) -> Self {
        match e {
            Error::ResourceUnavailable { .. } => PyIOError::new_err(e.to_string()),
            _ => PyValueError::new_err(e.to_string()),
        }
    }
}

/// Beneficial owner returned to Python
#[pyclass]
#[derive(Clone)]
struct BeneficialOwner {
    #[pyo3(get)]
    name: Option<String>,
    #[pyo3(get)]
    country: Option<String>,
    #[pyo3(get)]
    address: Option<String>,
    #[pyo3(get)]
    name_rng: Option<(usize, usize)>,
    #[pyo3(get)]
    country_rng: Option<(usize, usize)>,
    #[pyo3(get)]
    address_rng: Option<(usize, usize)>,
}

impl From<ExtractionResult> for BeneficialOwner {
    fn from(res: ExtractionResult) -> Self {
        let rng = |e| res.span(e).map(<(usize, usize)>::from);
        Self {
            name_rng: rng(Entity::Name),
            country_rng: rng(Entity::Country),
            address_rng: rng(Entity::Address),
            name: res.name,
            country: res.country,
            address: res.address,
        }
    }
}

/// One processed founder record returned to Python
#[pyclass]
#[derive(Clone)]
struct FounderRecord {
    #[pyo3(get)]
    tokens: Vec<String>,
    #[pyo3(get)]
    is_beneficial_owner: bool,
    #[pyo3(get)]
    is_absent: bool,
    #[pyo3(get)]
    is_reference: bool,
    #[pyo3(get)]
    owner: Option<BeneficialOwner>,
}

impl From<FounderOutcome> for FounderRecord {
    fn from(out: FounderOutcome) -> Self {
        Self {
            tokens: out.tokens,
            is_beneficial_owner: out.is_beneficial_owner,
            is_absent: out.is_absent,
            is_reference: out.is_reference,
            owner: out.owner.map(BeneficialOwner::from),
        }
    }
}

/// Categorizer and parser built from a YAML profile
#[pyclass]
struct FounderParser {
    pipeline: Pipeline,
}

#[pymethods]
impl FounderParser {
    #[new]
    fn new(profile_path: String) -> PyResult<Self> {
        let profile = Profile::load(&profile_path)?;
        Ok(Self {
            pipeline: Pipeline::from_profile(&profile)?,
        })
    }

    fn classify(&self, tokens: Vec<String>) -> bool {
        self.pipeline.categorizer().classify(&tokens)
    }

    fn is_absent(&self, tokens: Vec<String>) -> bool {
        self.pipeline.categorizer().is_absent(&tokens)
    }

    fn is_reference(&self, tokens: Vec<String>) -> bool {
        self.pipeline.categorizer().is_reference(&tokens)
    }

    #[pyo3(signature = (tokens, include_range = false))]
    fn parse(&self, tokens: Vec<String>, include_range: bool) -> BeneficialOwner {
        self.pipeline.parser().parse(&tokens, include_range).into()
    }

    #[pyo3(signature = (record, include_range = false))]
    fn process_founder(&self, record: &str, include_range: bool) -> FounderRecord {
        self.pipeline.process_founder(record, include_range).into()
    }

    #[pyo3(signature = (records, include_range = false))]
    fn process_batch(&self, records: Vec<String>, include_range: bool) -> Vec<FounderRecord> {
        self.pipeline
            .process_batch(&records, include_range)
            .into_iter()
            .map(FounderRecord::from)
            .collect()
    }
}

/// Tokenize a raw founder record
#[pyfunction]
#[pyo3(name = "tokenize")]
fn tokenize_record(record: &str) -> Vec<String> {
    tokenize(record)
}

/// Send library logs to stderr at the given level (TRACE/DEBUG/INFO/WARN/ERROR)
#[pyfunction]
#[pyo3(signature = (level = "INFO"))]
fn init_logging(level: &str) -> PyResult<()> {
    let max_level = tracing::Level::from_str(level)
        .map_err(|e| PyValueError::new_err(format!("Invalid log level {}: {}", level, e)))?;
    // Already installed is fine
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

#[pymodule]
fn edr_bo_extract(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tokenize_record, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    m.add_class::<FounderParser>()?;
    m.add_class::<BeneficialOwner>()?;
    m.add_class::<FounderRecord>()?;
    Ok(())
}
