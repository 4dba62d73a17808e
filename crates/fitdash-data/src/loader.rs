use std::io::ErrorKind;
use std::path::Path;

use fitdash_common::{ActivityRecord, ParsingConfig};
use tracing::{debug, error, info};

use crate::error::{FieldCoercionWarning, LoadError, ParseError};
use crate::parser::{parse_csv_bytes, ParseOutcome};

/// The single source dataset for a session.
///
/// Built once per load and never mutated; aggregates, scales and charts
/// borrow it and are recomputed whenever a new dataset replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<ActivityRecord>,
    warnings: Vec<FieldCoercionWarning>,
    rejected: Vec<ParseError>,
    missing_columns: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<ActivityRecord>) -> Self {
        Self { records, ..Default::default() }
    }

    pub(crate) fn from_parts(outcome: ParseOutcome, missing_columns: Vec<String>) -> Self {
        Self {
            records: outcome.records,
            warnings: outcome.warnings,
            rejected: outcome.rejected,
            missing_columns,
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[FieldCoercionWarning] {
        &self.warnings
    }

    /// Rows dropped because they failed validation.
    pub fn rejected(&self) -> &[ParseError] {
        &self.rejected
    }

    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse the activity export at `path`.
pub async fn load_dataset(
    path: impl AsRef<Path>,
    parsing: &ParsingConfig,
) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    debug!("Loading activity data from {:?}", path);

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(source) => return Err(LoadError::Io { path: path.to_path_buf(), source }),
    };

    let dataset = parse_csv_bytes(&bytes, parsing)?;
    info!(
        "Loaded {} activity records from {:?} ({} dropped, {} coerced fields)",
        dataset.len(),
        path,
        dataset.rejected().len(),
        dataset.warnings().len()
    );
    Ok(dataset)
}

/// Like [`load_dataset`], but a failed load is reported and yields an
/// empty dataset so the dashboard can render its placeholder state.
pub async fn load_or_empty(path: impl AsRef<Path>, parsing: &ParsingConfig) -> Dataset {
    let path = path.as_ref();
    match load_dataset(path, parsing).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Error loading or parsing {:?}: {}", path, e);
            Dataset::default()
        }
    }
}
