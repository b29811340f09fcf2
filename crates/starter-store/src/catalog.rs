//! Employee probability catalog: fetched per request from the bucket as CSV.
//!
//! The CSV carries one row per employee with a name, a grade and two pairs of
//! weight columns, one pair per [`ProbabilityGroup`]. Loading maps the pair for
//! the requested group onto [`ProbabilityRecord`] and drops rows without a name.

use csv::{ReaderBuilder, StringRecord};
use starter_core::employee::{GRADE_COLUMN, NAME_COLUMN};
use starter_core::{ProbabilityGroup, ProbabilityRecord};
use tracing::info;

use crate::{ObjectStore, StoreError};

/// Bucket key of the catalog for a configuration version.
pub fn catalog_key(version: &str) -> String {
    format!("configurations/{version}/EmployeeProbability.csv")
}

/// Download and parse the catalog for `version`, mapped for `group`.
pub async fn download_probabilities<S: ObjectStore + ?Sized>(
    store: &S,
    version: &str,
    group: ProbabilityGroup,
) -> Result<Vec<ProbabilityRecord>, StoreError> {
    let key = catalog_key(version);
    info!(key = %key, group = %group, "downloading probabilities");
    let content = store.get_object(&key).await?;
    let records = parse_catalog(&content, group)?;
    info!(count = records.len(), "downloaded probabilities");
    Ok(records)
}

/// Parse catalog CSV content for `group`.
///
/// Blank weight cells read as `0.0`; any other non-numeric weight is an error.
pub fn parse_catalog(
    content: &str,
    group: ProbabilityGroup,
) -> Result<Vec<ProbabilityRecord>, StoreError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let name_idx = column(&headers, NAME_COLUMN)?;
    let grade_idx = column(&headers, GRADE_COLUMN)?;
    let probability_idx = column(&headers, group.probability_column())?;
    let shard_idx = column(&headers, group.shard_probability_column())?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let name = row.get(name_idx).unwrap_or("");
        if name.trim().is_empty() {
            continue;
        }

        records.push(ProbabilityRecord {
            name: name.to_string(),
            grade: row.get(grade_idx).unwrap_or("").to_string(),
            probability: weight(&row, probability_idx, line)?,
            shard_probability: weight(&row, shard_idx, line)?,
        });
    }
    Ok(records)
}

fn column(headers: &StringRecord, name: &str) -> Result<usize, StoreError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| StoreError::Catalog {
            row: 1,
            message: format!("missing column {name}"),
        })
}

fn weight(row: &StringRecord, idx: usize, line: u64) -> Result<f64, StoreError> {
    let raw = row.get(idx).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().map_err(|_| StoreError::Catalog {
        row: line,
        message: format!("invalid weight {raw:?}"),
    })
}
