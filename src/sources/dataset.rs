use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TripError};

pub const DESTINATION_COLUMN: &str = "Destination";
pub const COST_COLUMN: &str = "Accommodation cost";

/// CSV file of past trips, keyed by destination name
#[derive(Debug, Clone)]
pub struct TravelDataset {
    path: PathBuf,
}

impl TravelDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accommodation cost of the first row whose destination matches exactly.
    ///
    /// The file is re-read on every call. Returns `Ok(None)` when no row
    /// matches; a matching row with an unparseable cost is an error.
    pub fn accommodation_cost(&self, destination: &str) -> Result<Option<u32>> {
        let mut reader = csv::Reader::from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let destination_idx = column_index(&headers, DESTINATION_COLUMN)?;
        let cost_idx = column_index(&headers, COST_COLUMN)?;

        for record in reader.records() {
            let record = record?;
            if record.get(destination_idx) != Some(destination) {
                continue;
            }

            let raw = record.get(cost_idx).unwrap_or_default();
            debug!(
                target: "travel::dataset",
                destination,
                raw_cost = raw,
                "matched dataset row"
            );

            return parse_cost(raw)
                .map(Some)
                .ok_or_else(|| TripError::InvalidCost {
                    destination: destination.to_string(),
                    value: raw.to_string(),
                });
        }

        Ok(None)
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or(TripError::MissingColumn(name))
}

/// Strip a leading `$` and thousands separators, e.g. `"$1,200"` -> `1200`.
///
/// Only digits may remain, so signs such as `"$+1,200"` are rejected.
pub fn parse_cost(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
