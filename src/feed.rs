use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{FeedError, FeedResult};
use crate::prediction::Prediction;

/// Parse a JSON array of predictions. An empty array is rejected so callers
/// never hand the summary an empty batch by accident.
pub fn parse_predictions_json(raw: &str) -> FeedResult<Vec<Prediction>> {
    let batch: Vec<Prediction> = serde_json::from_str(raw)?;
    if batch.is_empty() {
        return Err(FeedError::EmptyBatch);
    }
    Ok(batch)
}

pub fn load_predictions(path: &Path) -> FeedResult<Vec<Prediction>> {
    let raw = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let batch = parse_predictions_json(&raw)?;
    debug!(target: "signal_fusion::feed", path = %path.display(), matches = batch.len(), "loaded batch");
    Ok(batch)
}
