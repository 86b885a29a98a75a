//! Start-up inventory loaded from a JSON file.

use std::path::Path;

use domain::RoomAvailability;
use thiserror::Error;

/// Errors raised while loading seed inventory.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON array of availability records from `path`.
pub fn load(path: &Path) -> Result<Vec<RoomAvailability>, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    parse(&raw)
}

/// Parses a JSON array of availability records.
pub fn parse(raw: &str) -> Result<Vec<RoomAvailability>, SeedError> {
    Ok(serde_json::from_str(raw)?)
}
