//! Gzip + JSON loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use super::{DataError, MeasurementLog};

/// Load and validate a measurement log from `path`.
///
/// The file must contain gzip-compressed JSON. Decompression is
/// streaming, so the uncompressed document is never held as one string.
/// Corrupt gzip framing surfaces as [`DataError::Json`] like any other
/// malformed document.
pub fn load_log(path: &Path) -> Result<MeasurementLog, DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(GzDecoder::new(file));
    let log: MeasurementLog = serde_json::from_reader(reader)?;
    log.validate()?;
    debug!(runs = log.len(), path = %path.display(), "decoded measurement log");
    Ok(log)
}
