//! Snapshot encoding: JSON compressed with gzip.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{MicroSearchError, Result};
use crate::snapshot::IndexSnapshot;

/// Default gzip compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Encodes and decodes [`IndexSnapshot`]s.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotCodec {
    level: u32,
}

impl Default for SnapshotCodec {
    fn default() -> Self {
        SnapshotCodec {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl SnapshotCodec {
    /// Create a codec with the given gzip level (0-9).
    pub fn new(level: u32) -> Result<Self> {
        if level > 9 {
            return Err(MicroSearchError::invalid_config(format!(
                "compression level must be between 0 and 9, got {level}"
            )));
        }
        Ok(SnapshotCodec { level })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Serialize and compress a snapshot.
    pub fn encode(&self, snapshot: &IndexSnapshot) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(snapshot)?;
        let mut encoder = GzEncoder::new(
            Vec::with_capacity(json.len() / 4),
            Compression::new(self.level),
        );
        encoder.write_all(&json)?;
        Ok(encoder.finish()?)
    }

    /// Decompress and deserialize a snapshot.
    ///
    /// Any failure is reported as a deserialization error.
    pub fn decode(&self, bytes: &[u8]) -> Result<IndexSnapshot> {
        let mut json = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut json)
            .map_err(|e| MicroSearchError::deserialization(format!("invalid gzip data: {e}")))?;

        serde_json::from_slice(&json)
            .map_err(|e| MicroSearchError::deserialization(format!("invalid snapshot: {e}")))
    }
}
