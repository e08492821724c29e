//! Persisted navigation tuning
//!
//! Stores field-adjusted tuning that can be persisted to flash and
//! loaded on boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::NavTuning;

/// Magic number to identify valid tuning data
pub const TUNING_MAGIC: u32 = 0x4D4F5754; // "MOWT"

/// Current tuning data version
pub const TUNING_VERSION: u8 = 1;

/// Why a loaded tuning record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Magic number mismatch, the flash page holds something else
    BadMagic,
    /// Record written by an incompatible firmware version
    BadVersion,
    /// Checksum mismatch, the record is corrupt
    BadCrc,
}

/// Complete tuning data stored in flash
///
/// Wraps the tuning values with a header for data validation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TuningData {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Tuning values
    pub tuning: NavTuning,
    /// CRC32 checksum (calculated over magic..tuning)
    pub crc: u32,
}

impl Default for TuningData {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningData {
    /// Create tuning data holding the firmware defaults
    pub const fn new() -> Self {
        Self {
            magic: TUNING_MAGIC,
            version: TUNING_VERSION,
            tuning: NavTuning::new(),
            crc: 0,
        }
    }

    /// Check if the data is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == TUNING_MAGIC && self.version == TUNING_VERSION
    }

    /// Full validation of a record read back from flash
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.magic != TUNING_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if self.version != TUNING_VERSION {
            return Err(ConfigError::BadVersion);
        }
        if !self.verify_crc() {
            return Err(ConfigError::BadCrc);
        }
        Ok(())
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);

        let pursuit = &self.tuning.pursuit;
        crc = crc32_update(crc, &pursuit.cte_gain.to_le_bytes());
        crc = crc32_update(crc, &pursuit.heading_gain.to_le_bytes());
        crc = crc32_update(crc, &pursuit.lookahead_mm.to_le_bytes());
        crc = crc32_update(crc, &pursuit.base_speed.to_le_bytes());
        crc = crc32_update(crc, &pursuit.max_output.to_le_bytes());
        crc = crc32_update(crc, &pursuit.completion_threshold_mm.to_le_bytes());
        crc = crc32_update(crc, &self.tuning.ring_spacing_mm.to_le_bytes());
        crc = crc32_update(crc, &self.tuning.on_path_threshold_mm.to_le_bytes());

        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
