//! Perimeter record layout
//!
//! A recorded boundary persists as its absolute origin followed by one
//! 16-bit delta pair per subsequent waypoint. Encoding writes into a
//! caller-supplied buffer; decoding is a zero-copy view that validates
//! the length once and then reads fields on demand.

/// Bytes holding the origin (two little-endian `i32`).
pub const ORIGIN_SIZE: usize = 8;

/// Bytes holding one delta (two little-endian `i16`).
pub const DELTA_SIZE: usize = 4;

/// One waypoint-to-waypoint step in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PathDelta {
    pub dx: i16,
    pub dy: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// Encode target cannot hold the record.
    BufferTooSmall,
    /// Fewer bytes than an origin.
    Truncated,
    /// Trailing bytes are not a whole number of deltas, or the record
    /// describes more waypoints than the consumer accepts.
    BadLength,
}

/// Encoded size of a record holding `count` waypoints. Zero waypoints
/// encode to nothing.
pub const fn encoded_len(count: usize) -> usize {
    if count == 0 {
        0
    } else {
        ORIGIN_SIZE + (count - 1) * DELTA_SIZE
    }
}

/// Writes a record into `buffer`, returning the number of bytes used.
pub fn encode_into(
    origin: (i32, i32),
    deltas: &[PathDelta],
    buffer: &mut [u8],
) -> Result<usize, WireError> {
    let needed = ORIGIN_SIZE + deltas.len() * DELTA_SIZE;
    if buffer.len() < needed {
        return Err(WireError::BufferTooSmall);
    }

    buffer[0..4].copy_from_slice(&origin.0.to_le_bytes());
    buffer[4..8].copy_from_slice(&origin.1.to_le_bytes());

    let mut offset = ORIGIN_SIZE;
    for delta in deltas {
        buffer[offset..offset + 2].copy_from_slice(&delta.dx.to_le_bytes());
        buffer[offset + 2..offset + 4].copy_from_slice(&delta.dy.to_le_bytes());
        offset += DELTA_SIZE;
    }
    Ok(needed)
}

/// Zero-copy view over an encoded perimeter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerimeterRecord<'a> {
    bytes: &'a [u8],
}

impl<'a> PerimeterRecord<'a> {
    /// Validates the overall shape. Field reads after a successful
    /// parse cannot fail.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, WireError> {
        if bytes.len() < ORIGIN_SIZE {
            return Err(WireError::Truncated);
        }
        if (bytes.len() - ORIGIN_SIZE) % DELTA_SIZE != 0 {
            return Err(WireError::BadLength);
        }
        Ok(Self { bytes })
    }

    pub fn origin(&self) -> (i32, i32) {
        let x = i32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]]);
        let y = i32::from_le_bytes([self.bytes[4], self.bytes[5], self.bytes[6], self.bytes[7]]);
        (x, y)
    }

    /// Number of waypoints described, origin included. Always at
    /// least 1.
    pub fn count(&self) -> usize {
        1 + (self.bytes.len() - ORIGIN_SIZE) / DELTA_SIZE
    }

    /// Delta `index` (0 is the step from the origin to the second
    /// waypoint), or `None` past the end.
    pub fn delta(&self, index: usize) -> Option<PathDelta> {
        if index >= self.count() - 1 {
            return None;
        }
        let offset = ORIGIN_SIZE + index * DELTA_SIZE;
        let dx = i16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]]);
        let dy = i16::from_le_bytes([self.bytes[offset + 2], self.bytes[offset + 3]]);
        Some(PathDelta { dx, dy })
    }

    pub fn deltas(&self) -> DeltaIter<'a> {
        DeltaIter {
            bytes: &self.bytes[ORIGIN_SIZE..],
        }
    }
}

/// Iterator over the deltas of a record.
#[derive(Debug, Clone)]
pub struct DeltaIter<'a> {
    bytes: &'a [u8],
}

impl Iterator for DeltaIter<'_> {
    type Item = PathDelta;

    fn next(&mut self) -> Option<PathDelta> {
        if self.bytes.len() < DELTA_SIZE {
            return None;
        }
        let dx = i16::from_le_bytes([self.bytes[0], self.bytes[1]]);
        let dy = i16::from_le_bytes([self.bytes[2], self.bytes[3]]);
        self.bytes = &self.bytes[DELTA_SIZE..];
        Some(PathDelta { dx, dy })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() / DELTA_SIZE;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DeltaIter<'_> {}
