//! Inward offsetting of a recorded perimeter
//!
//! Shrinks a counter-clockwise boundary loop toward its interior to
//! produce successive mowing rings. Each vertex moves along the angle
//! bisector of its two edges, scaled by an approximate miter factor.
//! Straight sections land exactly `distance_mm` inside the original
//! edge; corners overshoot a true miter join, which keeps coverage
//! overlap at the turns.

use crate::geometry::{dot_product, integer_sqrt, normalize_vector, Point, UNIT_SCALE};
use crate::path::WaypointPath;

/// Capacity of the offset ring, matching the source path.
pub const MAX_OFFSET_POINTS: usize = 1000;

/// Miter scale bounds, thousandths. 1000 is no correction.
const MITER_SCALE_MIN: i64 = 1000;
const MITER_SCALE_MAX: i64 = 5000;

/// Scale applied when edges meet at a right angle or sharper.
const SHARP_CORNER_SCALE: i64 = 2000;

/// Below this the half-angle cosine is too small to divide by.
const MIN_COS_HALF: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OffsetError {
    /// Offsetting needs at least three vertices.
    TooFewVertices,
    /// Negative offset distances are not meaningful.
    InvalidDistance,
    /// The source path holds more points than the ring can.
    CapacityExceeded,
}

/// Builds inward offset rings from a boundary path.
///
/// The ring buffer is owned here so repeated generation never
/// allocates. Results stay valid until the next call to
/// [`generate_inward`](Self::generate_inward).
#[derive(Debug)]
pub struct PathOffsetGenerator {
    points: heapless::Vec<Point, MAX_OFFSET_POINTS>,
    offset_mm: i32,
}

impl PathOffsetGenerator {
    pub const fn new() -> Self {
        Self {
            points: heapless::Vec::new(),
            offset_mm: 0,
        }
    }

    /// Offsets every vertex of `path` by `distance_mm` toward the
    /// interior and returns the ring size. The path must wind
    /// counter-clockwise; a clockwise loop is pushed outward instead.
    ///
    /// A failed call leaves the ring empty, never a stale or partial
    /// one.
    pub fn generate_inward(
        &mut self,
        path: &WaypointPath,
        distance_mm: i32,
    ) -> Result<usize, OffsetError> {
        self.points.clear();
        self.offset_mm = 0;

        if path.count() < 3 {
            return Err(OffsetError::TooFewVertices);
        }
        if distance_mm < 0 {
            return Err(OffsetError::InvalidDistance);
        }

        for point in path.iter() {
            if self.points.push(point).is_err() {
                self.points.clear();
                return Err(OffsetError::CapacityExceeded);
            }
        }

        // Offset in place. Neighbors must be the original positions,
        // so the first vertex and the running predecessor are carried
        // separately once they have been overwritten.
        let count = self.points.len();
        let first = self.points[0];
        let mut prev = self.points[count - 1];
        for i in 0..count {
            let current = self.points[i];
            let next = if i + 1 < count {
                self.points[i + 1]
            } else {
                first
            };
            self.points[i] = offset_vertex(prev, current, next, distance_mm);
            prev = current;
        }

        self.offset_mm = distance_mm;
        Ok(count)
    }

    /// The most recently generated ring.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Distance the current ring was offset by.
    pub fn current_offset_mm(&self) -> i32 {
        self.offset_mm
    }
}

impl Default for PathOffsetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves one vertex along its corner bisector.
fn offset_vertex(prev: Point, current: Point, next: Point, distance_mm: i32) -> Point {
    let v1 = prev - current;
    let v2 = next - current;

    // Inward normals of the two edges for a counter-clockwise loop.
    let perp1 = v1.rotate_cw_90();
    let perp2 = v2.rotate_ccw_90();
    let (n1x, n1y) = normalize_vector(perp1.x, perp1.y);
    let (n2x, n2y) = normalize_vector(perp2.x, perp2.y);

    let (bx, by) = normalize_vector((n1x + n2x) / 2, (n1y + n2y) / 2);

    let dot = dot_product(n1x, n1y, n2x, n2y);
    let scale = if dot > 0 {
        // cos(half angle) = sqrt((1 + cos) / 2), in thousandths.
        let cos_half = integer_sqrt((UNIT_SCALE + dot) * UNIT_SCALE / 2);
        if cos_half > MIN_COS_HALF {
            1_000_000 / cos_half as i64
        } else {
            10_000
        }
    } else {
        SHARP_CORNER_SCALE
    };
    let scale = scale.clamp(MITER_SCALE_MIN, MITER_SCALE_MAX);

    let shift_x = bx as i64 * distance_mm as i64 * scale / 1_000_000;
    let shift_y = by as i64 * distance_mm as i64 * scale / 1_000_000;
    Point::new(
        current.x + shift_x as i32,
        current.y + shift_y as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccw_square(side: i32) -> WaypointPath {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();
        path.add(Point::new(side, 0)).unwrap();
        path.add(Point::new(side, side)).unwrap();
        path.add(Point::new(0, side)).unwrap();
        path
    }

    #[test]
    fn test_square_corners_move_inward() {
        let path = ccw_square(10_000);
        let mut generator = PathOffsetGenerator::new();
        let count = generator.generate_inward(&path, 1000).unwrap();

        assert_eq!(count, 4);
        assert_eq!(generator.count(), 4);
        // Right-angle corners take the sharp-corner scale, moving
        // 1414 mm on each axis along the diagonal bisector.
        assert_eq!(generator.points()[0], Point::new(1414, 1414));
        assert_eq!(generator.points()[1], Point::new(8586, 1414));
        assert_eq!(generator.points()[2], Point::new(8586, 8586));
        assert_eq!(generator.points()[3], Point::new(1414, 8586));
        assert_eq!(generator.point(3), Some(Point::new(1414, 8586)));
        assert_eq!(generator.point(4), None);
        assert_eq!(generator.current_offset_mm(), 1000);
    }

    #[test]
    fn test_straight_section_offsets_exactly() {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();
        path.add(Point::new(5000, 0)).unwrap();
        path.add(Point::new(10_000, 0)).unwrap();
        path.add(Point::new(10_000, 10_000)).unwrap();
        path.add(Point::new(0, 10_000)).unwrap();

        let mut generator = PathOffsetGenerator::new();
        generator.generate_inward(&path, 1000).unwrap();

        // The collinear midpoint shifts straight up by the distance.
        assert_eq!(generator.points()[1], Point::new(5000, 1000));
    }

    #[test]
    fn test_too_few_vertices() {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();
        path.add(Point::new(1000, 0)).unwrap();

        let mut generator = PathOffsetGenerator::new();
        assert_eq!(
            generator.generate_inward(&path, 500),
            Err(OffsetError::TooFewVertices)
        );
    }

    #[test]
    fn test_negative_distance_rejected() {
        let path = ccw_square(10_000);
        let mut generator = PathOffsetGenerator::new();
        assert_eq!(
            generator.generate_inward(&path, -1),
            Err(OffsetError::InvalidDistance)
        );
    }

    #[test]
    fn test_failed_generate_drops_previous_ring() {
        let mut generator = PathOffsetGenerator::new();
        generator.generate_inward(&ccw_square(10_000), 500).unwrap();
        assert_eq!(generator.count(), 4);

        let mut two_points = WaypointPath::new();
        two_points.add(Point::new(0, 0)).unwrap();
        two_points.add(Point::new(1000, 0)).unwrap();

        assert_eq!(
            generator.generate_inward(&two_points, 500),
            Err(OffsetError::TooFewVertices)
        );
        assert_eq!(generator.count(), 0);
        assert!(generator.points().is_empty());
        assert_eq!(generator.current_offset_mm(), 0);

        generator.generate_inward(&ccw_square(10_000), 500).unwrap();
        assert_eq!(
            generator.generate_inward(&ccw_square(10_000), -1),
            Err(OffsetError::InvalidDistance)
        );
        assert_eq!(generator.count(), 0);
    }

    #[test]
    fn test_zero_distance_copies_path() {
        let path = ccw_square(10_000);
        let mut generator = PathOffsetGenerator::new();
        generator.generate_inward(&path, 0).unwrap();

        for (i, point) in generator.points().iter().enumerate() {
            assert_eq!(*point, path.get(i));
        }
    }

    #[test]
    fn test_ring_loads_back_into_a_path() {
        let path = ccw_square(10_000);
        let mut generator = PathOffsetGenerator::new();
        generator.generate_inward(&path, 1000).unwrap();

        let mut ring = WaypointPath::new();
        ring.load_from_slice(generator.points()).unwrap();
        assert_eq!(ring.count(), 4);
        let bounds = ring.bounds().unwrap();
        assert!(bounds.min.x > 0 && bounds.max.x < 10_000);
        assert!(bounds.min.y > 0 && bounds.max.y < 10_000);
    }
}
