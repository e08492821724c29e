//! Delta-compressed closed waypoint loop
//!
//! A recorded perimeter stores one absolute origin plus a 16-bit delta
//! pair per subsequent waypoint, halving the footprint of a thousand
//! points against absolute `i32` storage. The price is `O(index)`
//! random access; appending stays `O(1)` through a running last point,
//! and full walks are `O(n)` overall.

use core::cell::Cell;

use swath_protocol::{perimeter, PathDelta, PerimeterRecord, WireError};

use crate::geometry::{vector_length, Bounds, Point};

/// Hard cap on stored waypoints, origin included.
pub const MAX_WAYPOINTS: usize = 1000;

const MAX_DELTAS: usize = MAX_WAYPOINTS - 1;

/// Conventional distance within which a position counts as on the
/// path.
pub const ON_PATH_THRESHOLD_MM: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PathError {
    /// The path already holds [`MAX_WAYPOINTS`] points.
    CapacityExceeded,
    /// A delta component falls outside ±32767, so the segment cannot
    /// be stored in 16 bits.
    SegmentTooLong,
}

/// Closed loop of waypoints with fixed capacity.
///
/// The loop is implicit: the edge from the last point back to the
/// origin always exists and is included in [`length`](Self::length)
/// and [`is_on_path`](Self::is_on_path).
#[derive(Debug)]
pub struct WaypointPath {
    origin: Option<Point>,
    last: Point,
    deltas: heapless::Vec<PathDelta, MAX_DELTAS>,
    // Computed on first read after a mutation. Cell, not RefCell:
    // both values are Copy and the path has one owner per tick.
    bounds_cache: Cell<Option<Bounds>>,
    length_cache: Cell<Option<i32>>,
}

impl WaypointPath {
    pub const fn new() -> Self {
        Self {
            origin: None,
            last: Point::new(0, 0),
            deltas: heapless::Vec::new(),
            bounds_cache: Cell::new(None),
            length_cache: Cell::new(None),
        }
    }

    /// Appends a waypoint.
    ///
    /// The first point becomes the origin. Every later point must lie
    /// within ±32767 mm of the previous one on both axes; otherwise
    /// the add fails and the path is unchanged.
    pub fn add(&mut self, point: Point) -> Result<(), PathError> {
        match self.origin {
            None => {
                self.origin = Some(point);
                self.last = point;
            }
            Some(_) => {
                let dx = point.x as i64 - self.last.x as i64;
                let dy = point.y as i64 - self.last.y as i64;
                if dx.unsigned_abs() > 32767 || dy.unsigned_abs() > 32767 {
                    return Err(PathError::SegmentTooLong);
                }
                let delta = PathDelta {
                    dx: dx as i16,
                    dy: dy as i16,
                };
                self.deltas
                    .push(delta)
                    .map_err(|_| PathError::CapacityExceeded)?;
                self.last = point;
            }
        }
        self.invalidate_caches();
        Ok(())
    }

    /// Waypoint `index`, reconstructed by summing deltas from the
    /// origin. Out-of-range indices fail closed to `(0, 0)`; callers
    /// check [`count`](Self::count) first.
    pub fn get(&self, index: usize) -> Point {
        let origin = match self.origin {
            Some(origin) => origin,
            None => return Point::new(0, 0),
        };
        if index > self.deltas.len() {
            return Point::new(0, 0);
        }

        let mut point = origin;
        for delta in &self.deltas[..index] {
            point.x += delta.dx as i32;
            point.y += delta.dy as i32;
        }
        point
    }

    /// Walks all waypoints in order, reconstructing incrementally.
    pub fn iter(&self) -> PointIter<'_> {
        PointIter {
            next: self.origin,
            deltas: self.deltas.iter(),
        }
    }

    pub fn count(&self) -> usize {
        match self.origin {
            Some(_) => 1 + self.deltas.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }

    pub const fn capacity(&self) -> usize {
        MAX_WAYPOINTS
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.last = Point::new(0, 0);
        self.deltas.clear();
        self.invalidate_caches();
    }

    /// Axis-aligned bounding box of all waypoints, or `None` while
    /// empty. Cached until the next mutation.
    pub fn bounds(&self) -> Option<Bounds> {
        if let Some(cached) = self.bounds_cache.get() {
            return Some(cached);
        }

        let mut points = self.iter();
        let first = points.next()?;
        let mut bounds = Bounds::from_point(first);
        for point in points {
            bounds.expand(point);
        }
        self.bounds_cache.set(Some(bounds));
        Some(bounds)
    }

    /// East-west extent in millimeters; 0 while empty.
    pub fn width(&self) -> i32 {
        self.bounds().map_or(0, |bounds| bounds.width())
    }

    /// North-south extent in millimeters; 0 while empty.
    pub fn height(&self) -> i32 {
        self.bounds().map_or(0, |bounds| bounds.height())
    }

    /// Total perimeter length including the implicit closing edge.
    /// Fewer than two points walk no distance. Cached until the next
    /// mutation.
    pub fn length(&self) -> i32 {
        let origin = match self.origin {
            Some(origin) => origin,
            None => return 0,
        };
        if self.deltas.is_empty() {
            return 0;
        }
        if let Some(cached) = self.length_cache.get() {
            return cached;
        }

        let mut total = 0;
        for delta in &self.deltas {
            total += vector_length(delta.dx as i32, delta.dy as i32);
        }
        total += self.last.distance_to(origin);

        self.length_cache.set(Some(total));
        total
    }

    /// Whether `point` lies within `threshold_mm` of any edge,
    /// closing edge included. Fewer than two points match nothing.
    pub fn is_on_path(&self, point: Point, threshold_mm: i32) -> bool {
        let origin = match self.origin {
            Some(origin) => origin,
            None => return false,
        };
        if self.deltas.is_empty() {
            return false;
        }

        let mut prev = origin;
        let mut current = origin;
        for delta in &self.deltas {
            current.x += delta.dx as i32;
            current.y += delta.dy as i32;
            if point.distance_to_segment(prev, current) <= threshold_mm {
                return true;
            }
            prev = current;
        }
        point.distance_to_segment(prev, origin) <= threshold_mm
    }

    /// Replaces the contents with `points`.
    ///
    /// Over-capacity input fails up front leaving the path untouched.
    /// A too-long segment fails midway leaving the points added so
    /// far; callers that need all-or-nothing keep their own copy.
    pub fn load_from_slice(&mut self, points: &[Point]) -> Result<(), PathError> {
        if points.len() > MAX_WAYPOINTS {
            return Err(PathError::CapacityExceeded);
        }
        self.clear();
        for &point in points {
            self.add(point)?;
        }
        Ok(())
    }

    /// Encoded size of this path in bytes.
    pub fn encoded_len(&self) -> usize {
        perimeter::encoded_len(self.count())
    }

    /// Serializes the path. An empty path has no origin to write and
    /// fails with [`WireError::BadLength`].
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, WireError> {
        let origin = match self.origin {
            Some(origin) => origin,
            None => return Err(WireError::BadLength),
        };
        perimeter::encode_into((origin.x, origin.y), &self.deltas, buffer)
    }

    /// Replaces the contents with a serialized record.
    ///
    /// Any delta the wire can carry is accepted, including the full
    /// `i16` range; only records describing more waypoints than the
    /// capacity are rejected, as [`WireError::BadLength`].
    pub fn decode_from(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let record = PerimeterRecord::parse(bytes)?;
        if record.count() > MAX_WAYPOINTS {
            return Err(WireError::BadLength);
        }

        self.clear();
        let (x, y) = record.origin();
        let origin = Point::new(x, y);
        self.origin = Some(origin);

        let mut last = origin;
        for delta in record.deltas() {
            last.x += delta.dx as i32;
            last.y += delta.dy as i32;
            if self.deltas.push(delta).is_err() {
                self.clear();
                return Err(WireError::BadLength);
            }
        }
        self.last = last;
        Ok(())
    }

    fn invalidate_caches(&mut self) {
        self.bounds_cache.set(None);
        self.length_cache.set(None);
    }
}

impl Default for WaypointPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over reconstructed waypoints.
#[derive(Debug, Clone)]
pub struct PointIter<'a> {
    next: Option<Point>,
    deltas: core::slice::Iter<'a, PathDelta>,
}

impl Iterator for PointIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next?;
        self.next = self.deltas.next().map(|delta| {
            Point::new(current.x + delta.dx as i32, current.y + delta.dy as i32)
        });
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(_) => 1 + self.deltas.len(),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PointIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: i32) -> WaypointPath {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();
        path.add(Point::new(side, 0)).unwrap();
        path.add(Point::new(side, side)).unwrap();
        path.add(Point::new(0, side)).unwrap();
        path
    }

    #[test]
    fn test_empty_path() {
        let path = WaypointPath::new();
        assert_eq!(path.count(), 0);
        assert!(path.is_empty());
        assert_eq!(path.get(0), Point::new(0, 0));
        assert_eq!(path.bounds(), None);
        assert_eq!(path.length(), 0);
        assert!(!path.is_on_path(Point::new(0, 0), ON_PATH_THRESHOLD_MM));
        assert_eq!(path.iter().next(), None);
    }

    #[test]
    fn test_add_reconstructs_exactly() {
        let path = square(10_000);
        assert_eq!(path.count(), 4);
        assert_eq!(path.get(0), Point::new(0, 0));
        assert_eq!(path.get(1), Point::new(10_000, 0));
        assert_eq!(path.get(2), Point::new(10_000, 10_000));
        assert_eq!(path.get(3), Point::new(0, 10_000));
    }

    #[test]
    fn test_get_out_of_range_fails_closed() {
        let path = square(10_000);
        assert_eq!(path.get(4), Point::new(0, 0));
        assert_eq!(path.get(usize::MAX), Point::new(0, 0));
    }

    #[test]
    fn test_iter_matches_get() {
        let path = square(7000);
        let from_iter: heapless::Vec<Point, 8> = path.iter().collect();
        assert_eq!(from_iter.len(), 4);
        for (i, point) in from_iter.iter().enumerate() {
            assert_eq!(*point, path.get(i));
        }
        assert_eq!(path.iter().len(), 4);
    }

    #[test]
    fn test_segment_too_long_rejected() {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();

        assert_eq!(
            path.add(Point::new(40_000, 0)),
            Err(PathError::SegmentTooLong)
        );
        assert_eq!(
            path.add(Point::new(0, -32_768)),
            Err(PathError::SegmentTooLong)
        );
        assert_eq!(path.count(), 1);

        path.add(Point::new(32_767, 0)).unwrap();
        assert_eq!(path.count(), 2);
    }

    #[test]
    fn test_capacity_limit() {
        let mut path = WaypointPath::new();
        for i in 0..MAX_WAYPOINTS {
            path.add(Point::new(i as i32, 0)).unwrap();
        }
        assert_eq!(path.count(), MAX_WAYPOINTS);
        assert_eq!(
            path.add(Point::new(0, 0)),
            Err(PathError::CapacityExceeded)
        );
        assert_eq!(path.count(), MAX_WAYPOINTS);
    }

    #[test]
    fn test_clear() {
        let mut path = square(5000);
        path.clear();
        assert_eq!(path.count(), 0);
        assert_eq!(path.bounds(), None);
        assert_eq!(path.length(), 0);
    }

    #[test]
    fn test_bounds() {
        let path = square(10_000);
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(0, 0));
        assert_eq!(bounds.max, Point::new(10_000, 10_000));
        assert_eq!(path.width(), 10_000);
        assert_eq!(path.height(), 10_000);
    }

    #[test]
    fn test_bounds_cache_invalidated_by_add() {
        let mut path = square(10_000);
        assert_eq!(path.bounds().unwrap().max, Point::new(10_000, 10_000));

        path.add(Point::new(0, 15_000)).unwrap();
        assert_eq!(path.bounds().unwrap().max, Point::new(10_000, 15_000));
    }

    #[test]
    fn test_length_closes_the_loop() {
        let path = square(10_000);
        assert_eq!(path.length(), 40_000);

        let mut pair = WaypointPath::new();
        pair.add(Point::new(0, 0)).unwrap();
        pair.add(Point::new(5000, 0)).unwrap();
        // Out and back
        assert_eq!(pair.length(), 10_000);
    }

    #[test]
    fn test_length_single_point_is_zero() {
        let mut path = WaypointPath::new();
        path.add(Point::new(123, 456)).unwrap();
        assert_eq!(path.length(), 0);
    }

    #[test]
    fn test_is_on_path() {
        let path = square(10_000);

        assert!(path.is_on_path(Point::new(5000, 100), ON_PATH_THRESHOLD_MM));
        assert!(path.is_on_path(Point::new(5000, 499), ON_PATH_THRESHOLD_MM));
        assert!(!path.is_on_path(Point::new(5000, 501), ON_PATH_THRESHOLD_MM));
        assert!(!path.is_on_path(Point::new(5000, 5000), ON_PATH_THRESHOLD_MM));
    }

    #[test]
    fn test_is_on_path_closing_edge() {
        let path = square(10_000);
        // Left edge exists only as the implicit closing edge
        assert!(path.is_on_path(Point::new(-100, 5000), ON_PATH_THRESHOLD_MM));
        assert!(path.is_on_path(Point::new(400, 5000), ON_PATH_THRESHOLD_MM));
        assert!(!path.is_on_path(Point::new(-600, 5000), ON_PATH_THRESHOLD_MM));
    }

    #[test]
    fn test_is_on_path_exact_on_long_diagonal() {
        let mut path = WaypointPath::new();
        path.add(Point::new(0, 0)).unwrap();
        path.add(Point::new(30_000, 30_000)).unwrap();
        path.add(Point::new(30_000, 0)).unwrap();

        // Mid-edge points read distance zero, so any threshold matches
        assert!(path.is_on_path(Point::new(15_029, 15_029), 0));
        assert!(path.is_on_path(Point::new(15_029, 15_029), 40));
    }

    #[test]
    fn test_load_from_slice() {
        let points = [
            Point::new(100, 100),
            Point::new(2000, 150),
            Point::new(1800, 3000),
        ];
        let mut path = square(500);
        path.load_from_slice(&points).unwrap();

        assert_eq!(path.count(), 3);
        assert_eq!(path.get(2), Point::new(1800, 3000));
    }

    #[test]
    fn test_load_from_slice_too_long_segment_keeps_prefix() {
        let points = [
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(50_000, 0),
            Point::new(50_100, 0),
        ];
        let mut path = WaypointPath::new();
        assert_eq!(
            path.load_from_slice(&points),
            Err(PathError::SegmentTooLong)
        );
        assert_eq!(path.count(), 2);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let path = square(10_000);
        let mut buffer = [0u8; 64];
        let len = path.encode_into(&mut buffer).unwrap();
        assert_eq!(len, path.encoded_len());
        assert_eq!(len, 8 + 3 * 4);

        let mut decoded = WaypointPath::new();
        decoded.decode_from(&buffer[..len]).unwrap();
        assert_eq!(decoded.count(), 4);
        for i in 0..4 {
            assert_eq!(decoded.get(i), path.get(i));
        }
        assert_eq!(decoded.length(), path.length());
    }

    #[test]
    fn test_encode_empty_fails() {
        let path = WaypointPath::new();
        let mut buffer = [0u8; 16];
        assert_eq!(path.encode_into(&mut buffer), Err(WireError::BadLength));
    }

    #[test]
    fn test_decode_oversize_record_rejected() {
        let deltas = [PathDelta { dx: 1, dy: 0 }; MAX_WAYPOINTS];
        let mut buffer = [0u8; 8 + MAX_WAYPOINTS * 4];
        let len = perimeter::encode_into((0, 0), &deltas, &mut buffer).unwrap();

        let mut path = WaypointPath::new();
        assert_eq!(path.decode_from(&buffer[..len]), Err(WireError::BadLength));
        assert!(path.is_empty());
    }

    #[test]
    fn test_decode_accepts_full_wire_range() {
        let deltas = [PathDelta {
            dx: i16::MIN,
            dy: i16::MAX,
        }];
        let mut buffer = [0u8; 12];
        let len = perimeter::encode_into((0, 0), &deltas, &mut buffer).unwrap();

        let mut path = WaypointPath::new();
        path.decode_from(&buffer[..len]).unwrap();
        assert_eq!(path.get(1), Point::new(-32_768, 32_767));
    }
}
