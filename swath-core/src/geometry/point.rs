//! Points, bounding boxes, and point-to-segment queries

use core::ops::{Add, Sub};

use super::vector::{self, dot_product, normalize_vector, vector_length};

/// A position in millimeters. Doubles as a 2D vector when it denotes a
/// difference of positions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Length of the vector from the origin.
    pub fn length(&self) -> i32 {
        vector_length(self.x, self.y)
    }

    pub fn distance_to(&self, other: Point) -> i32 {
        vector_length(other.x - self.x, other.y - self.y)
    }

    /// Exact squared distance. Wide enough for any span a mower could
    /// survey; `i64` overflows only past three thousand kilometers.
    pub fn distance_squared_to(&self, other: Point) -> i64 {
        let dx = other.x as i64 - self.x as i64;
        let dy = other.y as i64 - self.y as i64;
        dx * dx + dy * dy
    }

    /// Exact quarter-turn rotation, counter-clockwise.
    pub fn rotate_ccw_90(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Exact quarter-turn rotation, clockwise.
    pub fn rotate_cw_90(&self) -> Point {
        Point::new(self.y, -self.x)
    }

    /// Scales the vector to unit length 1000. Zero stays zero.
    pub fn normalized(&self) -> Point {
        let (x, y) = normalize_vector(self.x, self.y);
        Point::new(x, y)
    }

    /// Interpolates toward `other` with `t` in thousandths.
    pub fn lerp(&self, other: Point, t: i32) -> Point {
        Point::new(
            vector::lerp(self.x, other.x, t),
            vector::lerp(self.y, other.y, t),
        )
    }

    /// Nearest point to `self` on the segment from `a` to `b`.
    ///
    /// The projection parameter is clamped to the segment, so results
    /// never fall outside it. A degenerate segment collapses to `a`.
    pub fn project_onto_segment(&self, a: Point, b: Point) -> Point {
        let dx = b.x as i64 - a.x as i64;
        let dy = b.y as i64 - a.y as i64;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0 {
            return a;
        }

        let dot = (self.x as i64 - a.x as i64) * dx + (self.y as i64 - a.y as i64) * dy;
        let t = dot.clamp(0, len_sq);
        Point::new(a.x + (dx * t / len_sq) as i32, a.y + (dy * t / len_sq) as i32)
    }

    /// Distance to the segment from `a` to `b`: perpendicular distance
    /// where the foot of the perpendicular lands on the segment,
    /// endpoint distance otherwise.
    pub fn distance_to_segment(&self, a: Point, b: Point) -> i32 {
        self.distance_to(self.project_onto_segment(a, b))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Approximate unsigned angle between two vectors in tenths of a
/// degree, `[0, 1800]`.
///
/// Linear in the dot product of the normalized inputs, so it is coarse
/// between the endpoints; callers only threshold it. Zero-length
/// inputs read as a quarter turn.
pub fn angle_between(v1: Point, v2: Point) -> i16 {
    let n1 = v1.normalized();
    let n2 = v2.normalized();
    let dot = dot_product(n1.x, n1.y, n2.x, n2.y);
    (900 - dot * 900 / 1000).clamp(0, 1800) as i16
}

/// Axis-aligned bounding box, inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Degenerate box holding a single point.
    pub const fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Grows the box just enough to include `point`.
    pub fn expand(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(100, 200);
        let b = Point::new(30, -50);
        assert_eq!(a + b, Point::new(130, 150));
        assert_eq!(a - b, Point::new(70, 250));
    }

    #[test]
    fn test_distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3000, 4000);
        assert_eq!(a.distance_to(b), 5000);
        assert_eq!(b.distance_to(a), 5000);
        assert_eq!(a.distance_squared_to(b), 25_000_000);
    }

    #[test]
    fn test_distance_squared_needs_i64() {
        let a = Point::new(0, 0);
        let b = Point::new(100_000, 0);
        assert_eq!(a.distance_squared_to(b), 10_000_000_000);
    }

    #[test]
    fn test_rotations() {
        let v = Point::new(1000, 0);
        assert_eq!(v.rotate_ccw_90(), Point::new(0, 1000));
        assert_eq!(v.rotate_cw_90(), Point::new(0, -1000));

        let back = v
            .rotate_ccw_90()
            .rotate_ccw_90()
            .rotate_ccw_90()
            .rotate_ccw_90();
        assert_eq!(back, v);
        assert_eq!(v.rotate_ccw_90().rotate_cw_90(), v);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Point::new(3000, 4000).normalized(), Point::new(600, 800));
        assert_eq!(Point::new(0, 0).normalized(), Point::new(0, 0));
    }

    #[test]
    fn test_lerp() {
        let a = Point::new(0, 0);
        let b = Point::new(1000, -2000);
        assert_eq!(a.lerp(b, 0), a);
        assert_eq!(a.lerp(b, 500), Point::new(500, -1000));
        assert_eq!(a.lerp(b, 1000), b);
    }

    #[test]
    fn test_project_onto_segment() {
        let a = Point::new(0, 0);
        let b = Point::new(1000, 0);

        // Foot of the perpendicular inside the segment
        assert_eq!(Point::new(500, 700).project_onto_segment(a, b), Point::new(500, 0));
        // Clamped to the endpoints beyond either end
        assert_eq!(Point::new(-400, 100).project_onto_segment(a, b), a);
        assert_eq!(Point::new(2000, -100).project_onto_segment(a, b), b);
        // Degenerate segment
        assert_eq!(Point::new(5, 5).project_onto_segment(a, a), a);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0, 0);
        let b = Point::new(1000, 0);

        assert_eq!(Point::new(500, 500).distance_to_segment(a, b), 500);
        assert_eq!(Point::new(2000, 0).distance_to_segment(a, b), 1000);
        assert_eq!(Point::new(0, -300).distance_to_segment(a, a), 300);
    }

    #[test]
    fn test_point_on_segment_projects_to_itself() {
        let a = Point::new(0, 0);
        let b = Point::new(30_000, 30_000);

        // On the diagonal, far from any thousandth of its length
        let p = Point::new(15_029, 15_029);
        assert_eq!(p.project_onto_segment(a, b), p);
        assert_eq!(p.distance_to_segment(a, b), 0);
    }

    #[test]
    fn test_angle_between() {
        let east = Point::new(1000, 0);
        assert_eq!(angle_between(east, Point::new(2000, 0)), 0);
        assert_eq!(angle_between(east, Point::new(0, 1000)), 900);
        assert_eq!(angle_between(east, Point::new(-3000, 0)), 1800);
    }

    #[test]
    fn test_bounds() {
        let mut bounds = Bounds::from_point(Point::new(10, 20));
        bounds.expand(Point::new(-5, 40));
        bounds.expand(Point::new(15, 0));

        assert_eq!(bounds.min, Point::new(-5, 0));
        assert_eq!(bounds.max, Point::new(15, 40));
        assert_eq!(bounds.width(), 20);
        assert_eq!(bounds.height(), 40);

        assert!(bounds.contains(Point::new(0, 0)));
        assert!(bounds.contains(Point::new(15, 40)));
        assert!(!bounds.contains(Point::new(16, 10)));
        assert!(!bounds.contains(Point::new(0, -1)));
    }
}
