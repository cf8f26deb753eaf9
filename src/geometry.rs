use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians from the x axis.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        (len > 1e-9).then(|| self * (1.0 / len))
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn rotate(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
        let mut sum = Point::ORIGIN;
        let mut count = 0usize;
        for p in points {
            sum = sum + p;
            count += 1;
        }
        (count > 0).then(|| sum * (1.0 / count as f64))
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

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Axis-aligned box; `min`/`max` are inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn of(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in iter {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn rotation_and_angles() {
        let p = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(close(p, Point::new(0.0, 1.0)));
        assert!((p.angle() - FRAC_PI_2).abs() < 1e-12);
        assert!(close(Point::new(2.0, 0.0).perp(), Point::new(0.0, 2.0)));
    }

    #[test]
    fn normalizing_zero_vector() {
        assert_eq!(Point::ORIGIN.normalized(), None);
        let unit = Point::new(3.0, 4.0).normalized().unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_of_points() {
        let b = Bounds::of([Point::new(1.0, -1.0), Point::new(-2.0, 3.0)]).unwrap();
        assert_eq!(b.width(), 3.0);
        assert_eq!(b.height(), 4.0);
        assert!(close(b.center(), Point::new(-0.5, 1.0)));
        assert!(Bounds::of(Vec::new()).is_none());
        assert_eq!(
            Point::centroid([Point::new(0.0, 0.0), Point::new(2.0, 2.0)]),
            Some(Point::new(1.0, 1.0))
        );
    }
}
