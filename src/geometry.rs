#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point snapped to the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The wheel's disc, inscribed in its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn from_bounds(width: f64, height: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        Self {
            center,
            radius: center.x.min(center.y),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (self.center.x - x, self.center.y - y);
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Rotates `(x, y)` about the center. Positive angles turn clockwise on a y-down screen.
    pub fn rotate_point(&self, angle_degrees: f64, x: f64, y: f64) -> PixelPoint {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let (dx, dy) = (x - self.center.x, y - self.center.y);

        PixelPoint::new(
            (self.center.x + dx * cos - dy * sin).round() as i32,
            (self.center.y + dx * sin + dy * cos).round() as i32,
        )
    }
}
