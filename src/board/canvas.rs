//! Canvas geometry helpers.
//!
//! Pure functions over points and rectangles; the canvas itself owns no
//! state. Degenerate input (NaN coordinates, zero-size rectangles) fails
//! safe: a token is never removed because the geometry went bad.

/// A point in canvas or screen space, in pixels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the segment from `self` to `other`, in degrees.
    pub fn angle_to(&self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// Midpoint of the segment between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// An axis-aligned rectangle (top-left origin), in pixels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Returns true when `center` lies outside `rect`.
///
/// Fails safe: non-finite coordinates or a degenerate rectangle report
/// "inside", so a bad frame can never trash a token.
pub fn is_outside(center: Point, rect: Rect) -> bool {
    if !center.is_finite() {
        return false;
    }
    if !(rect.width > 0.0) || !(rect.height > 0.0) {
        return false;
    }

    center.x < rect.x
        || center.x > rect.x + rect.width
        || center.y < rect.y
        || center.y > rect.y + rect.height
}

/// Convert a drop point into a top-left placement for a token of
/// `default_width` x `default_height`, centered on the drop point and
/// clamped so the token never starts at negative coordinates.
pub fn drop_to_placement(drop: Point, default_width: f32, default_height: f32) -> Point {
    Point::new(
        (drop.x - default_width * 0.5).max(0.0),
        (drop.y - default_height * 0.5).max(0.0),
    )
}
