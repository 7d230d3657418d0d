//! Pointer input for gesture sessions.
//!
//! The painter side owns hit testing and event plumbing; what reaches the
//! controller is already addressed to one token: a session start with the
//! initial pointer set, a stream of moves, and an end.

use crate::board::Point;

/// One or two pointer positions, in screen coordinates.
///
/// Anything else is malformed input and is ignored by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointers {
    One(Point),
    Two(Point, Point),
}

impl Pointers {
    /// Build from a raw slice; `None` for unsupported pointer counts.
    pub fn from_slice(points: &[Point]) -> Option<Self> {
        match points {
            [p] => Some(Pointers::One(*p)),
            [a, b] => Some(Pointers::Two(*a, *b)),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Pointers::One(p) => p.is_finite(),
            Pointers::Two(a, b) => a.is_finite() && b.is_finite(),
        }
    }
}

/// Geometry shared by every two-pointer frame: inter-pointer distance,
/// segment angle in degrees, and midpoint.
#[derive(Debug, Clone, Copy)]
pub struct PinchFrame {
    pub distance: f32,
    pub angle: f32,
    pub midpoint: Point,
}

impl PinchFrame {
    pub fn from_pair(a: Point, b: Point) -> Self {
        Self {
            distance: a.distance_to(b),
            angle: a.angle_to(b),
            midpoint: a.midpoint(b),
        }
    }
}
