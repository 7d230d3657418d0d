//! Token records and painter-facing snapshots.

use super::canvas::Point;

/// Minimum edge length when resizing or pinching freely.
pub const MIN_FREE_SIZE: f32 = 20.0;
/// Size clamp for discrete scale-step operations.
pub const MIN_STEP_SIZE: f32 = 30.0;
pub const MAX_STEP_SIZE: f32 = 300.0;
/// Default edge length for a freshly dropped token.
pub const DEFAULT_TOKEN_SIZE: f32 = 80.0;

/// Stable identifier for a placed token.
///
/// Identifiers are plain strings so the instrument mapping can hash the
/// character sequence deterministically; they stay unique for the process
/// lifetime (serial-numbered, never reused).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the palette hands over on a drop: a visual/sound reference,
/// never geometry.
#[derive(Debug, Clone)]
pub struct StickerDescriptor {
    /// Sticker kind, e.g. "star" or "frog". Becomes part of the token id.
    pub kind: String,
}

impl StickerDescriptor {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// A placed sticker. Geometry is mutated in place by the gesture
/// controller; ordering fields by the layer and removal paths.
#[derive(Debug, Clone)]
pub struct Token {
    pub id: TokenId,
    /// Top-left position in canvas coordinates.
    pub position: Point,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees. Unbounded; wraps implicitly through trig.
    pub rotation: f32,
    /// Horizontal flip only.
    pub mirrored: bool,
    /// Per-token volume in [0, 1].
    pub volume: f32,
    /// Paint order. Pairwise distinct across live tokens.
    pub z_order: i32,
    /// Playback position. Contiguous 0..N-1 across live tokens.
    pub step_index: usize,
}

impl Token {
    /// Center of the token's axis-aligned bounding box.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width * 0.5,
            self.position.y + self.height * 0.5,
        )
    }
}

/// Read-only view of one token for an external painter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TokenSnapshot {
    pub id: TokenId,
    pub position: Point,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub mirrored: bool,
    pub z_order: i32,
    pub step_index: usize,
    /// True when this token sits on the sequencer's current step.
    pub highlighted: bool,
}

impl TokenSnapshot {
    pub(crate) fn of(token: &Token, current_step: Option<usize>) -> Self {
        Self {
            id: token.id.clone(),
            position: token.position,
            width: token.width,
            height: token.height,
            rotation: token.rotation,
            mirrored: token.mirrored,
            z_order: token.z_order,
            step_index: token.step_index,
            highlighted: current_step == Some(token.step_index),
        }
    }
}
