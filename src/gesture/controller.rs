//! Session-scoped gesture resolution.
//!
//! One controller owns at most one active session against one token. The
//! session is a small state machine entered only from idle:
//!
//! ```text
//! Idle ──begin(1 pointer)──▶ Dragging | Resizing | Rotating
//! Idle ──begin(2 pointers)─▶ Pinching
//! ```
//!
//! Classification happens once, at session start; a session never switches
//! mode mid-flight. The only sanctioned interruption is a second pointer
//! arriving during a one-pointer session, which cancels it (committing the
//! geometry applied so far, never removing) and opens a fresh pinch session
//! with its own snapshot.
//!
//! Deltas are always computed against the session-start snapshot rather
//! than accumulated frame to frame, so repeated rounding cannot drift.

use crate::board::{is_outside, Board, Point, Rect, Token, TokenId, MIN_FREE_SIZE};

use super::event::{PinchFrame, Pointers};

/// Edge length of the corner grip zones, in pixels.
const GRIP_ZONE: f32 = 20.0;

/// Geometry snapshot taken at session start.
#[derive(Debug, Clone, Copy)]
struct GeometrySnapshot {
    position: Point,
    width: f32,
    height: f32,
    rotation: f32,
}

impl GeometrySnapshot {
    fn of(token: &Token) -> Self {
        Self {
            position: token.position,
            width: token.width,
            height: token.height,
            rotation: token.rotation,
        }
    }
}

/// The active session, carrying its start snapshot as payload.
#[derive(Debug)]
enum Session {
    Dragging {
        token: TokenId,
        /// start pointer minus start position; fixed for the session.
        grab_offset: Point,
        /// Set while the token center sits outside the canvas.
        pending_removal: bool,
    },
    Resizing {
        token: TokenId,
    },
    Rotating {
        token: TokenId,
        start_rotation: f32,
        start_angle: f32,
    },
    Pinching {
        token: TokenId,
        start: PinchFrame,
        start_geometry: GeometrySnapshot,
    },
}

impl Session {
    fn token(&self) -> &TokenId {
        match self {
            Session::Dragging { token, .. }
            | Session::Resizing { token }
            | Session::Rotating { token, .. }
            | Session::Pinching { token, .. } => token,
        }
    }
}

/// One resolved move frame, extracted from the session so the board can
/// be mutated without holding the session borrow.
enum Frame {
    Drag {
        id: TokenId,
        grab_offset: Point,
        pointer: Point,
    },
    Resize {
        id: TokenId,
        pointer: Point,
    },
    Rotate {
        id: TokenId,
        start_rotation: f32,
        start_angle: f32,
        pointer: Point,
    },
    Pinch {
        id: TokenId,
        start: PinchFrame,
        start_geometry: GeometrySnapshot,
        frame: PinchFrame,
    },
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No session was active.
    Idle,
    /// Final geometry committed in place.
    Committed(TokenId),
    /// Drag ended with the center outside the canvas; token destroyed.
    Removed(TokenId),
}

/// Resolves pointer input into geometry mutations for one token at a time.
pub struct GestureController {
    canvas: Rect,
    session: Option<Session>,
}

impl GestureController {
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas,
            session: None,
        }
    }

    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Token owning the active session, if any.
    pub fn active_token(&self) -> Option<&TokenId> {
        self.session.as_ref().map(Session::token)
    }

    /// Start a session against `id`. Malformed input (non-finite
    /// coordinates, coincident pinch pointers, unknown token) is ignored
    /// without touching any state.
    pub fn begin(&mut self, board: &Board, id: &TokenId, pointers: Pointers) {
        if !pointers.is_finite() {
            log::debug!("gesture begin ignored: non-finite pointer");
            return;
        }
        let Some(token) = board.token(id) else {
            log::debug!("gesture begin ignored: unknown token {id}");
            return;
        };

        if let Some(active) = &self.session {
            if active.token() != id {
                // The end event for the previous session got lost. Commit
                // what was applied and move on; never remove on this path.
                log::debug!("gesture begin preempts session on {}", active.token());
            } else if matches!(pointers, Pointers::One(_)) {
                // Duplicate start for the live session; keep the original
                // classification and snapshot.
                return;
            }
        }

        self.session = match pointers {
            Pointers::One(p) => Some(self.classify(token, p)),
            Pointers::Two(a, b) => Self::pinch_session(token, a, b),
        };
    }

    /// Apply one move frame to the active session.
    ///
    /// Resolved in two phases (read the session, then mutate board and
    /// session) so the session borrow never overlaps the board borrow.
    pub fn update(&mut self, board: &mut Board, pointers: Pointers) {
        if !pointers.is_finite() {
            log::debug!("gesture move ignored: non-finite pointer");
            return;
        }

        let frame = match (&self.session, pointers) {
            (None, _) => return,

            // Second pointer arrived during a one-pointer session: cancel
            // it and re-snapshot as a pinch. The drag's pending-removal
            // flag dies with the session.
            (Some(Session::Dragging { token, .. }), Pointers::Two(a, b))
            | (Some(Session::Resizing { token }), Pointers::Two(a, b))
            | (Some(Session::Rotating { token, .. }), Pointers::Two(a, b)) => {
                let id = token.clone();
                self.session = board.token(&id).and_then(|t| Self::pinch_session(t, a, b));
                return;
            }

            // A pinch frame arriving with one pointer is malformed.
            (Some(Session::Pinching { .. }), Pointers::One(_)) => {
                log::debug!("gesture move ignored: pointer count mismatch");
                return;
            }

            (
                Some(Session::Dragging {
                    token, grab_offset, ..
                }),
                Pointers::One(p),
            ) => Frame::Drag {
                id: token.clone(),
                grab_offset: *grab_offset,
                pointer: p,
            },

            (Some(Session::Resizing { token }), Pointers::One(p)) => Frame::Resize {
                id: token.clone(),
                pointer: p,
            },

            (
                Some(Session::Rotating {
                    token,
                    start_rotation,
                    start_angle,
                }),
                Pointers::One(p),
            ) => Frame::Rotate {
                id: token.clone(),
                start_rotation: *start_rotation,
                start_angle: *start_angle,
                pointer: p,
            },

            (
                Some(Session::Pinching {
                    token,
                    start,
                    start_geometry,
                }),
                Pointers::Two(a, b),
            ) => Frame::Pinch {
                id: token.clone(),
                start: *start,
                start_geometry: *start_geometry,
                frame: PinchFrame::from_pair(a, b),
            },
        };

        self.apply(board, frame);
    }

    fn apply(&mut self, board: &mut Board, frame: Frame) {
        let canvas = self.canvas;
        match frame {
            Frame::Drag {
                id,
                grab_offset,
                pointer,
            } => {
                let Some(t) = board.token_mut(&id) else {
                    self.session = None;
                    return;
                };
                t.position = Point::new(pointer.x - grab_offset.x, pointer.y - grab_offset.y);
                let center = Point::new(
                    canvas.x + t.position.x + t.width * 0.5,
                    canvas.y + t.position.y + t.height * 0.5,
                );
                let outside = is_outside(center, canvas);
                if let Some(Session::Dragging {
                    pending_removal, ..
                }) = &mut self.session
                {
                    *pending_removal = outside;
                }
            }

            Frame::Resize { id, pointer } => {
                let Some(t) = board.token_mut(&id) else {
                    self.session = None;
                    return;
                };
                // Anchored at the top-left: resizing never moves the token.
                t.width = (pointer.x - canvas.x - t.position.x).max(MIN_FREE_SIZE);
                t.height = (pointer.y - canvas.y - t.position.y).max(MIN_FREE_SIZE);
            }

            Frame::Rotate {
                id,
                start_rotation,
                start_angle,
                pointer,
            } => {
                let Some(t) = board.token_mut(&id) else {
                    self.session = None;
                    return;
                };
                let center = Point::new(
                    canvas.x + t.position.x + t.width * 0.5,
                    canvas.y + t.position.y + t.height * 0.5,
                );
                t.rotation = start_rotation + (center.angle_to(pointer) - start_angle);
            }

            Frame::Pinch {
                id,
                start,
                start_geometry: g0,
                frame,
            } => {
                let Some(t) = board.token_mut(&id) else {
                    self.session = None;
                    return;
                };
                let scale = frame.distance / start.distance;
                t.width = (g0.width * scale).max(MIN_FREE_SIZE);
                t.height = (g0.height * scale).max(MIN_FREE_SIZE);
                t.rotation = g0.rotation + (frame.angle - start.angle);
                // Translation follows the midpoint, not the scale origin:
                // a pure pinch does not move the token.
                t.position = Point::new(
                    g0.position.x + (frame.midpoint.x - start.midpoint.x),
                    g0.position.y + (frame.midpoint.y - start.midpoint.y),
                );
            }
        }
    }

    /// End the active session: commit the final geometry, or remove the
    /// token if a drag left its center outside the canvas.
    pub fn end(&mut self, board: &mut Board) -> SessionOutcome {
        match self.session.take() {
            None => SessionOutcome::Idle,
            Some(Session::Dragging {
                token,
                pending_removal: true,
                ..
            }) => {
                board.remove_token(&token);
                SessionOutcome::Removed(token)
            }
            Some(session) => SessionOutcome::Committed(session.token().clone()),
        }
    }

    /// Classify a single-pointer start against the token's untransformed
    /// local box: bottom-right grip resizes, top-right grip rotates,
    /// anywhere else drags.
    fn classify(&self, token: &Token, pointer: Point) -> Session {
        let local = Point::new(
            pointer.x - self.canvas.x - token.position.x,
            pointer.y - self.canvas.y - token.position.y,
        );

        let in_right_band = local.x >= token.width - GRIP_ZONE && local.x <= token.width;
        if in_right_band && local.y >= token.height - GRIP_ZONE && local.y <= token.height {
            return Session::Resizing {
                token: token.id.clone(),
            };
        }
        if in_right_band && local.y >= 0.0 && local.y <= GRIP_ZONE {
            let center = Point::new(
                self.canvas.x + token.position.x + token.width * 0.5,
                self.canvas.y + token.position.y + token.height * 0.5,
            );
            return Session::Rotating {
                token: token.id.clone(),
                start_rotation: token.rotation,
                start_angle: center.angle_to(pointer),
            };
        }

        Session::Dragging {
            token: token.id.clone(),
            grab_offset: Point::new(
                pointer.x - token.position.x,
                pointer.y - token.position.y,
            ),
            pending_removal: false,
        }
    }

    fn pinch_session(token: &Token, a: Point, b: Point) -> Option<Session> {
        let start = PinchFrame::from_pair(a, b);
        if start.distance <= f32::EPSILON {
            // Coincident pointers would make the scale ratio undefined.
            log::debug!("pinch refused: zero initial distance");
            return None;
        }
        Some(Session::Pinching {
            token: token.id.clone(),
            start,
            start_geometry: GeometrySnapshot::of(token),
        })
    }
}
