//! The shared token collection and its ordering model.
//!
//! The board is the single shared mutable resource in the system. Only
//! three paths may mutate it: the gesture controller (geometry), the layer
//! operations (z-order), and removal (membership + step renumbering).
//! Everyone else reads snapshots.

pub mod canvas;
pub mod layers;
pub mod token;

pub use canvas::{drop_to_placement, is_outside, Point, Rect};
pub use layers::LayerMove;
pub use token::{
    StickerDescriptor, Token, TokenId, TokenSnapshot, DEFAULT_TOKEN_SIZE, MAX_STEP_SIZE,
    MIN_FREE_SIZE, MIN_STEP_SIZE,
};

/// Pixel delta applied per discrete scale step.
pub const SCALE_STEP: f32 = 10.0;

/// Direction for a discrete scale-step operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    Grow,
    Shrink,
}

/// The live token collection.
pub struct Board {
    tokens: Vec<Token>,
    next_serial: u64,
}

impl Board {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            next_serial: 0,
        }
    }

    /// Place a new token centered on the drop point.
    ///
    /// The new token paints on top (z = max + 1) and plays last
    /// (step = current count).
    pub fn drop_token(&mut self, descriptor: &StickerDescriptor, x: f32, y: f32) -> TokenId {
        let id = TokenId::new(format!("{}-{}", descriptor.kind, self.next_serial));
        self.next_serial += 1;

        let position = drop_to_placement(Point::new(x, y), DEFAULT_TOKEN_SIZE, DEFAULT_TOKEN_SIZE);
        let z_order = self.tokens.iter().map(|t| t.z_order).max().unwrap_or(-1) + 1;

        self.tokens.push(Token {
            id: id.clone(),
            position,
            width: DEFAULT_TOKEN_SIZE,
            height: DEFAULT_TOKEN_SIZE,
            rotation: 0.0,
            mirrored: false,
            volume: 1.0,
            z_order,
            step_index: self.tokens.len(),
        });

        id
    }

    /// Remove a token and renumber the survivors' step indices so they
    /// stay a contiguous 0..N-1 in the same relative order. Z-orders are
    /// deliberately left alone. Unknown id is a no-op.
    pub fn remove_token(&mut self, id: &TokenId) {
        let before = self.tokens.len();
        self.tokens.retain(|t| &t.id != id);
        if self.tokens.len() == before {
            return;
        }

        let mut order: Vec<usize> = (0..self.tokens.len()).collect();
        order.sort_by_key(|&i| self.tokens[i].step_index);
        for (step, i) in order.into_iter().enumerate() {
            self.tokens[i].step_index = step;
        }
    }

    /// Grow or shrink a token by one discrete step, both axes clamped to
    /// the step-operation range. Unknown id is a no-op.
    pub fn scale_step(&mut self, id: &TokenId, direction: ScaleStep) {
        let Some(token) = self.token_mut(id) else {
            log::debug!("scale_step on unknown token {id}");
            return;
        };
        let delta = match direction {
            ScaleStep::Grow => SCALE_STEP,
            ScaleStep::Shrink => -SCALE_STEP,
        };
        token.width = (token.width + delta).clamp(MIN_STEP_SIZE, MAX_STEP_SIZE);
        token.height = (token.height + delta).clamp(MIN_STEP_SIZE, MAX_STEP_SIZE);
    }

    /// Toggle the horizontal mirror flag. Unknown id is a no-op.
    pub fn toggle_mirror(&mut self, id: &TokenId) {
        if let Some(token) = self.token_mut(id) {
            token.mirrored = !token.mirrored;
        }
    }

    /// Set the per-token volume, clamped to [0, 1]. Unknown id is a no-op.
    pub fn set_volume(&mut self, id: &TokenId, volume: f32) {
        if let Some(token) = self.token_mut(id) {
            token.volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn token(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| &t.id == id)
    }

    pub(crate) fn token_mut(&mut self, id: &TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| &t.id == id)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens whose step index equals `step` (normally exactly one).
    pub fn tokens_at_step(&self, step: usize) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.step_index == step)
    }

    /// Topmost token whose bounding box contains the point, if any.
    /// Hit testing for the painter side; rotation is ignored on purpose
    /// (sessions classify against the untransformed box).
    pub fn hit_test(&self, point: Point) -> Option<&Token> {
        self.tokens
            .iter()
            .filter(|t| {
                point.x >= t.position.x
                    && point.x <= t.position.x + t.width
                    && point.y >= t.position.y
                    && point.y <= t.position.y + t.height
            })
            .max_by_key(|t| t.z_order)
    }

    /// Read-only ordered snapshot for an external painter, bottom-most
    /// first. `current_step` marks which token gets the highlight flag.
    pub fn snapshot(&self, current_step: Option<usize>) -> Vec<TokenSnapshot> {
        let mut view: Vec<TokenSnapshot> = self
            .tokens
            .iter()
            .map(|t| TokenSnapshot::of(t, current_step))
            .collect();
        view.sort_by_key(|s| s.z_order);
        view
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> StickerDescriptor {
        StickerDescriptor::new("star")
    }

    fn assert_steps_contiguous(board: &Board) {
        let mut steps: Vec<usize> = board.tokens().iter().map(|t| t.step_index).collect();
        steps.sort_unstable();
        let expected: Vec<usize> = (0..board.len()).collect();
        assert_eq!(steps, expected, "step indices must be contiguous 0..N-1");
    }

    #[test]
    fn drop_assigns_ordering_fields() {
        let mut board = Board::new();
        board.drop_token(&star(), 100.0, 100.0);
        board.drop_token(&star(), 200.0, 200.0);
        let c = board.drop_token(&star(), 300.0, 300.0);

        let third = board.token(&c).unwrap();
        assert_eq!(third.step_index, 2);
        assert_eq!(third.z_order, 2);
        assert_eq!(third.width, DEFAULT_TOKEN_SIZE);
        assert_steps_contiguous(&board);
    }

    #[test]
    fn drop_ids_are_unique_after_removal() {
        let mut board = Board::new();
        let a = board.drop_token(&star(), 100.0, 100.0);
        board.remove_token(&a);
        let b = board.drop_token(&star(), 100.0, 100.0);
        assert_ne!(a, b, "serials must never be reused");
    }

    #[test]
    fn removal_renumbers_steps_not_z() {
        let mut board = Board::new();
        let a = board.drop_token(&star(), 100.0, 100.0);
        let b = board.drop_token(&star(), 200.0, 100.0);
        let c = board.drop_token(&star(), 300.0, 100.0);

        board.remove_token(&b);

        assert_eq!(board.token(&a).unwrap().step_index, 0);
        assert_eq!(board.token(&c).unwrap().step_index, 1);
        assert_steps_contiguous(&board);

        // z-orders keep their gap
        assert_eq!(board.token(&a).unwrap().z_order, 0);
        assert_eq!(board.token(&c).unwrap().z_order, 2);
    }

    #[test]
    fn removal_of_unknown_id_is_noop() {
        let mut board = Board::new();
        board.drop_token(&star(), 100.0, 100.0);
        board.remove_token(&TokenId::new("ghost-99"));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn contiguity_over_interleaved_drops_and_removals() {
        let mut board = Board::new();
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(board.drop_token(&star(), 50.0 * i as f32, 50.0));
        }
        // Remove from the middle, the front, and the back.
        board.remove_token(&ids[3]);
        board.remove_token(&ids[0]);
        board.remove_token(&ids[7]);
        assert_steps_contiguous(&board);

        board.drop_token(&star(), 400.0, 400.0);
        assert_steps_contiguous(&board);
    }

    #[test]
    fn scale_step_clamps_to_range() {
        let mut board = Board::new();
        let id = board.drop_token(&star(), 100.0, 100.0);

        for _ in 0..40 {
            board.scale_step(&id, ScaleStep::Grow);
        }
        assert_eq!(board.token(&id).unwrap().width, MAX_STEP_SIZE);

        for _ in 0..40 {
            board.scale_step(&id, ScaleStep::Shrink);
        }
        assert_eq!(board.token(&id).unwrap().height, MIN_STEP_SIZE);
    }

    #[test]
    fn volume_clamped_to_unit_range() {
        let mut board = Board::new();
        let id = board.drop_token(&star(), 100.0, 100.0);
        board.set_volume(&id, 1.5);
        assert_eq!(board.token(&id).unwrap().volume, 1.0);
        board.set_volume(&id, -0.5);
        assert_eq!(board.token(&id).unwrap().volume, 0.0);
    }

    #[test]
    fn snapshot_is_paint_ordered_and_highlights_current_step() {
        let mut board = Board::new();
        let a = board.drop_token(&star(), 100.0, 100.0);
        let b = board.drop_token(&star(), 200.0, 100.0);
        board.move_layer(&a, LayerMove::Up); // a now paints above b

        let view = board.snapshot(Some(1));
        assert_eq!(view[0].id, b);
        assert_eq!(view[1].id, a);
        assert!(view.iter().any(|s| s.highlighted && s.step_index == 1));
        assert!(!view.iter().any(|s| s.highlighted && s.step_index == 0));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut board = Board::new();
        let a = board.drop_token(&star(), 100.0, 100.0);
        let b = board.drop_token(&star(), 110.0, 110.0); // overlaps a
        assert_eq!(board.hit_test(Point::new(110.0, 110.0)).unwrap().id, b);

        board.move_layer(&a, LayerMove::Up);
        assert_eq!(board.hit_test(Point::new(110.0, 110.0)).unwrap().id, a);
    }
}
