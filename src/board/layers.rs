//! Layer moves: nearest-neighbor z-order swaps.
//!
//! A layer move is a swap with the nearest z neighbor in the requested
//! direction, never a resort. Tokens that are not that neighbor are never
//! touched, so a sequence of moves can only permute existing z values or
//! extend the range by one at either end.

use super::token::TokenId;
use super::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMove {
    Up,
    Down,
}

impl Board {
    /// Move a token one layer up or down.
    ///
    /// - `Up`: swap z with the token holding the smallest z strictly
    ///   greater than ours; if we already hold the maximum, promote to
    ///   max + 1.
    /// - `Down`: symmetric; with no lower neighbor, demote to
    ///   max(0, min - 1).
    ///
    /// Unknown id is a no-op.
    pub fn move_layer(&mut self, id: &TokenId, direction: LayerMove) {
        let Some(subject) = self.tokens().iter().position(|t| &t.id == id) else {
            log::debug!("move_layer on unknown token {id}");
            return;
        };
        let subject_z = self.tokens()[subject].z_order;

        let neighbor = match direction {
            LayerMove::Up => self
                .tokens()
                .iter()
                .enumerate()
                .filter(|(i, t)| *i != subject && t.z_order > subject_z)
                .min_by_key(|(_, t)| t.z_order)
                .map(|(i, _)| i),
            LayerMove::Down => self
                .tokens()
                .iter()
                .enumerate()
                .filter(|(i, t)| *i != subject && t.z_order < subject_z)
                .max_by_key(|(_, t)| t.z_order)
                .map(|(i, _)| i),
        };

        match neighbor {
            Some(other) => {
                let other_z = self.tokens[other].z_order;
                self.tokens[other].z_order = subject_z;
                self.tokens[subject].z_order = other_z;
            }
            None => {
                // Already at the extreme: step past the global bound.
                let new_z = match direction {
                    LayerMove::Up => {
                        self.tokens.iter().map(|t| t.z_order).max().unwrap_or(0) + 1
                    }
                    LayerMove::Down => {
                        (self.tokens.iter().map(|t| t.z_order).min().unwrap_or(0) - 1).max(0)
                    }
                };
                self.tokens[subject].z_order = new_z;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StickerDescriptor;

    fn board_with_z(zs: &[i32]) -> (Board, Vec<TokenId>) {
        let mut board = Board::new();
        let ids: Vec<TokenId> = zs
            .iter()
            .map(|_| board.drop_token(&StickerDescriptor::new("star"), 100.0, 100.0))
            .collect();
        for (id, &z) in ids.iter().zip(zs) {
            board.token_mut(id).unwrap().z_order = z;
        }
        (board, ids)
    }

    fn assert_distinct_z(board: &Board) {
        let mut zs: Vec<i32> = board.tokens().iter().map(|t| t.z_order).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), board.len(), "z-orders must stay pairwise distinct");
    }

    #[test]
    fn up_swaps_with_nearest_greater() {
        let (mut board, ids) = board_with_z(&[1, 2, 5]);
        board.move_layer(&ids[0], LayerMove::Up);

        // 1 swaps with 2, never jumps to 5.
        assert_eq!(board.token(&ids[0]).unwrap().z_order, 2);
        assert_eq!(board.token(&ids[1]).unwrap().z_order, 1);
        assert_eq!(board.token(&ids[2]).unwrap().z_order, 5);
        assert_distinct_z(&board);
    }

    #[test]
    fn up_at_top_promotes_past_max() {
        let (mut board, ids) = board_with_z(&[1, 2, 5]);
        board.move_layer(&ids[2], LayerMove::Up);
        assert_eq!(board.token(&ids[2]).unwrap().z_order, 6);
        assert_distinct_z(&board);
    }

    #[test]
    fn down_swaps_with_nearest_lower() {
        let (mut board, ids) = board_with_z(&[1, 3, 7]);
        board.move_layer(&ids[2], LayerMove::Down);
        assert_eq!(board.token(&ids[2]).unwrap().z_order, 3);
        assert_eq!(board.token(&ids[1]).unwrap().z_order, 7);
        assert_distinct_z(&board);
    }

    #[test]
    fn down_at_bottom_demotes_but_not_below_zero() {
        let (mut board, ids) = board_with_z(&[0, 2]);
        board.move_layer(&ids[0], LayerMove::Down);
        assert_eq!(board.token(&ids[0]).unwrap().z_order, 0);

        let (mut board, ids) = board_with_z(&[3, 5]);
        board.move_layer(&ids[0], LayerMove::Down);
        assert_eq!(board.token(&ids[0]).unwrap().z_order, 2);
    }

    #[test]
    fn unknown_id_is_noop() {
        let (mut board, _) = board_with_z(&[1, 2]);
        board.move_layer(&TokenId::new("ghost-0"), LayerMove::Up);
        let zs: Vec<i32> = board.tokens().iter().map(|t| t.z_order).collect();
        assert_eq!(zs, vec![1, 2]);
    }

    #[test]
    fn distinctness_survives_random_walk() {
        let (mut board, ids) = board_with_z(&[0, 1, 2, 3, 4]);
        // Deterministic pseudo-random walk over moves.
        let mut seed = 0x2545f491u32;
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let id = &ids[(seed as usize) % ids.len()];
            let dir = if seed & 1 == 0 {
                LayerMove::Up
            } else {
                LayerMove::Down
            };
            board.move_layer(id, dir);
            assert_distinct_z(&board);
        }
    }
}
