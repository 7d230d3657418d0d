//! Cross-module invariants exercised through the public API, the way
//! the demo binary drives it: gestures mutate the board, the sequencer
//! reads live counts, and the instrument mapping follows token ids.

use beatboard::board::{Board, LayerMove, Point, Rect, ScaleStep, StickerDescriptor, TokenId};
use beatboard::gesture::{GestureController, Pointers, SessionOutcome};
use beatboard::instruments::InstrumentBank;
use beatboard::sequencer::StepSequencer;

const CANVAS: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

fn assert_ordering_invariants(board: &Board) {
    let mut steps: Vec<usize> = board.tokens().iter().map(|t| t.step_index).collect();
    steps.sort_unstable();
    assert_eq!(
        steps,
        (0..board.len()).collect::<Vec<_>>(),
        "step indices must stay a contiguous 0..N-1"
    );

    let mut zs: Vec<i32> = board.tokens().iter().map(|t| t.z_order).collect();
    zs.sort_unstable();
    zs.dedup();
    assert_eq!(zs.len(), board.len(), "z-orders must stay pairwise distinct");
}

/// Tiny deterministic generator; xorshift is plenty for op shuffling.
struct Rng(u32);

impl Rng {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() as usize) % n
    }
}

#[test]
fn ordering_invariants_survive_random_op_sequences() {
    let kinds = ["star", "frog", "moon", "bolt", "heart"];
    let mut rng = Rng(0xbeef_cafe);
    let mut board = Board::new();
    let mut ids: Vec<TokenId> = Vec::new();

    for op in 0..400 {
        match rng.below(6) {
            0 | 1 => {
                let kind = kinds[op % kinds.len()];
                let x = (rng.below(700) + 50) as f32;
                let y = (rng.below(500) + 50) as f32;
                ids.push(board.drop_token(&StickerDescriptor::new(kind), x, y));
            }
            2 if !ids.is_empty() => {
                let id = ids.swap_remove(rng.below(ids.len()));
                board.remove_token(&id);
            }
            3 if !ids.is_empty() => {
                let id = &ids[rng.below(ids.len())];
                let dir = if rng.below(2) == 0 {
                    LayerMove::Up
                } else {
                    LayerMove::Down
                };
                board.move_layer(id, dir);
            }
            4 if !ids.is_empty() => {
                let id = &ids[rng.below(ids.len())];
                let dir = if rng.below(2) == 0 {
                    ScaleStep::Grow
                } else {
                    ScaleStep::Shrink
                };
                board.scale_step(id, dir);
            }
            5 if !ids.is_empty() => {
                let id = &ids[rng.below(ids.len())];
                board.toggle_mirror(id);
            }
            _ => {}
        }
        assert_ordering_invariants(&board);
    }
    assert!(!board.is_empty(), "sequence should leave survivors");
}

#[test]
fn sequencer_stays_in_range_while_board_shrinks() {
    let mut board = Board::new();
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(board.drop_token(&StickerDescriptor::new("star"), 100.0 * i as f32 + 60.0, 100.0));
    }

    let mut seq = StepSequencer::new(120.0);
    seq.play();

    // Remove a token between ticks; every fired step must resolve to
    // exactly one live token.
    for round in 0..5 {
        for _ in 0..4 {
            let step = seq.tick(board.len()).expect("playing with live tokens");
            assert_eq!(board.tokens_at_step(step).count(), 1);
        }
        if round < ids.len() - 1 {
            board.remove_token(&ids[round]);
            assert_ordering_invariants(&board);
        }
    }
}

#[test]
fn drag_to_trash_mid_playback_renumbers_and_keeps_playing() {
    let mut board = Board::new();
    let a = board.drop_token(&StickerDescriptor::new("star"), 100.0, 100.0);
    let b = board.drop_token(&StickerDescriptor::new("frog"), 300.0, 100.0);
    let c = board.drop_token(&StickerDescriptor::new("moon"), 500.0, 100.0);

    let mut seq = StepSequencer::new(120.0);
    seq.play();
    seq.tick(board.len());
    seq.tick(board.len());
    assert_eq!(seq.current_step(), 2);

    let mut ctl = GestureController::new(CANVAS);
    let grab = board.token(&b).unwrap().center();
    ctl.begin(&board, &b, Pointers::One(grab));
    ctl.update(&mut board, Pointers::One(Point::new(2_000.0, 2_000.0)));
    assert_eq!(ctl.end(&mut board), SessionOutcome::Removed(b));

    assert_ordering_invariants(&board);
    assert_eq!(board.token(&a).unwrap().step_index, 0);
    assert_eq!(board.token(&c).unwrap().step_index, 1);

    // Stale cursor (2) rewraps against the shrunken board.
    let step = seq.tick(board.len()).expect("still playing");
    assert!(step < board.len());
}

#[test]
fn instrument_assignment_is_stable_across_board_churn() {
    let bank = InstrumentBank::standard();
    let mut board = Board::new();
    let id = board.drop_token(&StickerDescriptor::new("bolt"), 200.0, 200.0);
    let name = bank.select(&id).name;

    // Geometry and ordering churn must never remap the token's sound.
    let other = board.drop_token(&StickerDescriptor::new("bolt"), 400.0, 200.0);
    board.move_layer(&id, LayerMove::Up);
    board.scale_step(&id, ScaleStep::Grow);
    board.remove_token(&other);
    assert_eq!(bank.select(&id).name, name);

    let mut ctl = GestureController::new(CANVAS);
    ctl.begin(&board, &id, Pointers::One(board.token(&id).unwrap().center()));
    ctl.update(&mut board, Pointers::One(Point::new(600.0, 400.0)));
    ctl.end(&mut board);
    assert_eq!(bank.select(&id).name, name);
}

#[test]
fn gesture_churn_preserves_ordering_invariants() {
    let mut board = Board::new();
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(board.drop_token(&StickerDescriptor::new("heart"), 150.0 * i as f32 + 80.0, 200.0));
    }

    let mut ctl = GestureController::new(CANVAS);
    for (i, id) in ids.iter().enumerate() {
        let center = board.token(id).unwrap().center();
        ctl.begin(&board, id, Pointers::One(center));
        let target = Point::new(120.0 + 90.0 * i as f32, 350.0);
        ctl.update(&mut board, Pointers::One(target));
        assert!(matches!(
            ctl.end(&mut board),
            SessionOutcome::Committed(_)
        ));
        assert_ordering_invariants(&board);
    }
    assert_eq!(board.len(), 4);
}
