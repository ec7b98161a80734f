//! Property tests for the field invariants

use std::collections::BTreeSet;

use glam::Vec2;
use proptest::prelude::*;

use bubble_burst::sim::{
    Bubble, BubbleColor, BubbleField, BubbleId, GameEvent, GamePhase, GridCell, cell_center,
    find_floating, find_match,
};
use bubble_burst::{Engine, Tuning};

const R: f32 = 20.0;
const NEIGHBOR: f32 = R * 2.5;

/// Build a field from (row, col, color) triples, skipping repeated cells
fn build_field(cells: &[(u32, u32, usize)]) -> BubbleField {
    let mut field = BubbleField::new();
    let mut seen = BTreeSet::new();
    let mut next = 1;
    for &(row, col, color) in cells {
        if !seen.insert((row, col)) {
            continue;
        }
        let pos = cell_center(GridCell::new(row, col), R, 1.75);
        field.insert(Bubble::settled(BubbleId(next), pos, BubbleColor::ALL[color]));
        next += 1;
    }
    field
}

fn random_cells() -> impl Strategy<Value = Vec<(u32, u32, usize)>> {
    prop::collection::vec((0u32..8, 0u32..15, 0usize..4), 1..70)
}

proptest! {
    #[test]
    fn match_group_is_seed_colored_and_connected(cells in random_cells(), pick in any::<prop::sample::Index>()) {
        let field = build_field(&cells);
        let ids: Vec<_> = field.ids().collect();
        let seed = ids[pick.index(ids.len())];
        let color = field.get(seed).unwrap().color;

        let group = find_match(&field, seed, NEIGHBOR);
        prop_assert!(group.contains(&seed));
        for id in &group {
            prop_assert_eq!(field.get(*id).unwrap().color, color);
        }
        // Closed under same-color adjacency: no same-color neighbor is left out
        for id in &group {
            for n in field.neighbors(*id, NEIGHBOR) {
                if field.get(n).unwrap().color == color {
                    prop_assert!(group.contains(&n));
                }
            }
        }
        // Every member other than the seed touches another member
        if group.len() > 1 {
            for id in &group {
                let touches = field.neighbors(*id, NEIGHBOR).iter().any(|n| group.contains(n));
                prop_assert!(touches);
            }
        }
    }

    #[test]
    fn removing_floating_leaves_everything_supported(cells in random_cells()) {
        let mut field = build_field(&cells);
        let floating = find_floating(&field, R, NEIGHBOR);
        field.remove_all(&floating);

        prop_assert!(find_floating(&field, R, NEIGHBOR).is_empty());
        if !field.is_empty() {
            prop_assert!(!field.ceiling_ids(R).is_empty());
        }
    }

    #[test]
    fn played_games_keep_cells_unique_and_score_consistent(
        seed in any::<u64>(),
        aims in prop::collection::vec((0.0f32..600.0, 0.0f32..520.0), 1..25),
    ) {
        let mut engine = Engine::new(seed, Tuning::default()).unwrap();
        let mut expected_score = 0u64;

        for (x, y) in aims {
            if engine.is_game_over() {
                break;
            }
            engine.aim(Vec2::new(x, y));
            engine.launch();
            for _ in 0..2000 {
                let snap = engine.tick().unwrap();
                for event in &snap.events {
                    match event {
                        GameEvent::Matched { ids, points, .. } => {
                            prop_assert!(ids.len() >= 3);
                            prop_assert_eq!(*points, 10 * ids.len() as u64);
                            expected_score += points;
                        }
                        GameEvent::FloatingPopped { ids, points } => {
                            prop_assert_eq!(*points, 10 * ids.len() as u64);
                            expected_score += points;
                        }
                        _ => {}
                    }
                }
                if matches!(snap.phase, GamePhase::Aiming | GamePhase::Ended) {
                    break;
                }
            }

            let bubbles: Vec<_> = engine.bubbles().collect();
            for (i, a) in bubbles.iter().enumerate() {
                for b in &bubbles[i + 1..] {
                    prop_assert!(a.pos.distance(b.pos) >= 1.0, "{:?} and {:?} share a cell", a.id, b.id);
                }
            }
            prop_assert_eq!(engine.score(), expected_score);
        }
    }
}
