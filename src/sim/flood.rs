//! Flood fills over the field's adjacency graph
//!
//! One breadth-first fill serves both color matching and ceiling support; the
//! two differ only in which neighbor edges they follow.

use std::collections::{BTreeSet, VecDeque};

use super::bubble::{Bubble, BubbleId};
use super::field::BubbleField;

/// Every bubble reachable from `seeds` through edges accepted by `follow`
///
/// Two bubbles share an edge when their centres are closer than `threshold`
/// and `follow(current, neighbor)` holds. Seeds missing from the field are
/// skipped. The result always contains every present seed.
pub fn connected_group<F>(
    field: &BubbleField,
    seeds: &[BubbleId],
    threshold: f32,
    follow: F,
) -> BTreeSet<BubbleId>
where
    F: Fn(&Bubble, &Bubble) -> bool,
{
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    for &seed in seeds {
        if field.contains(seed) && visited.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(id) = queue.pop_front() {
        let Some(current) = field.get(id) else {
            continue;
        };
        for neighbor_id in field.neighbors(id, threshold) {
            if visited.contains(&neighbor_id) {
                continue;
            }
            let Some(neighbor) = field.get(neighbor_id) else {
                continue;
            };
            if follow(current, neighbor) {
                visited.insert(neighbor_id);
                queue.push_back(neighbor_id);
            }
        }
    }

    visited
}

/// Same-color group containing `seed`
///
/// Returns an empty set if `seed` is not in the field.
pub fn find_match(field: &BubbleField, seed: BubbleId, threshold: f32) -> BTreeSet<BubbleId> {
    let Some(color) = field.get(seed).map(|b| b.color) else {
        return BTreeSet::new();
    };
    connected_group(field, &[seed], threshold, |_, neighbor| {
        neighbor.color == color
    })
}

/// Bubbles with no any-color path back to the ceiling
pub fn find_floating(field: &BubbleField, radius: f32, threshold: f32) -> BTreeSet<BubbleId> {
    let anchors = field.ceiling_ids(radius);
    let supported = connected_group(field, &anchors, threshold, |_, _| true);
    field.ids().filter(|id| !supported.contains(id)).collect()
}
