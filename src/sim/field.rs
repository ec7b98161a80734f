//! The settled bubble field
//!
//! A flat arena of static bubbles kept sorted by [`BubbleId`]. Adjacency and
//! occupancy are computed from positions, never from identity.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, BubbleColor, BubbleId};

/// All settled bubbles on the board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Iterate bubbles in id order
    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = BubbleId> + '_ {
        self.bubbles.iter().map(|b| b.id)
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bubbles[i])
    }

    pub fn contains(&self, id: BubbleId) -> bool {
        self.get(id).is_some()
    }

    /// Add a settled bubble
    ///
    /// Ids are handed out monotonically, so pushing keeps the arena sorted;
    /// an out-of-order id falls back to a sorted insert.
    pub fn insert(&mut self, bubble: Bubble) {
        match self.bubbles.last() {
            Some(last) if last.id >= bubble.id => {
                let idx = self.bubbles.partition_point(|b| b.id < bubble.id);
                self.bubbles.insert(idx, bubble);
            }
            _ => self.bubbles.push(bubble),
        }
    }

    /// Remove every bubble in `ids`, returning the removed bubbles in id order
    pub fn remove_all(&mut self, ids: &BTreeSet<BubbleId>) -> Vec<Bubble> {
        let mut removed = Vec::with_capacity(ids.len());
        self.bubbles.retain(|b| {
            if ids.contains(&b.id) {
                removed.push(b.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    /// Settled bubbles within `threshold` of `id` (excluding itself)
    pub fn neighbors(&self, id: BubbleId, threshold: f32) -> Vec<BubbleId> {
        let Some(center) = self.get(id).map(|b| b.pos) else {
            return Vec::new();
        };
        self.bubbles
            .iter()
            .filter(|b| b.id != id && b.pos.distance(center) < threshold)
            .map(|b| b.id)
            .collect()
    }

    /// True if a bubble centre sits within `epsilon` of `pos`
    pub fn is_occupied(&self, pos: Vec2, epsilon: f32) -> bool {
        self.bubbles.iter().any(|b| b.pos.distance(pos) < epsilon)
    }

    /// First bubble (by id) whose centre is closer than `distance` to `pos`
    pub fn first_within(&self, pos: Vec2, distance: f32) -> Option<BubbleId> {
        self.bubbles
            .iter()
            .find(|b| b.pos.distance(pos) < distance)
            .map(|b| b.id)
    }

    /// Bubbles whose top edge is within one radius of the ceiling
    pub fn ceiling_ids(&self, radius: f32) -> Vec<BubbleId> {
        self.bubbles
            .iter()
            .filter(|b| b.pos.y - radius < radius)
            .map(|b| b.id)
            .collect()
    }

    /// Largest bubble lower edge, if any
    pub fn lowest_edge(&self, radius: f32) -> Option<f32> {
        self.bubbles
            .iter()
            .map(|b| b.pos.y + radius)
            .reduce(f32::max)
    }

    /// Move every settled bubble down by `dy`
    pub fn shift_down(&mut self, dy: f32) {
        for bubble in &mut self.bubbles {
            bubble.pos.y += dy;
        }
    }

    /// Distinct colors present, in first-seen (id) order
    pub fn colors_present(&self) -> Vec<BubbleColor> {
        let mut colors = Vec::new();
        for bubble in &self.bubbles {
            if !colors.contains(&bubble.color) {
                colors.push(bubble.color);
            }
        }
        colors
    }
}
