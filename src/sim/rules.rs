//! Scoring, row pacing and the game-over line

use serde::{Deserialize, Serialize};

use super::field::BubbleField;

/// Running score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    /// Total bubbles removed this run (matched + floating)
    pub bubbles_popped: u64,
}

impl ScoreTracker {
    /// Credit `count` removed bubbles, returning the points awarded
    pub fn award(&mut self, count: usize, points_per_bubble: u64) -> u64 {
        let points = count as u64 * points_per_bubble;
        self.score += points;
        self.bubbles_popped += count as u64;
        points
    }
}

/// Shot counter that pushes a new row in after too many misses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPacer {
    pub shots_since_match: u32,
}

impl RoundPacer {
    /// Record a resolved shot
    pub fn record_shot(&mut self, matched: bool) {
        if matched {
            self.shots_since_match = 0;
        } else {
            self.shots_since_match += 1;
        }
    }

    /// Check the threshold before the next shot; resets when it fires
    pub fn take_row_due(&mut self, threshold: u32) -> bool {
        if self.shots_since_match >= threshold {
            self.shots_since_match = 0;
            true
        } else {
            false
        }
    }
}

/// True if any settled bubble's lower edge is past `line_y`
pub fn crosses_game_over_line(field: &BubbleField, radius: f32, line_y: f32) -> bool {
    field.lowest_edge(radius).is_some_and(|edge| edge > line_y)
}
