//! Game state and core simulation types
//!
//! One explicit context object owns everything the rules touch: the field,
//! the projectile, the shooter, score, pacing and the pending floating pop.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, BubbleColor, BubbleId};
use super::field::BubbleField;
use super::grid::{GridCell, cell_center};
use super::projectile::Projectile;
use super::rules::{RoundPacer, ScoreTracker};
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Loaded bubble waiting for a launch
    Aiming,
    /// Projectile travelling
    InFlight,
    /// Shot settled; floating bubbles waiting to drop
    Resolving,
    /// Run ended; only restart leaves this phase
    Ended,
}

/// Gameplay events for the audio/particle layers (drained each frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { color: BubbleColor, angle: f32 },
    Snapped { id: BubbleId, cell: GridCell, color: BubbleColor },
    Matched { ids: Vec<BubbleId>, color: BubbleColor, points: u64 },
    NoMatch { group_size: usize },
    FloatingScheduled { count: usize },
    FloatingPopped { ids: Vec<BubbleId>, points: u64 },
    RowInjected,
    GameOver { score: u64 },
    Restarted,
}

/// Floating bubbles scheduled to drop after a short delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPop {
    pub ticks_remaining: u32,
    pub ids: BTreeSet<BubbleId>,
}

/// The launcher: loaded bubble, next-up bubble and the current aim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shooter {
    pub loaded: BubbleColor,
    pub next: BubbleColor,
    /// Launch angle in radians (screen space, straight up is -PI/2)
    pub aim_angle: f32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub field: BubbleField,
    pub projectile: Option<Projectile>,
    pub shooter: Shooter,
    pub score: ScoreTracker,
    pub pacer: RoundPacer,
    pub pending_pop: Option<PendingPop>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub shots_fired: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Validate `tuning` and create a new game: initial rows filled, shooter loaded
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// Create a new game from an already validated tuning
    pub(crate) fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            phase: GamePhase::Aiming,
            field: BubbleField::new(),
            projectile: None,
            shooter: Shooter {
                loaded: BubbleColor::Blue,
                next: BubbleColor::Blue,
                aim_angle: -std::f32::consts::FRAC_PI_2,
            },
            score: ScoreTracker::default(),
            pacer: RoundPacer::default(),
            pending_pop: None,
            events: Vec::new(),
            shots_fired: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        for row in 0..state.tuning.initial_rows {
            state.spawn_row(row);
        }
        state.shooter.loaded = state.random_field_color();
        state.shooter.next = state.random_field_color();

        log::info!(
            "New game (seed {}): {} bubbles in {} rows",
            seed,
            state.field.len(),
            state.tuning.initial_rows
        );
        state
    }

    /// Allocate a new bubble ID
    pub fn next_bubble_id(&mut self) -> BubbleId {
        let id = BubbleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Uniform draw from the active palette
    pub fn random_palette_color(&mut self) -> BubbleColor {
        let palette = self.tuning.palette();
        palette[self.rng.random_range(0..palette.len())]
    }

    /// Uniform draw from the colors still on the board (palette if empty)
    pub fn random_field_color(&mut self) -> BubbleColor {
        let present = self.field.colors_present();
        if present.is_empty() {
            self.random_palette_color()
        } else {
            present[self.rng.random_range(0..present.len())]
        }
    }

    /// Centre of a grid cell under the current tuning
    pub fn cell_center(&self, cell: GridCell) -> Vec2 {
        cell_center(cell, self.tuning.bubble_radius, self.tuning.row_spacing_factor)
    }

    /// Fill `row` with random palette bubbles
    pub fn spawn_row(&mut self, row: u32) {
        for col in 0..self.tuning.cols {
            let pos = self.cell_center(GridCell::new(row, col));
            let color = self.random_palette_color();
            let id = self.next_bubble_id();
            self.field.insert(Bubble::settled(id, pos, color));
        }
    }

    /// Push every settled bubble down one row and fill row 0
    pub fn inject_row(&mut self) {
        let dy = self.tuning.row_height();
        self.field.shift_down(dy);
        self.spawn_row(0);
        log::info!("Row injected ({} bubbles on board)", self.field.len());
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(7, Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.field.len(), 5 * 15);
        assert!(state.projectile.is_none());
        assert_eq!(state.score.score, 0);
        assert_eq!(state.pacer.shots_since_match, 0);

        let present = state.field.colors_present();
        assert!(present.contains(&state.shooter.loaded));
        assert!(present.contains(&state.shooter.next));
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            palette_size: 0,
            ..Tuning::default()
        };
        assert!(matches!(GameState::new(1, tuning), Err(TuningError::Invalid(_))));

        let tuning = Tuning {
            rows: u32::MAX,
            ..Tuning::default()
        };
        assert!(GameState::new(1, tuning).is_err());
    }

    #[test]
    fn test_palette_draw_survives_emptied_palette() {
        let mut state = GameState::new(9, Tuning::default()).unwrap();
        state.tuning.palette_size = 0;
        for _ in 0..10 {
            assert_eq!(state.random_palette_color(), BubbleColor::Blue);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(42, Tuning::default()).unwrap();
        let b = GameState::new(42, Tuning::default()).unwrap();
        let colors_a: Vec<_> = a.field.iter().map(|b| b.color).collect();
        let colors_b: Vec<_> = b.field.iter().map(|b| b.color).collect();
        assert_eq!(colors_a, colors_b);
        assert_eq!(a.shooter, b.shooter);
    }

    #[test]
    fn test_inject_row_shifts_and_fills() {
        let mut state = GameState::new(1, Tuning::default()).unwrap();
        let before: Vec<_> = state.field.iter().map(|b| (b.id, b.pos)).collect();
        state.inject_row();

        assert_eq!(state.field.len(), before.len() + 15);
        for (id, pos) in before {
            let moved = state.field.get(id).unwrap();
            assert_eq!(moved.pos, pos + Vec2::new(0.0, 35.0));
        }
        let top: Vec<_> = state.field.iter().filter(|b| b.pos.y == 20.0).collect();
        assert_eq!(top.len(), 15);
    }

    #[test]
    fn test_field_color_draw_uses_present_colors() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        state.field.clear();
        let id = state.next_bubble_id();
        state
            .field
            .insert(Bubble::settled(id, Vec2::new(20.0, 20.0), BubbleColor::Purple));
        for _ in 0..20 {
            assert_eq!(state.random_field_color(), BubbleColor::Purple);
        }
    }
}
