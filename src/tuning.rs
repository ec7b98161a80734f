//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::BubbleColor;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub bubble_radius: f32,
    pub cols: u32,
    pub rows: u32,
    /// Extra rows past `rows` covered by the snap search
    pub snap_extra_rows: u32,
    pub initial_rows: u32,
    pub row_spacing_factor: f32,
    pub field_height: f32,
    pub game_over_line_y: f32,
    /// Number of palette colors in play (1-6)
    pub palette_size: usize,

    // === Shooter ===
    pub shooter_y: f32,
    pub shot_speed: f32,

    // === Rules ===
    pub shots_before_new_row: u32,
    pub min_match: usize,
    pub points_per_bubble: u64,
    pub floating_pop_delay_ticks: u32,

    // === Distances ===
    pub neighbor_factor: f32,
    pub collision_factor: f32,
    pub occupancy_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bubble_radius: BUBBLE_RADIUS,
            cols: COLS,
            rows: ROWS,
            snap_extra_rows: SNAP_EXTRA_ROWS,
            initial_rows: INITIAL_ROWS,
            row_spacing_factor: ROW_SPACING_FACTOR,
            field_height: FIELD_HEIGHT,
            game_over_line_y: GAME_OVER_LINE_Y,
            palette_size: BubbleColor::ALL.len(),

            shooter_y: SHOOTER_Y,
            shot_speed: SHOT_SPEED,

            shots_before_new_row: SHOTS_BEFORE_NEW_ROW,
            min_match: MIN_MATCH,
            points_per_bubble: POINTS_PER_BUBBLE,
            floating_pop_delay_ticks: FLOATING_POP_DELAY_TICKS,

            neighbor_factor: NEIGHBOR_FACTOR,
            collision_factor: COLLISION_FACTOR,
            occupancy_epsilon: OCCUPANCY_EPSILON,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Board width in pixels (one bubble diameter per column)
    pub fn field_width(&self) -> f32 {
        self.cols as f32 * self.bubble_radius * 2.0
    }

    /// Vertical distance between adjacent rows
    pub fn row_height(&self) -> f32 {
        self.bubble_radius * self.row_spacing_factor
    }

    /// Rows enumerated by the snap search (`0..snap_rows`)
    pub fn snap_rows(&self) -> u32 {
        self.rows.saturating_add(self.snap_extra_rows)
    }

    pub fn neighbor_distance(&self) -> f32 {
        self.bubble_radius * self.neighbor_factor
    }

    pub fn collision_distance(&self) -> f32 {
        self.bubble_radius * self.collision_factor
    }

    /// Where the loaded bubble sits
    pub fn shooter_pos(&self) -> Vec2 {
        Vec2::new(self.field_width() / 2.0, self.shooter_y)
    }

    /// Where the next-up preview bubble sits
    pub fn preview_pos(&self) -> Vec2 {
        self.shooter_pos() + Vec2::new(self.bubble_radius * 4.0, 0.0)
    }

    /// Pointers below this line do not aim
    pub fn launch_line_y(&self) -> f32 {
        self.shooter_y - self.bubble_radius
    }

    /// The active slice of the palette (never empty)
    pub fn palette(&self) -> &'static [BubbleColor] {
        let all: &'static [BubbleColor] = &BubbleColor::ALL;
        &all[..self.palette_size.clamp(1, all.len())]
    }

    /// Reject combinations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: String| {
            log::warn!("Rejected tuning: {}", msg);
            Err(TuningError::Invalid(msg))
        };

        if !(self.bubble_radius > 0.0) {
            return invalid(format!("bubble_radius must be positive, got {}", self.bubble_radius));
        }
        if !(self.shot_speed > 0.0) {
            return invalid(format!("shot_speed must be positive, got {}", self.shot_speed));
        }
        if !(self.row_spacing_factor > 0.0) {
            return invalid(format!(
                "row_spacing_factor must be positive, got {}",
                self.row_spacing_factor
            ));
        }
        if self.cols == 0 || self.rows == 0 {
            return invalid("cols and rows must be non-zero".to_string());
        }
        if self.cols > MAX_COLS {
            return invalid(format!("cols must be at most {}, got {}", MAX_COLS, self.cols));
        }
        let Some(snap_rows) = self.rows.checked_add(self.snap_extra_rows) else {
            return invalid(format!(
                "rows ({}) + snap_extra_rows ({}) overflows",
                self.rows, self.snap_extra_rows
            ));
        };
        if snap_rows > MAX_SNAP_ROWS {
            return invalid(format!(
                "rows + snap_extra_rows must be at most {}, got {}",
                MAX_SNAP_ROWS, snap_rows
            ));
        }
        if self.initial_rows > self.rows {
            return invalid(format!(
                "initial_rows ({}) exceeds rows ({})",
                self.initial_rows, self.rows
            ));
        }
        if self.palette_size == 0 || self.palette_size > BubbleColor::ALL.len() {
            return invalid(format!(
                "palette_size must be within 1..={}, got {}",
                BubbleColor::ALL.len(),
                self.palette_size
            ));
        }
        if self.min_match == 0 {
            return invalid("min_match must be at least 1".to_string());
        }
        if self.shots_before_new_row == 0 {
            return invalid("shots_before_new_row must be at least 1".to_string());
        }

        let r = self.bubble_radius;
        let row_y = |row: u32| row as f32 * self.row_height() + r;

        if self.initial_rows > 0 && row_y(self.initial_rows - 1) + r > self.game_over_line_y {
            return invalid(format!(
                "initial field ({} rows) already crosses the game-over line at {}",
                self.initial_rows, self.game_over_line_y
            ));
        }
        if self.launch_line_y() < self.game_over_line_y {
            return invalid(format!(
                "launch line {} sits above the game-over line {}",
                self.launch_line_y(),
                self.game_over_line_y
            ));
        }
        // The last searched row must lie wholly past the game-over line so a
        // free cell always exists while the game is running.
        if row_y(self.snap_rows() - 1) - r <= self.game_over_line_y {
            return invalid(format!(
                "snap search ({} rows) does not reach past the game-over line at {}",
                self.snap_rows(),
                self.game_over_line_y
            ));
        }
        Ok(())
    }
}
