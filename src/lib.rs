//! Bubble Burst - an arcade bubble-popping shooter engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, projectile, matching, support, pacing)
//! - `engine`: Facade consumed by the render/input layer
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation rate the per-tick speeds are expressed against
    pub const SIM_HZ: u32 = 60;

    /// Bubble radius in pixels
    pub const BUBBLE_RADIUS: f32 = 20.0;
    /// Columns per row
    pub const COLS: u32 = 15;
    /// Nominal board rows
    pub const ROWS: u32 = 12;
    /// Rows searched past `ROWS` when snapping
    pub const SNAP_EXTRA_ROWS: u32 = 5;
    /// Rows filled at game start
    pub const INITIAL_ROWS: u32 = 5;
    /// Vertical distance between rows, as a multiple of the radius
    pub const ROW_SPACING_FACTOR: f32 = 1.75;
    /// Widest board a tuning may ask for
    pub const MAX_COLS: u32 = 64;
    /// Most rows the snap search may cover (`rows + snap_extra_rows`)
    pub const MAX_SNAP_ROWS: u32 = 128;

    /// Board height in pixels
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Shooter centre line
    pub const SHOOTER_Y: f32 = 550.0;
    /// Any bubble whose lower edge passes this line ends the run
    pub const GAME_OVER_LINE_Y: f32 = 480.0;

    /// Projectile speed (pixels per tick)
    pub const SHOT_SPEED: f32 = 15.0;
    /// Non-matching shots before a new row is pushed in
    pub const SHOTS_BEFORE_NEW_ROW: u32 = 5;

    /// Smallest same-color group that pops
    pub const MIN_MATCH: usize = 3;
    /// Points per removed bubble
    pub const POINTS_PER_BUBBLE: u64 = 10;

    /// Centre distance (in radii) under which two settled bubbles are neighbors
    pub const NEIGHBOR_FACTOR: f32 = 2.5;
    /// Centre distance (in radii) under which the projectile hits a bubble
    pub const COLLISION_FACTOR: f32 = 2.0;
    /// A cell is occupied when a bubble centre is closer than this (pixels)
    pub const OCCUPANCY_EPSILON: f32 = 1.0;

    /// Delay before floating bubbles drop (200 ms at 60 Hz)
    pub const FLOATING_POP_DELAY_TICKS: u32 = SIM_HZ / 5;
}

/// Unit vector pointing along `angle` (radians, screen coordinates: +y is down)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
