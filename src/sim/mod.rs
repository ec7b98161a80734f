//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by bubble ID)
//! - No rendering or platform dependencies

pub mod bubble;
pub mod field;
pub mod flood;
pub mod grid;
pub mod projectile;
pub mod rules;
pub mod snap;
pub mod snapshot;
pub mod state;
pub mod tick;

use thiserror::Error;

pub use bubble::{Bubble, BubbleColor, BubbleId};
pub use field::BubbleField;
pub use flood::{connected_group, find_floating, find_match};
pub use grid::{GridCell, cell_center};
pub use projectile::{Contact, Projectile};
pub use rules::{RoundPacer, ScoreTracker, crosses_game_over_line};
pub use snap::nearest_free_cell;
pub use snapshot::{PieceView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, PendingPop, Shooter};
pub use tick::{TickInput, aim, launch, restart, tick};

/// Internal invariant violations; callers treat these as fatal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Every cell in the snap search range was taken
    #[error("no free grid cell near ({x}, {y}) within the snap search range")]
    NoFreeCell { x: f32, y: f32 },
}
