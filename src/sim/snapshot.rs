//! Read-only view handed to the render layer each frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, BubbleColor};
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState};

/// A bubble that is not (yet) part of the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceView {
    pub pos: Vec2,
    pub color: BubbleColor,
    /// Display color (0xRRGGBB)
    pub rgb: u32,
}

impl PieceView {
    pub fn new(pos: Vec2, color: BubbleColor) -> Self {
        Self {
            pos,
            color,
            rgb: color.rgb(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Settled bubbles in id order
    pub field: Vec<Bubble>,
    pub in_flight: Option<Projectile>,
    /// Loaded bubble at the shooter (only while aiming)
    pub loaded: Option<PieceView>,
    pub next: PieceView,
    pub aim_angle: f32,
    pub score: u64,
    pub shots_since_match: u32,
    pub game_over: bool,
    /// Events since the previous snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Capture `state`, draining its pending events
    pub fn capture(state: &mut GameState) -> Self {
        let events = state.drain_events();
        let loaded = match state.phase {
            GamePhase::Aiming => Some(PieceView::new(
                state.tuning.shooter_pos(),
                state.shooter.loaded,
            )),
            GamePhase::InFlight | GamePhase::Resolving | GamePhase::Ended => None,
        };
        Self {
            phase: state.phase,
            field: state.field.iter().cloned().collect(),
            in_flight: state.projectile.clone(),
            loaded,
            next: PieceView::new(state.tuning.preview_pos(), state.shooter.next),
            aim_angle: state.shooter.aim_angle,
            score: state.score.score,
            shots_since_match: state.pacer.shots_since_match,
            game_over: state.phase == GamePhase::Ended,
            events,
        }
    }
}
