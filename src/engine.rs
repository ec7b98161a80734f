//! Engine facade for the render/input layer
//!
//! Holds the game state and the pointer/click input collected between frames.
//! The host calls [`Engine::tick`] at a fixed cadence and draws the returned
//! [`Snapshot`].

use glam::Vec2;

use crate::sim::{self, BubbleColor, GamePhase, GameState, SimError, Snapshot, TickInput};
use crate::tuning::{Tuning, TuningError};

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    input: TickInput,
}

impl Engine {
    /// Validate `tuning` and start a game with `seed`
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self::from_state(GameState::new(seed, tuning)?))
    }

    /// Wrap an existing state (scripted boards, replays)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
        }
    }

    /// Start a fresh game with a new seed
    pub fn initialize(&mut self, seed: u64) -> Snapshot {
        self.state = GameState::build(seed, self.state.tuning.clone());
        self.input = TickInput::default();
        Snapshot::capture(&mut self.state)
    }

    /// Start over with the current seed; always allowed
    pub fn restart(&mut self) -> Snapshot {
        sim::restart(&mut self.state);
        self.input = TickInput::default();
        Snapshot::capture(&mut self.state)
    }

    /// Current frame without advancing the simulation; drains pending events
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::capture(&mut self.state)
    }

    /// Update the pending aim from a pointer position
    pub fn aim(&mut self, pointer: Vec2) {
        sim::aim(&mut self.state, pointer);
    }

    /// Fire the loaded bubble; ignored unless aiming
    pub fn launch(&mut self) {
        sim::launch(&mut self.state);
    }

    /// Queue input for the next tick instead of applying it now
    pub fn queue_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Advance one tick and return the frame snapshot
    pub fn tick(&mut self) -> Result<Snapshot, SimError> {
        let input = std::mem::take(&mut self.input);
        sim::tick(&mut self.state, &input)?;
        Ok(Snapshot::capture(&mut self.state))
    }

    pub fn score(&self) -> u64 {
        self.state.score.score
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &sim::Bubble> {
        self.state.field.iter()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::Ended
    }

    pub fn next_color(&self) -> BubbleColor {
        self.state.shooter.next
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            palette_size: 0,
            ..Tuning::default()
        };
        assert!(Engine::new(1, tuning).is_err());
    }

    #[test]
    fn test_queued_input_is_one_shot() {
        let mut engine = Engine::new(1, Tuning::default()).unwrap();
        engine.queue_input(TickInput {
            launch: true,
            ..Default::default()
        });
        let snap = engine.tick().unwrap();
        assert_eq!(snap.phase, GamePhase::InFlight);
        assert!(snap.loaded.is_none());
        assert!(snap.in_flight.is_some());
        assert!(matches!(snap.events[0], sim::GameEvent::Launched { .. }));

        // Launch flag does not linger into the next tick
        let snap = engine.tick().unwrap();
        assert_eq!(snap.phase, GamePhase::InFlight);
        assert!(snap.events.is_empty());
        assert_eq!(engine.state().shots_fired, 1);
    }

    #[test]
    fn test_snapshot_reports_current_board() {
        let mut engine = Engine::new(3, Tuning::default()).unwrap();
        let before: Vec<_> = engine.bubbles().cloned().collect();
        let snap = engine.snapshot();
        assert_eq!(snap.phase, GamePhase::Aiming);
        assert_eq!(snap.field, before);
        assert!(snap.events.is_empty());
        assert_eq!(engine.state().time_ticks, 0);
    }

    #[test]
    fn test_initialize_changes_seed() {
        let mut engine = Engine::new(1, Tuning::default()).unwrap();
        let snap = engine.initialize(2);
        assert_eq!(engine.state().seed, 2);
        assert_eq!(snap.field.len(), 75);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
    }
}
