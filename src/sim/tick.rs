//! Fixed timestep simulation tick
//!
//! Per shot: advance -> contact -> snap -> match -> (pop, support analysis,
//! delayed floating drop) -> game-over check -> pacing / row injection ->
//! next shot. Every transition is a total function over the phases; calls
//! that do not apply to the current phase are ignored.

use glam::Vec2;

use super::SimError;
use super::flood::{find_floating, find_match};
use super::projectile::Projectile;
use super::rules::crosses_game_over_line;
use super::snap;
use super::state::{GameEvent, GamePhase, GameState, PendingPop};
use crate::angle_between;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position to aim at
    pub aim: Option<Vec2>,
    /// Launch the loaded bubble
    pub launch: bool,
    /// Start over with the same seed and tuning
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), SimError> {
    if input.restart {
        restart(state);
        return Ok(());
    }
    if state.phase == GamePhase::Ended {
        return Ok(());
    }

    state.time_ticks += 1;

    if let Some(pointer) = input.aim {
        aim(state, pointer);
    }
    if input.launch {
        launch(state);
    }

    match state.phase {
        GamePhase::Aiming | GamePhase::Ended => {}
        GamePhase::InFlight => advance_projectile(state)?,
        GamePhase::Resolving => advance_pending_pop(state),
    }
    Ok(())
}

/// Point the shooter at `pointer`
///
/// Ignored outside [`GamePhase::Aiming`] or when the pointer is below the
/// launch line.
pub fn aim(state: &mut GameState, pointer: Vec2) {
    if state.phase != GamePhase::Aiming || pointer.y > state.tuning.launch_line_y() {
        return;
    }
    state.shooter.aim_angle = angle_between(state.tuning.shooter_pos(), pointer);
}

/// Fire the loaded bubble along the current aim. No-op unless aiming.
pub fn launch(state: &mut GameState) {
    if state.phase != GamePhase::Aiming {
        log::debug!("Launch ignored in phase {:?}", state.phase);
        return;
    }
    let tuning = &state.tuning;
    state.projectile = Some(Projectile::launch(
        tuning.shooter_pos(),
        state.shooter.loaded,
        tuning.bubble_radius,
        state.shooter.aim_angle,
        tuning.shot_speed,
    ));
    state.phase = GamePhase::InFlight;
    state.shots_fired += 1;
    state.events.push(GameEvent::Launched {
        color: state.shooter.loaded,
        angle: state.shooter.aim_angle,
    });
}

/// Reset to a fresh game with the stored seed and tuning
pub fn restart(state: &mut GameState) {
    *state = GameState::build(state.seed, state.tuning.clone());
    state.events.push(GameEvent::Restarted);
}

fn advance_projectile(state: &mut GameState) -> Result<(), SimError> {
    let width = state.tuning.field_width();
    let collision_distance = state.tuning.collision_distance();

    let Some(projectile) = state.projectile.as_mut() else {
        state.phase = GamePhase::Aiming;
        return Ok(());
    };
    let contact = projectile.step(&state.field, width, collision_distance);
    if contact.stops() {
        settle(state)?;
    }
    Ok(())
}

/// Snap the projectile into the field and resolve the shot
fn settle(state: &mut GameState) -> Result<(), SimError> {
    let Some(projectile) = state.projectile.take() else {
        return Ok(());
    };
    state.phase = GamePhase::Resolving;

    let id = state.next_bubble_id();
    let cell = snap::commit(&mut state.field, &projectile, id, &state.tuning)?;
    state.events.push(GameEvent::Snapped {
        id,
        cell,
        color: projectile.color,
    });

    let threshold = state.tuning.neighbor_distance();
    let group = find_match(&state.field, id, threshold);
    let matched = group.len() >= state.tuning.min_match;

    if matched {
        state.field.remove_all(&group);
        let points = state.score.award(group.len(), state.tuning.points_per_bubble);
        log::debug!("Matched {} {:?} bubbles (+{})", group.len(), projectile.color, points);
        state.events.push(GameEvent::Matched {
            ids: group.into_iter().collect(),
            color: projectile.color,
            points,
        });

        let floating = find_floating(&state.field, state.tuning.bubble_radius, threshold);
        if !floating.is_empty() {
            log::debug!("{} floating bubbles scheduled to drop", floating.len());
            state.events.push(GameEvent::FloatingScheduled {
                count: floating.len(),
            });
            state.pending_pop = Some(PendingPop {
                ticks_remaining: state.tuning.floating_pop_delay_ticks,
                ids: floating,
            });
        }
    } else {
        state.events.push(GameEvent::NoMatch {
            group_size: group.len(),
        });
    }
    state.pacer.record_shot(matched);

    if check_game_over(state) {
        return Ok(());
    }
    if state.pending_pop.is_some() {
        // A zero delay drops the floaters in the same tick
        advance_pending_pop(state);
    } else {
        prepare_next_shot(state);
    }
    Ok(())
}

/// Count down the pending floating drop; pop it when the delay runs out
fn advance_pending_pop(state: &mut GameState) {
    let Some(pending) = state.pending_pop.as_mut() else {
        prepare_next_shot(state);
        return;
    };
    if pending.ticks_remaining > 0 {
        pending.ticks_remaining -= 1;
        return;
    }
    pop_floating(state);
}

fn pop_floating(state: &mut GameState) {
    let Some(pending) = state.pending_pop.take() else {
        return;
    };
    let removed = state.field.remove_all(&pending.ids);
    let points = state.score.award(removed.len(), state.tuning.points_per_bubble);
    log::debug!("Dropped {} floating bubbles (+{})", removed.len(), points);
    state.events.push(GameEvent::FloatingPopped {
        ids: removed.iter().map(|b| b.id).collect(),
        points,
    });

    if check_game_over(state) {
        return;
    }
    prepare_next_shot(state);
}

/// Pace difficulty, then load the next bubble
fn prepare_next_shot(state: &mut GameState) {
    if state.pacer.take_row_due(state.tuning.shots_before_new_row) {
        state.inject_row();
        state.events.push(GameEvent::RowInjected);
        if check_game_over(state) {
            return;
        }
    }
    state.shooter.loaded = state.shooter.next;
    state.shooter.next = state.random_field_color();
    state.phase = GamePhase::Aiming;
}

/// Enter [`GamePhase::Ended`] if the field crossed the game-over line
fn check_game_over(state: &mut GameState) -> bool {
    if !crosses_game_over_line(
        &state.field,
        state.tuning.bubble_radius,
        state.tuning.game_over_line_y,
    ) {
        return false;
    }
    state.phase = GamePhase::Ended;
    state.projectile = None;
    state.pending_pop = None;
    state.events.push(GameEvent::GameOver {
        score: state.score.score,
    });
    log::info!(
        "Game over: score {} after {} shots",
        state.score.score,
        state.shots_fired
    );
    true
}
