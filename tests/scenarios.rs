//! End-to-end scenarios driven through the engine facade

use bubble_burst::sim::{Bubble, BubbleColor, GameEvent, GamePhase, GameState, GridCell};
use bubble_burst::{Engine, Tuning};

fn empty_engine(seed: u64) -> Engine {
    let mut state = GameState::new(seed, Tuning::default()).unwrap();
    state.field.clear();
    Engine::from_state(state)
}

fn place(engine: &mut Engine, row: u32, col: u32, color: BubbleColor) {
    let state = engine.state_mut();
    let pos = state.cell_center(GridCell::new(row, col));
    let id = state.next_bubble_id();
    state.field.insert(Bubble::settled(id, pos, color));
}

/// Fire `color` straight up and tick until the shot is fully resolved
fn fire(engine: &mut Engine, color: BubbleColor) -> Vec<GameEvent> {
    engine.state_mut().shooter.loaded = color;
    engine.state_mut().shooter.aim_angle = -std::f32::consts::FRAC_PI_2;
    engine.launch();
    let mut events = Vec::new();
    for _ in 0..1000 {
        let snap = engine.tick().expect("tick");
        events.extend(snap.events);
        if matches!(snap.phase, GamePhase::Aiming | GamePhase::Ended) {
            return events;
        }
    }
    panic!("shot never resolved");
}

#[test]
fn test_same_color_shot_completes_group_of_four() {
    let mut engine = empty_engine(1);
    place(&mut engine, 0, 6, BubbleColor::Red);
    place(&mut engine, 1, 6, BubbleColor::Red);
    place(&mut engine, 1, 7, BubbleColor::Red);

    let events = fire(&mut engine, BubbleColor::Red);

    let snapped = events.iter().find_map(|e| match e {
        GameEvent::Snapped { cell, .. } => Some(*cell),
        _ => None,
    });
    assert_eq!(snapped, Some(GridCell::new(2, 7)));

    let matched = events.iter().find_map(|e| match e {
        GameEvent::Matched { ids, points, .. } => Some((ids.len(), *points)),
        _ => None,
    });
    assert_eq!(matched, Some((4, 40)));
    assert_eq!(engine.score(), 40);
    assert_eq!(engine.bubbles().count(), 0);
    assert_eq!(engine.state().pacer.shots_since_match, 0);
}

#[test]
fn test_two_bubble_group_is_left_alone() {
    let mut engine = empty_engine(2);
    place(&mut engine, 0, 6, BubbleColor::Green);

    let events = fire(&mut engine, BubbleColor::Green);

    assert!(events.iter().any(|e| matches!(e, GameEvent::NoMatch { group_size: 2 })));
    assert_eq!(engine.bubbles().count(), 2);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.state().pacer.shots_since_match, 1);
}

#[test]
fn test_threshold_misses_inject_exactly_one_row() {
    let mut engine = empty_engine(3);
    let colors = [
        BubbleColor::Red,
        BubbleColor::Blue,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
    ];

    for (i, color) in colors.iter().enumerate() {
        let events = fire(&mut engine, *color);
        let injected = events.iter().filter(|e| **e == GameEvent::RowInjected).count();
        if i + 1 < colors.len() {
            assert_eq!(injected, 0, "no row before the threshold (shot {})", i + 1);
            assert_eq!(engine.state().pacer.shots_since_match, i as u32 + 1);
        } else {
            assert_eq!(injected, 1);
            assert_eq!(engine.state().pacer.shots_since_match, 0);
        }
    }
    // Five settled shots plus one row
    assert_eq!(engine.bubbles().count(), 5 + 15);
    assert_eq!(engine.phase(), GamePhase::Aiming);
}

#[test]
fn test_row_injection_past_line_ends_game() {
    let mut engine = empty_engine(4);
    // Lower edge at 460: safe until the next row shift pushes it to 495
    place(&mut engine, 12, 0, BubbleColor::Green);
    engine.state_mut().pacer.shots_since_match = 4;

    let events = fire(&mut engine, BubbleColor::Blue);

    assert!(events.contains(&GameEvent::RowInjected));
    assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(engine.is_game_over());

    engine.launch();
    let snap = engine.tick().unwrap();
    assert!(snap.game_over);
    assert!(snap.in_flight.is_none());
    assert!(snap.events.is_empty());
    assert_eq!(engine.state().shots_fired, 1);
}

#[test]
fn test_restart_after_game_over_restores_initial_board() {
    let mut engine = Engine::new(2024, Tuning::default()).unwrap();
    let initial: Vec<_> = engine.bubbles().map(|b| (b.pos, b.color)).collect();
    let initial_next = engine.next_color();

    {
        let state = engine.state_mut();
        state.score.score = 370;
        state.pacer.shots_since_match = 3;
        state.phase = GamePhase::Ended;
    }
    engine.launch();
    assert!(engine.state().projectile.is_none());

    let snap = engine.restart();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.shots_since_match, 0);
    assert!(!snap.game_over);
    assert_eq!(snap.phase, GamePhase::Aiming);
    assert_eq!(snap.events, vec![GameEvent::Restarted]);
    let restored: Vec<_> = snap.field.iter().map(|b| (b.pos, b.color)).collect();
    assert_eq!(restored, initial);
    assert_eq!(engine.next_color(), initial_next);
}

#[test]
fn test_floating_cluster_drops_after_delay() {
    let mut engine = empty_engine(5);
    // Red pair on the ceiling with a yellow pair hanging off the right one
    place(&mut engine, 0, 6, BubbleColor::Red);
    place(&mut engine, 0, 8, BubbleColor::Red);
    place(&mut engine, 1, 8, BubbleColor::Yellow);
    place(&mut engine, 2, 9, BubbleColor::Yellow);

    engine.state_mut().shooter.loaded = BubbleColor::Red;
    engine.launch();

    let mut resolving_ticks = 0;
    let mut events = Vec::new();
    for _ in 0..1000 {
        let snap = engine.tick().unwrap();
        events.extend(snap.events);
        match snap.phase {
            GamePhase::Resolving => {
                resolving_ticks += 1;
                // Nothing can be launched while the drop is pending
                engine.launch();
                assert!(engine.state().projectile.is_none());
            }
            GamePhase::Aiming => break,
            phase => assert_eq!(phase, GamePhase::InFlight),
        }
    }

    let delay = engine.state().tuning.floating_pop_delay_ticks;
    assert_eq!(resolving_ticks, delay);
    let popped: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::FloatingPopped { ids, points } => Some((ids.len(), *points)),
            _ => None,
        })
        .collect();
    assert_eq!(popped, vec![(2, 20)]);
    assert_eq!(engine.score(), 30 + 20);
    assert_eq!(engine.bubbles().count(), 0);
}
