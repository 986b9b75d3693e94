//! Session, driver and input source behaviour

use std::thread;
use std::time::Duration;

use lane_runner::simulation::{
    Autopilot, Direction, Engine, FixedRateClock, FrameClock, FrameDriver, FrameOutcome,
    GamePhase, GameSession, InputBuffer, InputEvent, InputSource, LaneConfig, NoInput,
    ObstacleId, ObstacleView, ScriptedInput, Snapshot, SteppedClock,
};

/// A lane exactly one car wide: every obstacle lands on the car, so a game
/// always ends on frame 101 with a score of 100.
fn doomed_engine() -> Engine {
    Engine::new(LaneConfig {
        lane_width: 50,
        spawn_interval_ms: 0,
        ..LaneConfig::default()
    })
}

fn stepped_driver() -> FrameDriver<SteppedClock> {
    FrameDriver::new(SteppedClock::new(0, 16))
}

#[test]
fn test_start_only_from_idle_or_game_over() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    assert_eq!(session.phase(), GamePhase::Idle);

    session.handle_event(InputEvent::StartOrRestart);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.games_played, 1);

    session.handle_event(InputEvent::StartOrRestart);
    assert_eq!(session.games_played, 1);
}

#[test]
fn test_moves_ignored_while_idle() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    session.handle_event(InputEvent::MoveLeft);
    assert_eq!(session.pending_moves(), 0);
    assert_eq!(session.frame(16), FrameOutcome::Stop);
    assert_eq!(session.frames, 0);
    assert_eq!(session.state().car.x, 125);
}

#[test]
fn test_repeated_moves_coalesce() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    session.handle_event(InputEvent::StartOrRestart);

    session.handle_event(InputEvent::MoveLeft);
    session.handle_event(InputEvent::MoveLeft);
    assert_eq!(session.pending_moves(), 1);

    assert_eq!(session.frame(16), FrameOutcome::Continue);
    assert_eq!(session.pending_moves(), 0);
    assert_eq!(session.state().car.x, 105);
    assert_eq!(session.state().score, 1);
}

#[test]
fn test_opposite_moves_both_apply() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    session.handle_event(InputEvent::StartOrRestart);

    session.handle_event(InputEvent::MoveRight);
    session.handle_event(InputEvent::MoveLeft);
    assert_eq!(session.pending_moves(), 2);

    session.frame(16);
    assert_eq!(session.state().car.x, 125);
}

#[test]
fn test_input_buffer_tracks_pending_moves() {
    let mut buffer = InputBuffer::new();
    assert!(buffer.is_empty());

    assert!(buffer.push(Direction::Left));
    assert!(!buffer.push(Direction::Left));
    assert!(buffer.push(Direction::Right));
    assert_eq!(buffer.len(), 2);
    assert!(!buffer.is_empty());

    assert_eq!(buffer.drain(), vec![Direction::Left, Direction::Right]);
    assert!(buffer.is_empty());

    buffer.push(Direction::Right);
    buffer.clear();
    assert_eq!(buffer.len(), 0);
}

#[test]
fn test_unknown_keys_ignored() {
    assert_eq!(InputEvent::from_key("ArrowLeft"), Some(InputEvent::MoveLeft));
    assert_eq!(InputEvent::from_key("ArrowRight"), Some(InputEvent::MoveRight));
    assert_eq!(InputEvent::from_key("Enter"), Some(InputEvent::StartOrRestart));
    assert_eq!(InputEvent::from_key("ArrowUp"), None);
    assert_eq!(InputEvent::from_key(""), None);
}

#[test]
fn test_game_over_and_restart_keep_high_score() {
    let mut session = GameSession::new_with_seed(doomed_engine(), 5);
    session.handle_event(InputEvent::StartOrRestart);

    let mut timestamp = 0;
    while session.phase() == GamePhase::Playing {
        timestamp += 16;
        session.frame(timestamp);
    }
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.frames, 101);
    assert_eq!(session.state().score, 100);
    assert_eq!(session.state().high_score, 100);

    // Moves after the game are dropped
    session.handle_event(InputEvent::MoveRight);
    assert_eq!(session.pending_moves(), 0);

    session.handle_event(InputEvent::StartOrRestart);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.games_played, 2);
    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().high_score, 100);
}

#[test]
fn test_driver_runs_until_game_over() {
    let mut session = GameSession::new_with_seed(doomed_engine(), 5);
    session.handle_event(InputEvent::StartOrRestart);
    let mut driver = stepped_driver();

    let report = driver.run(&mut session, &mut NoInput, 1000).unwrap();
    assert_eq!(report.frames, 101);
    assert_eq!(report.final_phase, GamePhase::GameOver);
    assert_eq!(report.score, 100);
    assert!(!report.hit_frame_limit);
    assert!(!driver.is_armed());
    assert_eq!(driver.clock().now(), 101 * 16);
}

#[test]
fn test_driver_respects_frame_limit() {
    let mut session = GameSession::new_with_seed(doomed_engine(), 5);
    session.handle_event(InputEvent::StartOrRestart);
    let mut driver = stepped_driver();

    let report = driver.run(&mut session, &mut NoInput, 50).unwrap();
    assert_eq!(report.frames, 50);
    assert_eq!(report.final_phase, GamePhase::Playing);
    assert_eq!(report.score, 50);
    assert!(report.hit_frame_limit);

    // Resuming picks up where the first run stopped
    let report = driver.run(&mut session, &mut NoInput, 1000).unwrap();
    assert_eq!(report.frames, 51);
    assert_eq!(report.final_phase, GamePhase::GameOver);
}

#[test]
fn test_driver_rejects_zero_frame_limit() {
    let mut session = GameSession::default();
    let mut driver = stepped_driver();
    assert!(driver.run(&mut session, &mut NoInput, 0).is_err());
}

#[test]
fn test_cancelled_request_never_fires() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    session.handle_event(InputEvent::StartOrRestart);
    let mut driver = stepped_driver();

    let request = driver.request_frame();
    assert_eq!(driver.request_frame(), request);
    driver.cancel();
    assert!(!driver.is_armed());

    assert_eq!(driver.fire(request, 16, &mut session), None);
    assert_eq!(session.frames, 0);

    // A fresh request fires once, then is spent
    let fresh = driver.request_frame();
    assert_ne!(fresh, request);
    assert_eq!(driver.fire(request, 16, &mut session), None);
    assert_eq!(driver.fire(fresh, 16, &mut session), Some(FrameOutcome::Continue));
    assert_eq!(driver.fire(fresh, 32, &mut session), None);
    assert_eq!(session.frames, 1);
}

#[test]
fn test_stop_handle_halts_driver() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    session.handle_event(InputEvent::StartOrRestart);
    let mut driver = stepped_driver();

    driver.stop_handle().stop();
    let report = driver.run(&mut session, &mut NoInput, 100).unwrap();
    assert_eq!(report.frames, 0);
    assert_eq!(session.frames, 0);
    assert!(!driver.is_armed());
}

#[test]
fn test_stop_during_clock_wait_skips_frame() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    let mut driver = FrameDriver::new(FixedRateClock::new(Duration::from_millis(300)));
    let handle = driver.stop_handle();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        handle.stop();
    });

    // The start would arrive on the first frame, which the stop must pre-empt
    let mut script = ScriptedInput::new().at(0, InputEvent::StartOrRestart);
    let report = driver.run(&mut session, &mut script, 10).unwrap();
    stopper.join().unwrap();

    assert_eq!(report.frames, 0);
    assert_eq!(report.final_phase, GamePhase::Idle);
    assert_eq!(session.games_played, 0);
    assert_eq!(session.frames, 0);
    assert!(!driver.is_armed());
}

#[test]
fn test_idle_session_runs_no_frames() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    let mut driver = stepped_driver();

    let report = driver.run(&mut session, &mut NoInput, 100).unwrap();
    assert_eq!(report.frames, 0);
    assert_eq!(report.final_phase, GamePhase::Idle);
    assert!(!report.hit_frame_limit);
    assert_eq!(session.frames, 0);
}

#[test]
fn test_fixed_rate_clock_paces_frames() {
    let mut clock = FixedRateClock::new(Duration::from_millis(5));
    let stamps: Vec<u64> = (0..4).map(|_| clock.next_frame()).collect();

    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]), "stamps: {:?}", stamps);
    assert!(stamps[3] >= 20, "stamps: {:?}", stamps);
}

#[test]
fn test_scripted_input_starts_and_steers() {
    let mut session = GameSession::new_with_seed(Engine::default(), 1);
    let mut driver = stepped_driver();
    let mut script = ScriptedInput::new()
        .at(0, InputEvent::StartOrRestart)
        .at(1, InputEvent::MoveRight);

    let report = driver.run(&mut session, &mut script, 2).unwrap();
    assert_eq!(report.final_phase, GamePhase::Playing);
    assert_eq!(report.score, 2);
    assert_eq!(session.state().car.x, 145);
}

#[test]
fn test_snapshot_mirrors_state() {
    let mut session = GameSession::new_with_seed(doomed_engine(), 5);
    session.handle_event(InputEvent::StartOrRestart);
    session.frame(16);

    let snapshot = session.snapshot();
    let state = session.state();
    assert_eq!(snapshot.phase, state.phase);
    assert_eq!(snapshot.score, state.score);
    assert_eq!(snapshot.car_x, state.car.x);
    assert_eq!(snapshot.lane_scroll_offset, state.lane_scroll_offset);
    assert_eq!(
        snapshot.obstacles,
        vec![ObstacleView {
            id: ObstacleId(0),
            x: 0,
            y: -55
        }]
    );
}

#[test]
fn test_render_lane_shows_car_and_obstacles() {
    let mut session = GameSession::new_with_seed(doomed_engine(), 5);
    session.handle_event(InputEvent::StartOrRestart);
    for frame in 1..=60u64 {
        session.frame(frame * 16);
    }

    let lines = session.render_lane(10);
    assert_eq!(lines.len(), 60);
    assert!(lines.iter().all(|line| line.starts_with('|') && line.ends_with('|')));
    assert!(lines.iter().any(|line| line.contains('C')));
    assert!(lines.iter().any(|line| line.contains('#')));
}

fn playing_snapshot(car_x: i32, obstacles: Vec<ObstacleView>) -> Snapshot {
    Snapshot {
        phase: GamePhase::Playing,
        score: 0,
        high_score: 0,
        car_x,
        obstacles,
        lane_scroll_offset: 0,
    }
}

#[test]
fn test_autopilot_dodges_to_nearest_side() {
    let config = LaneConfig::default();
    let mut autopilot = Autopilot::new(&config);

    let threat_right_of_center = playing_snapshot(
        125,
        vec![ObstacleView {
            id: ObstacleId(0),
            x: 130,
            y: 400,
        }],
    );
    assert_eq!(
        autopilot.poll(&threat_right_of_center, 0),
        vec![InputEvent::MoveLeft]
    );

    let threat_left_of_center = playing_snapshot(
        125,
        vec![ObstacleView {
            id: ObstacleId(0),
            x: 100,
            y: 400,
        }],
    );
    assert_eq!(
        autopilot.poll(&threat_left_of_center, 0),
        vec![InputEvent::MoveRight]
    );
}

#[test]
fn test_autopilot_ignores_clear_lane() {
    let config = LaneConfig::default();
    let mut autopilot = Autopilot::new(&config);

    let clear = playing_snapshot(
        125,
        vec![
            ObstacleView {
                id: ObstacleId(0),
                x: 0,
                y: 400,
            },
            ObstacleView {
                id: ObstacleId(1),
                x: 125,
                y: 0,
            },
        ],
    );
    assert!(autopilot.poll(&clear, 0).is_empty());

    let mut over = clear.clone();
    over.phase = GamePhase::GameOver;
    assert_eq!(autopilot.poll(&over, 0), vec![InputEvent::StartOrRestart]);
}

#[test]
fn test_autopilot_starts_and_restarts_games() {
    let engine = doomed_engine();
    let mut autopilot = Autopilot::new(engine.config());
    let mut session = GameSession::new_with_seed(engine, 9);
    let mut driver = stepped_driver();

    let report = driver.run(&mut session, &mut autopilot, 1000).unwrap();
    assert_eq!(report.final_phase, GamePhase::GameOver);
    assert_eq!(report.frames, 101);
    assert_eq!(session.games_played, 1);

    // The next run begins by restarting the finished game
    let report = driver.run(&mut session, &mut autopilot, 10).unwrap();
    assert_eq!(report.final_phase, GamePhase::Playing);
    assert_eq!(report.frames, 10);
    assert_eq!(session.games_played, 2);
}

#[test]
fn test_autopilot_survives_seeded_game() {
    let engine = Engine::default();
    let mut autopilot = Autopilot::new(engine.config());
    let mut session = GameSession::new_with_seed(engine, 2024);
    session.handle_event(InputEvent::StartOrRestart);
    let mut driver = stepped_driver();

    let report = driver.run(&mut session, &mut autopilot, 3000).unwrap();
    assert_eq!(report.final_phase, GamePhase::Playing);
    assert_eq!(report.score, 3000);
    assert!(report.hit_frame_limit);
}
