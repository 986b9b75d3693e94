//! Input sources polled by the frame driver
//!
//! The driver asks its input source for events once per frame, before the
//! frame is simulated. Hosts with a real keyboard push events straight into
//! the session instead; these sources cover headless play and tests.

use super::config::LaneConfig;
use super::input::InputEvent;
use super::snapshot::{ObstacleView, Snapshot};
use super::types::{GamePhase, Timestamp};

/// Produces input events for the upcoming frame
pub trait InputSource {
    fn poll(&mut self, snapshot: &Snapshot, timestamp: Timestamp) -> Vec<InputEvent>;
}

/// Never presses anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _snapshot: &Snapshot, _timestamp: Timestamp) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Replays events at fixed frame indices (0 = the first polled frame)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<(u64, InputEvent)>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` for frame `frame`
    pub fn at(mut self, frame: u64, event: InputEvent) -> Self {
        self.events.push((frame, event));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &Snapshot, _timestamp: Timestamp) -> Vec<InputEvent> {
        let frame = self.frame;
        self.frame += 1;
        self.events
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, event)| *event)
            .collect()
    }
}

/// Distance above the car at which obstacles start to matter
const LOOKAHEAD: i32 = 160;

/// Steers the car out of the way of approaching obstacles
#[derive(Debug, Clone)]
pub struct Autopilot {
    car_y: i32,
    car_width: i32,
    car_height: i32,
    obstacle_width: i32,
    obstacle_height: i32,
    max_x: i32,
}

impl Autopilot {
    pub fn new(config: &LaneConfig) -> Self {
        Self {
            car_y: config.car_y(),
            car_width: config.car_width,
            car_height: config.car_height,
            obstacle_width: config.obstacle_width(),
            obstacle_height: config.obstacle_height,
            max_x: config.max_x(),
        }
    }

    /// Whether `obstacle` shares the car's columns and hasn't passed it yet
    fn threatens(&self, car_x: i32, obstacle: &ObstacleView) -> bool {
        let horizontal =
            car_x < obstacle.x + self.obstacle_width && car_x + self.car_width > obstacle.x;
        let bottom = obstacle.y + self.obstacle_height;
        let approaching =
            bottom > self.car_y - LOOKAHEAD && obstacle.y < self.car_y + self.car_height;
        horizontal && approaching
    }

    /// The closest car position beside `obstacle` that stays on the lane
    fn escape_x(&self, car_x: i32, obstacle: &ObstacleView) -> Option<i32> {
        let left = obstacle.x - self.car_width;
        let right = obstacle.x + self.obstacle_width;
        let candidates = [left, right];
        candidates
            .into_iter()
            .filter(|x| (0..=self.max_x).contains(x))
            .min_by_key(|x| (x - car_x).abs())
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot, _timestamp: Timestamp) -> Vec<InputEvent> {
        match snapshot.phase {
            GamePhase::Idle | GamePhase::GameOver => return vec![InputEvent::StartOrRestart],
            GamePhase::Playing => {}
        }

        // The lowest threatening obstacle arrives first
        let Some(threat) = snapshot
            .obstacles
            .iter()
            .filter(|obstacle| self.threatens(snapshot.car_x, obstacle))
            .max_by_key(|obstacle| obstacle.y)
        else {
            return Vec::new();
        };

        match self.escape_x(snapshot.car_x, threat) {
            Some(target) if target < snapshot.car_x => vec![InputEvent::MoveLeft],
            Some(target) if target > snapshot.car_x => vec![InputEvent::MoveRight],
            _ => Vec::new(),
        }
    }
}
