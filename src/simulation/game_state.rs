//! Game state and the per-frame transitions that drive it
//!
//! `Engine` is a pure transition function over `GameState`: every operation
//! takes the current state by reference and returns the next one. The only
//! nondeterminism, obstacle placement, comes from the RNG handed to `tick`.

use rand::Rng;

use super::car::Car;
use super::collision::rects_intersect;
use super::config::LaneConfig;
use super::obstacle::Obstacle;
use super::spawner::Spawner;
use super::types::{Direction, GamePhase, ObstacleId, Timestamp};

/// Everything about a game that changes between frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: GamePhase,

    /// Ticks survived in the current game
    pub score: u64,

    /// Best score in this process; never decreases
    pub high_score: u64,

    pub car: Car,

    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,

    /// Stripe scroll position in `[0, stripe_period)`, purely cosmetic
    pub lane_scroll_offset: i32,

    pub last_spawn_timestamp: Timestamp,

    /// Next ID to assign
    pub next_obstacle_id: u64,
}

impl GameState {
    /// The state before any game has been started
    pub fn new(config: &LaneConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            car: Car::centered(config),
            obstacles: Vec::new(),
            lane_scroll_offset: 0,
            last_spawn_timestamp: 0,
            next_obstacle_id: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    fn allocate_obstacle_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_obstacle_id);
        self.next_obstacle_id += 1;
        id
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Phase: {} | Score: {} | High Score: {} | Car x: {} | Obstacles: {}",
            self.phase.as_str(),
            self.score,
            self.high_score,
            self.car.x,
            self.obstacles.len()
        )
    }
}

/// The simulation rules for one lane configuration
#[derive(Debug, Clone)]
pub struct Engine {
    config: LaneConfig,
    spawner: Spawner,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(LaneConfig::default())
    }
}

impl Engine {
    /// Build an engine for `config`, which is assumed valid.
    ///
    /// Use [`Engine::try_new`] for configuration that came from outside.
    pub fn new(config: LaneConfig) -> Self {
        let spawner = Spawner::new(&config);
        Self { config, spawner }
    }

    /// Validate `config` and build an engine for it
    pub fn try_new(config: LaneConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    /// The pre-first-game state for this engine's lane
    pub fn initial_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Start a new game, keeping the high score from `previous`
    pub fn reset(&self, previous: &GameState) -> GameState {
        GameState {
            phase: GamePhase::Playing,
            score: 0,
            high_score: previous.high_score,
            car: Car::centered(&self.config),
            obstacles: Vec::new(),
            lane_scroll_offset: previous.lane_scroll_offset,
            last_spawn_timestamp: 0,
            next_obstacle_id: 0,
        }
    }

    /// Move the car one step; ignored unless a game is in progress
    pub fn apply_move(&self, state: &GameState, direction: Direction) -> GameState {
        let mut next = state.clone();
        if next.is_playing() {
            next.car.steer(direction, &self.config);
        }
        next
    }

    /// Advance the game by one frame stamped `timestamp`
    pub fn tick<R: Rng>(&self, state: &GameState, timestamp: Timestamp, rng: &mut R) -> GameState {
        let mut next = state.clone();
        if !next.is_playing() {
            return next;
        }

        let speed = self.config.speed;
        // Reduce both terms first so large speeds cannot overflow
        let period = self.config.stripe_period;
        next.lane_scroll_offset =
            (next.lane_scroll_offset % period + speed % period).rem_euclid(period);

        // At most one spawn per tick, however late the frame is
        if self.spawner.is_due(next.last_spawn_timestamp, timestamp) {
            let id = next.allocate_obstacle_id();
            let obstacle = self.spawner.spawn(id, rng);
            log::debug!("Spawned obstacle {:?} at x={}", obstacle.id, obstacle.x);
            next.obstacles.push(obstacle);
            next.last_spawn_timestamp = timestamp;
        }

        for obstacle in &mut next.obstacles {
            obstacle.advance(speed);
        }
        let despawn_threshold = self.config.lane_height;
        next.obstacles.retain(|obstacle| !obstacle.is_past(despawn_threshold));

        let car_rect = next.car.rect();
        if next
            .obstacles
            .iter()
            .any(|obstacle| rects_intersect(&car_rect, &obstacle.rect()))
        {
            next.phase = GamePhase::GameOver;
            next.high_score = next.high_score.max(next.score);
            return next;
        }

        next.score = next.score.saturating_add(1);
        next
    }
}
