//! A running game session
//!
//! This is the entry point for playing the lane game without any Bevy
//! dependencies: it owns the engine, the current state, buffered input and
//! the randomness source, and turns input events and frame timestamps into
//! state transitions.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::LaneConfig;
use super::game_state::{Engine, GameState};
use super::input::{InputBuffer, InputEvent};
use super::snapshot::Snapshot;
use super::types::{GamePhase, Timestamp};

/// What the driver should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The game is still running; schedule another frame
    Continue,
    /// The game is not running; stop scheduling frames
    Stop,
}

/// One player's session: a sequence of games sharing a high score
pub struct GameSession {
    engine: Engine,

    state: GameState,

    input: InputBuffer,

    /// Optional seeded RNG for reproducible games
    rng: Option<StdRng>,

    /// Games started in this session
    pub games_played: u32,

    /// Frames simulated across all games
    pub frames: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl GameSession {
    fn new_internal(engine: Engine, rng: Option<StdRng>) -> Self {
        let state = engine.initial_state();
        Self {
            engine,
            state,
            input: InputBuffer::new(),
            rng,
            games_played: 0,
            frames: 0,
        }
    }

    pub fn new(engine: Engine) -> Self {
        Self::new_internal(engine, None)
    }

    /// Create a session with a seeded RNG so obstacle placement replays exactly
    pub fn new_with_seed(engine: Engine, seed: u64) -> Self {
        Self::new_internal(engine, Some(StdRng::seed_from_u64(seed)))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &LaneConfig {
        self.engine.config()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Number of moves waiting for the next frame
    pub fn pending_moves(&self) -> usize {
        self.input.len()
    }

    /// Feed one input event into the session.
    ///
    /// Moves are buffered until the next frame and dropped when no game is
    /// running. Start/restart only applies before the first game or after a
    /// game over.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::StartOrRestart => match self.state.phase {
                GamePhase::Idle | GamePhase::GameOver => self.start_game(),
                GamePhase::Playing => debug!("Ignoring start request during a game"),
            },
            InputEvent::MoveLeft | InputEvent::MoveRight => {
                if !self.state.is_playing() {
                    return;
                }
                if let Some(direction) = event.direction() {
                    if !self.input.push(direction) {
                        debug!("Coalesced repeated {:?} move", direction);
                    }
                }
            }
        }
    }

    fn start_game(&mut self) {
        self.input.clear();
        self.state = self.engine.reset(&self.state);
        self.games_played += 1;
        info!(
            "Starting game {} (high score {})",
            self.games_played, self.state.high_score
        );
    }

    /// Run one frame: apply buffered moves, then tick the simulation
    pub fn frame(&mut self, timestamp: Timestamp) -> FrameOutcome {
        if !self.state.is_playing() {
            return FrameOutcome::Stop;
        }

        // Moves land before this frame's collision check
        for direction in self.input.drain() {
            self.state = self.engine.apply_move(&self.state, direction);
        }

        let next = match &mut self.rng {
            Some(rng) => self.engine.tick(&self.state, timestamp, rng),
            None => self.engine.tick(&self.state, timestamp, &mut rand::rng()),
        };
        self.state = next;
        self.frames += 1;

        if self.state.is_playing() {
            FrameOutcome::Continue
        } else {
            info!("=== GAME OVER ===");
            info!("Score: {}", self.state.score);
            info!("High score: {}", self.state.high_score);
            FrameOutcome::Stop
        }
    }

    /// Print a summary of the session state
    pub fn print_summary(&self) {
        println!("=== Lane Runner Summary ===");
        println!("Games played: {}", self.games_played);
        println!("Frames simulated: {}", self.frames);
        println!("{}", self.state.summary());

        if !self.state.obstacles.is_empty() {
            println!("--- Obstacles ---");
            for obstacle in &self.state.obstacles {
                println!(
                    "  Obstacle {:?}: position=({}, {})",
                    obstacle.id.0, obstacle.x, obstacle.y
                );
            }
        }
    }

    /// Render the lane as text, one character per `scale` lane pixels
    pub fn render_lane(&self, scale: i32) -> Vec<String> {
        let config = self.engine.config();
        let scale = scale.max(1);
        let width = (config.lane_width / scale).max(1) as usize;
        let height = (config.lane_height / scale).max(1) as usize;

        let mut grid = vec![vec![' '; width]; height];

        // Stripe down the middle, scrolling with the lane
        let stripe_col = width / 2;
        let period = config.stripe_period;
        for (row, line) in grid.iter_mut().enumerate() {
            let lane_y = row as i32 * scale - self.state.lane_scroll_offset;
            if lane_y.rem_euclid(period) < period / 2 {
                line[stripe_col] = ':';
            }
        }

        // Helper to fill a lane rectangle, clipped to the grid
        let mut fill = |x: i32, y: i32, w: i32, h: i32, glyph: char| {
            let first_row = (y.max(0) / scale) as usize;
            let last_row = ((y + h).min(config.lane_height) + scale - 1) / scale;
            let first_col = (x.max(0) / scale) as usize;
            let last_col = ((x + w).min(config.lane_width) + scale - 1) / scale;
            for row in first_row..(last_row.max(0) as usize).min(height) {
                for col in first_col..(last_col.max(0) as usize).min(width) {
                    grid[row][col] = glyph;
                }
            }
        };

        for obstacle in &self.state.obstacles {
            fill(obstacle.x, obstacle.y, obstacle.width, obstacle.height, '#');
        }
        let car = &self.state.car;
        fill(car.x, car.y, car.width, car.height, 'C');

        grid.into_iter()
            .map(|row| format!("|{}|", row.into_iter().collect::<String>()))
            .collect()
    }

    /// Draw a visual map of the lane in the terminal
    pub fn draw_lane(&self) {
        println!("\n=== Lane ===");
        println!("Legend: C=Car, #=Obstacle, :=Stripe");
        println!();
        for line in self.render_lane(10) {
            println!("{}", line);
        }
        println!();
    }
}
