//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. Ball radius and
//! platform size are fixed at construction and only exposed through getters.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball is in play
    Playing,
    /// Ball fell through the floor; terminal
    GameOver,
}

/// The bouncing ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec3,
    /// Vertical velocity (units/s, +Y is up)
    pub vel_y: f32,
    radius: f32,
}

impl Ball {
    pub fn new(pos: Vec3, vel_y: f32, radius: f32) -> Self {
        Self { pos, vel_y, radius }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(BALL_START, BALL_START_VELOCITY, BALL_RADIUS)
    }
}

/// The box the ball bounces on
#[derive(Debug, Clone)]
pub struct Platform {
    /// Box center
    pub pos: Vec3,
    /// Full extents (width, height, depth)
    size: Vec3,
}

impl Platform {
    pub fn new(pos: Vec3, size: Vec3) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Height the ball is snapped to (minus its radius) when it bounces
    ///
    /// Measured a full box height below the center, not half, so the ball
    /// visibly sinks into the platform before bouncing.
    #[inline]
    pub fn contact_height(&self) -> f32 {
        self.pos.y - self.size.y
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(PLATFORM_START, PLATFORM_SIZE)
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    pub platform: Platform,
    /// Gravity applied to the ball (units/s², negative is down)
    pub gravity: f32,
    /// Points (one per relocation)
    pub score: u32,
    /// Bounces since the platform last moved
    pub bounce_count: u32,
    /// Scales relocation distance, grows every relocation
    pub difficulty: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulated frame counter
    pub time_ticks: u64,
    /// Relocation RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ball: Ball::default(),
            platform: Platform::default(),
            gravity: GRAVITY,
            score: 0,
            bounce_count: 0,
            difficulty: DIFFICULTY_START,
            phase: GamePhase::Playing,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
