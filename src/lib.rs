//! BounceBlitz - a ball bouncing on a platform that keeps running away
//!
//! Core modules:
//! - `sim`: Frame simulation (gravity, collision, platform relocation, scoring)
//! - `camera`: Mouse-driven orbit camera that trails the ball
//! - `renderer`: WebGPU meshes, scene assembly and render pipeline
//! - `audio`: Sound cue sink abstraction and implementations
//! - `settings`: User preferences

pub mod audio;
pub mod camera;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, SoundEffect};
pub use camera::OrbitCamera;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Largest frame delta the loop will simulate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default window size
    pub const SCREEN_WIDTH: u32 = 1200;
    pub const SCREEN_HEIGHT: u32 = 800;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -12.8;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.5;
    pub const BALL_START: Vec3 = Vec3::new(0.0, 0.5, 0.0);
    /// Initial vertical velocity, the game starts mid-bounce
    pub const BALL_START_VELOCITY: f32 = 5.0;
    /// Horizontal speed from WASD (units/s)
    pub const BALL_MOVE_SPEED: f32 = 2.5;
    /// Steering only works while the ball is at or above this height
    pub const MOVE_GATE_Y: f32 = -1.0;

    /// Platform defaults (width, height, depth)
    pub const PLATFORM_START: Vec3 = Vec3::new(0.0, -1.0, 0.0);
    pub const PLATFORM_SIZE: Vec3 = Vec3::new(4.0, 0.2, 4.0);

    /// Fraction of speed kept after a bounce
    pub const BOUNCE_RESTITUTION: f32 = 0.95;
    /// Bounces on one spot before the platform moves
    pub const BOUNCES_PER_RELOCATION: u32 = 2;
    /// Difficulty factor at game start
    pub const DIFFICULTY_START: f32 = 1.0;
    /// Difficulty added per relocation
    pub const DIFFICULTY_STEP: f32 = 0.1;
    /// Per-axis relocation distance at difficulty 1.0
    pub const RELOCATION_STEP: f32 = -5.0;

    /// Falling below this height ends the run
    pub const LOSS_FLOOR_Y: f32 = -30.0;

    /// Camera defaults
    pub const CAMERA_DISTANCE: f32 = 5.0;
    pub const CAMERA_HEIGHT: f32 = 4.0;
    pub const MOUSE_SENSITIVITY: f32 = 0.1;
    pub const FOV_DEGREES: f32 = 45.0;
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 100.0;
}

/// Clamp a measured frame delta into `[0, MAX_FRAME_DT]` (NaN becomes 0)
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}
