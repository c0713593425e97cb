//! Frame simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - Variable frame delta, clamped inside `tick`
//! - Seeded RNG only (platform relocation)
//! - Sound goes out through an injected `AudioSink`

pub mod collision;
pub mod relocation;
pub mod state;
pub mod tick;

pub use collision::{ball_platform_contact, horizontal_overlap, reached_contact_height};
pub use relocation::relocation_offset;
pub use state::{Ball, GamePhase, GameState, Platform};
pub use tick::{TickInput, TickOutcome, final_score_message, integrate, tick};
