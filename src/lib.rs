//! Arena Brawl - circular arena combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic combat simulation (entities, AI, collisions)
//! - `tuning`: Data-driven game balance
//!
//! The crate is presentation-free: rendering, audio playback, and input
//! delivery are collaborator concerns. The sim consumes an input snapshot
//! each tick and emits [`sim::GameEvent`]s for a frontend to act on.

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, SoundCue, TickInput, World, tick};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena radius (world units, arena centered at origin)
    pub const ARENA_RADIUS: f32 = 400.0;
    /// Entities are held this far inside the arena radius
    pub const BOUNDARY_MARGIN: f32 = 15.0;
    /// Corrective step size of the boundary confinement walk (per axis)
    pub const CONFINE_STEP: f32 = 1.0;

    /// Player body bounds (sprites are anchored bottom-center)
    pub const PLAYER_BODY_WIDTH: f32 = 32.0;
    pub const PLAYER_BODY_HEIGHT: f32 = 47.0;
    /// Sword hitbox, extended horizontally from the body on the facing side
    pub const SWORD_REACH: f32 = 36.0;
    pub const SWORD_HEIGHT: f32 = 14.0;
    /// Vertical offset of the sword box above the player's feet
    pub const SWORD_RAISE: f32 = 30.0;

    /// Ghoul body bounds (shares the gladiator sheet dimensions)
    pub const GHOUL_BODY_WIDTH: f32 = 32.0;
    pub const GHOUL_BODY_HEIGHT: f32 = 47.0;

    /// Bellhead body bounds
    pub const BELLHEAD_BODY_WIDTH: f32 = 128.0;
    pub const BELLHEAD_BODY_HEIGHT: f32 = 112.0;
    /// Shrink applied to two sides of the Bellhead hurtbox (weak point)
    pub const BELLHEAD_WEAKPOINT_MARGIN: f32 = 20.0;
    /// Recoil distance when the Bellhead takes a hit
    pub const BELLHEAD_KNOCKBACK: f32 = 25.0;
    /// Bellhead flips its facing only past this horizontal delta
    pub const BELLHEAD_FLIP_DEADZONE: f32 = 0.5;

    /// Shockwave hazard bounds (spawned at the Bellhead's slam frame)
    pub const SHOCKWAVE_WIDTH: f32 = 180.0;
    pub const SHOCKWAVE_HEIGHT: f32 = 40.0;

    /// Render depth assigned to dead entities (beneath everything live)
    pub const DEATH_DEPTH: f32 = -10_000.0;

    /// Ghouls spawn this far outside the arena radius and walk in
    pub const SPAWN_RIM_OFFSET: f32 = 40.0;
}

/// Angle from `from` toward `to`, in radians (atan2 convention)
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
