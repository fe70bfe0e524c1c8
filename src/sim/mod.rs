//! Deterministic combat simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One synchronous update per rendered frame, scaled by delta time
//! - Seeded RNG only
//! - Fixed call order: player updates before the entity manager, so every
//!   hostile reads the view published earlier in the same tick
//! - No rendering, audio, or platform dependencies

pub mod arena;
pub mod combat;
pub mod events;
pub mod hostile;
pub mod manager;
pub mod player;
pub mod tick;

pub use arena::Arena;
pub use combat::{Hitbox, Vitals};
pub use events::{GameEvent, SoundCue};
pub use hostile::{AttackPhase, Hostile, HostileKind, Shockwave};
pub use manager::EntityManager;
pub use player::{Player, PlayerView};
pub use tick::{TickInput, World, tick};
