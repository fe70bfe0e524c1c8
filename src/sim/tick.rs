//! World state and the per-tick orchestrator
//!
//! One [`tick`] call advances the whole simulation: the player first,
//! then the entity manager against the player's freshly published view,
//! then any damage the pass produced back through the player's i-frame
//! gate. Keeping the order fixed here is what makes the view snapshot
//! safe to hand out immutably.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::events::GameEvent;
use super::manager::EntityManager;
use super::player::Player;
use crate::tuning::Tuning;

/// One tick's worth of player input, sampled by the frontend
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in world coordinates; drives sword aim and facing
    pub pointer: Vec2,
}

/// The complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Arena,
    pub player: Player,
    pub manager: EntityManager,
    pub tuning: Tuning,
    /// Seed the world was created with, kept for replay
    pub seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl World {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let arena = Arena::default();
        let player = Player::new(&tuning.player, Vec2::ZERO);
        Self {
            arena,
            player,
            manager: EntityManager::new(),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Clear the arena and respawn the player (retry after death)
    pub fn reset(&mut self) {
        self.manager.reset();
        self.player = Player::new(&self.tuning.player, Vec2::ZERO);
        self.events.clear();
        log::info!("world reset");
    }

    /// Hand this tick's events to the presentation layer
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

/// Advance the world by one tick of `dt` seconds.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);

    world.player.update(input, &world.arena, dt, &mut world.events);
    let view = world.player.view();

    let incoming = world.manager.update(
        dt,
        &world.arena,
        Some(&view),
        &world.tuning,
        &mut world.rng,
        &mut world.events,
    );
    for amount in incoming {
        world.player.apply_damage(amount, &mut world.rng, &mut world.events);
    }
}

/// A hostile delta-time (negative, NaN, infinite) becomes a zero-length
/// tick rather than poisoning every position downstream.
fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("tick: clamping bad dt {dt} to 0");
        0.0
    } else {
        dt
    }
}
