//! The circular arena and its boundary confinement
//!
//! The arena contributes a single scalar to the simulation: the legal
//! radius. Everything else here is the corrective walk that keeps
//! combatants inside it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_RADIUS, BOUNDARY_MARGIN, CONFINE_STEP};

/// The circular arena, centered at the origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arena {
    /// Legal radius; the walkable band ends `BOUNDARY_MARGIN` inside it
    pub radius: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_RADIUS)
    }
}

impl Arena {
    /// Build an arena, sanitizing the collaborator-supplied radius: a
    /// non-finite radius falls back to the default, and anything smaller
    /// than the boundary margin is floored so the walkable band still
    /// contains the center.
    pub fn new(radius: f32) -> Self {
        if !radius.is_finite() {
            log::warn!("arena: replacing non-finite radius {radius} with {ARENA_RADIUS}");
            return Self { radius: ARENA_RADIUS };
        }
        if radius < BOUNDARY_MARGIN {
            log::warn!("arena: radius {radius} leaves no walkable band, flooring at {BOUNDARY_MARGIN}");
            return Self { radius: BOUNDARY_MARGIN };
        }
        Self { radius }
    }

    /// Radius entities are actually allowed to stand at
    pub fn walkable_radius(&self) -> f32 {
        self.radius - BOUNDARY_MARGIN
    }

    /// Whether a position is inside the legal arena radius.
    ///
    /// Passing this test for the first time is what latches an entity's
    /// `entered_arena` flag; confinement never runs before that.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.length() <= self.radius
    }

    /// Whether a position is inside the walkable band
    pub fn contains_walkable(&self, pos: Vec2) -> bool {
        pos.length() <= self.walkable_radius()
    }

    /// Walk a position back inside the walkable band.
    ///
    /// Discrete corrective nudge, not a vector projection: each iteration
    /// moves the position toward the center by up to one unit on each axis
    /// independently, until the distance test passes. Each step strictly
    /// reduces the offending axis magnitude, so the walk terminates in at
    /// most O(distance) iterations. Violations in practice are a few units
    /// deep, so the cost per violating tick is negligible.
    ///
    /// Non-finite positions are rejected untouched; the caller keeps its
    /// last-known-good position instead.
    pub fn confine(&self, pos: &mut Vec2) {
        if !pos.is_finite() {
            log::warn!("confine: rejecting non-finite position {pos:?}");
            return;
        }

        while !self.contains_walkable(*pos) {
            // The center is the walk's fixpoint. Reaching it without
            // passing the test means the walkable band is empty (the
            // radius field was poked past the constructor's clamp);
            // bail instead of spinning.
            if *pos == Vec2::ZERO {
                log::warn!("confine: no walkable band at radius {}, stopping at center", self.radius);
                break;
            }
            if pos.x != 0.0 {
                pos.x -= pos.x.signum() * pos.x.abs().min(CONFINE_STEP);
            }
            if pos.y != 0.0 {
                pos.y -= pos.y.signum() * pos.y.abs().min(CONFINE_STEP);
            }
        }
    }
}
