//! Shared combat state: hitboxes, health, and the damage gate
//!
//! Every combatant (player and hostiles) carries a [`Vitals`] and exposes
//! axis-aligned [`Hitbox`]es. Damage flows through one cooldown-gated
//! operation so the i-frame rules are identical everywhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned hitbox in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box for a sprite anchored bottom-center at `anchor`
    pub fn anchored(anchor: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: anchor.x - w / 2.0,
            y: anchor.y - h,
            w,
            h,
        }
    }

    /// Standard AABB overlap test. Symmetric in its arguments.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x + self.w > other.x
            && self.x < other.x + other.w
            && self.y + self.h > other.y
            && self.y < other.y + other.h
    }

    /// Same box shrunk by `margin` on the left and top sides only.
    ///
    /// Used for the Bellhead hurtbox: the weak point sits away from the
    /// approach side, so landing a sword hit takes more commitment. A
    /// balance asymmetry, not a bug.
    pub fn shrunk_two_sides(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: (self.w - margin).max(0.0),
            h: (self.h - margin).max(0.0),
        }
    }
}

/// Health, i-frames, and the alive flag shared by all combatants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    /// Reserved stat: stored and reported, never subtracted from damage
    pub shield: i32,
    pub alive: bool,
    /// While > 0, further damage is rejected; decrements once per tick
    pub damage_cooldown: u32,
    /// Transient hit tint for the presentation layer
    pub hit_flash: bool,
}

impl Vitals {
    pub fn new(max_health: i32, shield: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            shield,
            alive: true,
            damage_cooldown: 0,
            hit_flash: false,
        }
    }

    /// Apply damage through the i-frame gate.
    ///
    /// Rejected (returns `false`, cooldown untouched) if the entity is
    /// dead or still inside a previous cooldown window. On acceptance the
    /// health drops by exactly `amount` and the window restarts at
    /// `cooldown_ticks`.
    pub fn take_damage(&mut self, amount: i32, cooldown_ticks: u32) -> bool {
        if !self.alive || self.damage_cooldown > 0 {
            return false;
        }
        self.health -= amount;
        self.damage_cooldown = cooldown_ticks;
        self.hit_flash = true;
        true
    }

    /// Fire the death transition exactly once.
    ///
    /// Returns `true` only on the tick health first reaches zero while
    /// still alive; every later call is a no-op.
    pub fn check_death(&mut self) -> bool {
        if self.alive && self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Per-tick cooldown upkeep: decrement if active, else clear the flash
    pub fn tick_cooldown(&mut self) {
        if self.damage_cooldown > 0 {
            self.damage_cooldown -= 1;
        } else {
            self.hit_flash = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(5.0, 5.0, 10.0, 10.0);
        let c = Hitbox::new(20.0, 20.0, 4.0, 4.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps(&b));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn anchored_box_sits_above_anchor() {
        let hb = Hitbox::anchored(Vec2::new(100.0, 50.0), 32.0, 47.0);
        assert_eq!(hb.x, 84.0);
        assert_eq!(hb.y, 3.0);
        assert_eq!(hb.w, 32.0);
        assert_eq!(hb.h, 47.0);
    }

    #[test]
    fn shrunk_box_loses_left_and_top() {
        let hb = Hitbox::new(0.0, 0.0, 100.0, 100.0).shrunk_two_sides(20.0);
        assert_eq!(hb.x, 20.0);
        assert_eq!(hb.y, 20.0);
        assert_eq!(hb.w, 80.0);
        assert_eq!(hb.h, 80.0);
        // Right and bottom edges unchanged
        assert_eq!(hb.x + hb.w, 100.0);
        assert_eq!(hb.y + hb.h, 100.0);
    }

    #[test]
    fn damage_gated_by_cooldown() {
        let mut v = Vitals::new(100, 0);
        assert!(v.take_damage(10, 20));
        assert_eq!(v.health, 90);
        assert_eq!(v.damage_cooldown, 20);

        // Second hit in the window: rejected, cooldown NOT reset
        assert!(!v.take_damage(10, 20));
        assert_eq!(v.health, 90);
        assert_eq!(v.damage_cooldown, 20);
    }

    #[test]
    fn invulnerability_window_scenario() {
        // Two hits of 5 in the same tick with a 20-tick window: only one lands
        let mut v = Vitals::new(10, 0);
        v.take_damage(5, 20);
        v.take_damage(5, 20);
        assert_eq!(v.health, 5);
    }

    #[test]
    fn cooldown_decrements_then_clears_flash() {
        let mut v = Vitals::new(100, 0);
        v.take_damage(10, 2);
        assert!(v.hit_flash);
        v.tick_cooldown();
        assert_eq!(v.damage_cooldown, 1);
        assert!(v.hit_flash);
        v.tick_cooldown();
        assert_eq!(v.damage_cooldown, 0);
        assert!(v.hit_flash); // cleared on the first zero-cooldown tick
        v.tick_cooldown();
        assert!(!v.hit_flash);
    }

    #[test]
    fn death_transition_fires_exactly_once() {
        let mut v = Vitals::new(10, 0);
        v.take_damage(10, 0);
        assert!(v.check_death());
        assert!(!v.alive);
        assert!(!v.check_death());
        assert!(!v.check_death());
    }

    #[test]
    fn dead_entities_reject_damage() {
        let mut v = Vitals::new(10, 0);
        v.take_damage(10, 0);
        v.check_death();
        assert!(!v.take_damage(5, 0));
        assert_eq!(v.health, 0);
    }

    #[test]
    fn shield_is_not_subtracted_from_damage() {
        let mut v = Vitals::new(100, 50);
        v.take_damage(30, 0);
        assert_eq!(v.health, 70);
        assert_eq!(v.shield, 50);
    }
}
