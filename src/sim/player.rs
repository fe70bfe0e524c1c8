//! The player character
//!
//! Reads the directional input snapshot, moves inside the arena's walkable
//! band, aims the held sword from the pointer position, and publishes a
//! read-only [`PlayerView`] once per tick. The view is the only channel
//! through which hostiles and the manager observe the player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::combat::{Hitbox, Vitals};
use super::events::{GameEvent, SoundCue, pick_cue};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::PlayerTuning;

/// Hurt grunts, one picked at random per accepted hit
const HURT_CUES: &[SoundCue] = &[SoundCue::PlayerHurtA, SoundCue::PlayerHurtB];

/// Two-state animation selector; switched only when it actually changes
/// so the presentation layer never restarts a looping animation mid-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Idling,
    Walking,
}

/// Read-only projection of the player, refreshed once per tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub alive: bool,
    /// Current sword hitbox (attacker-vs-hostile collision channel)
    pub sword: Hitbox,
    /// Current body hitbox (hostile-vs-player collision channel)
    pub body: Hitbox,
}

/// The one player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub vitals: Vitals,
    pub pos: Vec2,
    /// Latched once the player has been observed inside the arena
    pub entered_arena: bool,
    /// Render layering key, refreshed from y while alive
    pub depth: f32,
    /// Mirrored when the pointer is left of the player
    pub facing_left: bool,
    /// Sword orientation angle, radians
    pub aim_angle: f32,
    pub motion: MotionState,
    movement_speed: f32,
    iframe_ticks: u32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, spawn: Vec2) -> Self {
        Self {
            vitals: Vitals::new(tuning.max_health, tuning.shield),
            pos: spawn,
            entered_arena: false,
            depth: spawn.y,
            facing_left: false,
            aim_angle: 0.0,
            motion: MotionState::Idling,
            movement_speed: tuning.movement_speed,
            iframe_ticks: tuning.iframe_ticks,
        }
    }

    /// Advance the player one tick. Must run before the entity manager.
    pub fn update(&mut self, input: &TickInput, arena: &Arena, dt: f32, events: &mut Vec<GameEvent>) {
        // Base entity upkeep, in the fixed order: boundary, layering,
        // death transition, cooldown.
        if !self.entered_arena && arena.contains(self.pos) {
            self.entered_arena = true;
        }
        if self.entered_arena {
            arena.confine(&mut self.pos);
        }
        if self.vitals.alive {
            self.depth = self.pos.y;
        }
        if self.vitals.check_death() {
            self.depth = DEATH_DEPTH;
            events.push(GameEvent::PlayerDied);
            events.push(GameEvent::Sound(SoundCue::PlayerDeath));
        }
        self.vitals.tick_cooldown();

        if !self.vitals.alive {
            return;
        }

        // Directional movement. Within an axis the first-checked key wins
        // when both are held: up beats down, left beats right.
        let step = self.movement_speed * dt;
        let mut moved = false;
        if input.up {
            moved |= self.try_move(Vec2::new(0.0, -step), arena);
        } else if input.down {
            moved |= self.try_move(Vec2::new(0.0, step), arena);
        }
        if input.left {
            moved |= self.try_move(Vec2::new(-step, 0.0), arena);
        } else if input.right {
            moved |= self.try_move(Vec2::new(step, 0.0), arena);
        }

        let motion = if moved {
            MotionState::Walking
        } else {
            MotionState::Idling
        };
        if motion != self.motion {
            self.motion = motion;
        }

        // Sword orientation follows the pointer
        if input.pointer.is_finite() {
            self.aim_angle = crate::aim_angle(self.pos, input.pointer);
            self.facing_left = input.pointer.x < self.pos.x;
        } else {
            log::warn!("player: ignoring non-finite pointer {:?}", input.pointer);
        }
    }

    /// Commit a single-axis move if the destination stays inside the
    /// walkable band; otherwise reject it and run the corrector.
    fn try_move(&mut self, delta: Vec2, arena: &Arena) -> bool {
        let candidate = self.pos + delta;
        if !candidate.is_finite() {
            log::warn!("player: rejecting non-finite move to {candidate:?}");
            return false;
        }
        if !self.entered_arena || arena.contains_walkable(candidate) {
            self.pos = candidate;
            true
        } else {
            arena.confine(&mut self.pos);
            false
        }
    }

    /// Apply incoming damage through the i-frame gate; hurt cue on accept
    pub fn apply_damage<R: Rng>(
        &mut self,
        amount: i32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.vitals.take_damage(amount, self.iframe_ticks) {
            if self.vitals.health > 0
                && let Some(cue) = pick_cue(rng, HURT_CUES)
            {
                events.push(GameEvent::Sound(cue));
            }
            true
        } else {
            false
        }
    }

    pub fn body_hitbox(&self) -> Hitbox {
        Hitbox::anchored(self.pos, PLAYER_BODY_WIDTH, PLAYER_BODY_HEIGHT)
    }

    /// Sword box, extended from the body on the facing side
    pub fn sword_hitbox(&self) -> Hitbox {
        let x = if self.facing_left {
            self.pos.x - PLAYER_BODY_WIDTH / 2.0 - SWORD_REACH
        } else {
            self.pos.x + PLAYER_BODY_WIDTH / 2.0
        };
        Hitbox::new(
            x,
            self.pos.y - SWORD_RAISE - SWORD_HEIGHT / 2.0,
            SWORD_REACH,
            SWORD_HEIGHT,
        )
    }

    /// Publish this tick's read-only snapshot
    pub fn view(&self) -> PlayerView {
        PlayerView {
            pos: self.pos,
            alive: self.vitals.alive,
            sword: self.sword_hitbox(),
            body: self.body_hitbox(),
        }
    }
}
