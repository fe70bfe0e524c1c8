//! Hostile entities: the chaser, the boss, and set dressing
//!
//! All variants share one struct and one update path; behavior differences
//! live in [`HostileKind`] dispatch and per-variant tuning. The attack
//! cycle is an explicit time-driven state machine so transitions stay
//! testable without any animation backend.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::combat::{Hitbox, Vitals};
use super::events::{GameEvent, SoundCue, pick_cue};
use super::player::PlayerView;
use crate::consts::*;
use crate::tuning::{HostileTuning, Tuning};

/// Hostile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    /// Melee chaser
    Ghoul,
    /// Boss-class heavy; slams a shockwave hazard at the attack frame
    Bellhead,
    /// Decorative bystander: no AI, no combat
    Pedestrian,
}

impl HostileKind {
    pub fn is_combatant(self) -> bool {
        !matches!(self, HostileKind::Pedestrian)
    }

    pub fn body_size(self) -> (f32, f32) {
        match self {
            HostileKind::Ghoul => (GHOUL_BODY_WIDTH, GHOUL_BODY_HEIGHT),
            HostileKind::Bellhead => (BELLHEAD_BODY_WIDTH, BELLHEAD_BODY_HEIGHT),
            HostileKind::Pedestrian => (GHOUL_BODY_WIDTH, GHOUL_BODY_HEIGHT),
        }
    }

    fn death_cues(self) -> &'static [SoundCue] {
        match self {
            HostileKind::Ghoul => &[SoundCue::GhoulDeathA, SoundCue::GhoulDeathB],
            HostileKind::Bellhead => &[SoundCue::BellheadDeathA, SoundCue::BellheadDeathB],
            HostileKind::Pedestrian => &[],
        }
    }

    fn hurt_cues(self) -> &'static [SoundCue] {
        match self {
            HostileKind::Ghoul => &[SoundCue::GhoulHurtA, SoundCue::GhoulHurtB],
            HostileKind::Bellhead => &[SoundCue::BellheadHurt],
            HostileKind::Pedestrian => &[],
        }
    }
}

/// Attack cycle, advanced by elapsed time each tick.
///
/// Movement is suppressed and incoming damage rejected for the whole
/// non-idle cycle; the contact-damage window is open only while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackPhase {
    Idle,
    WindUp { remaining: f32 },
    Active { remaining: f32 },
    Recovery { remaining: f32 },
}

/// Area hazard dropped by the Bellhead's slam; collides with the player's
/// body independently of the melee channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shockwave {
    pub hitbox: Hitbox,
    pub damage: i32,
    /// Ticks remaining before the hazard dissipates
    pub ttl: u32,
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: HostileKind,
    pub vitals: Vitals,
    pub pos: Vec2,
    /// Per-axis chase speed; applied independently, so diagonal pursuit is
    /// a factor of sqrt(2) faster than axial. Observed behavior, kept.
    pub vel: Vec2,
    pub facing_left: bool,
    /// Latched once observed inside the arena; gates confinement so rim
    /// spawns can walk in
    pub entered_arena: bool,
    /// Render layering key, refreshed from y while alive
    pub depth: f32,
    /// Set by `destroy()`; the manager purges the entity at end of pass
    pub destroyed: bool,
    pub attack: AttackPhase,
    pub shockwave: Option<Shockwave>,
    iframe_ticks: u32,
}

impl Hostile {
    pub fn new(kind: HostileKind, tuning: &HostileTuning, spawn: Vec2) -> Self {
        Self {
            kind,
            vitals: Vitals::new(tuning.max_health, tuning.shield),
            pos: spawn,
            vel: Vec2::splat(tuning.speed),
            facing_left: false,
            entered_arena: false,
            depth: spawn.y,
            destroyed: false,
            attack: AttackPhase::Idle,
            shockwave: None,
            iframe_ticks: tuning.iframe_ticks,
        }
    }

    /// Mark for removal; the entity stays in its dying pose until then
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn attacking(&self) -> bool {
        !matches!(self.attack, AttackPhase::Idle)
    }

    /// Whether the contact-damage window is currently armed
    pub fn damage_window_open(&self) -> bool {
        matches!(self.attack, AttackPhase::Active { .. })
    }

    pub fn body_hitbox(&self) -> Hitbox {
        let (w, h) = self.kind.body_size();
        Hitbox::anchored(self.pos, w, h)
    }

    /// Box the player's sword must reach. The Bellhead's is shrunk on two
    /// sides so its weak point takes commitment to hit.
    pub fn hurtbox(&self) -> Hitbox {
        let body = self.body_hitbox();
        match self.kind {
            HostileKind::Bellhead => body.shrunk_two_sides(BELLHEAD_WEAKPOINT_MARGIN),
            _ => body,
        }
    }

    /// Tuning entry for this variant
    pub(crate) fn stats<'a>(&self, tuning: &'a Tuning) -> &'a HostileTuning {
        match self.kind {
            HostileKind::Ghoul => &tuning.ghoul,
            HostileKind::Bellhead => &tuning.bellhead,
            HostileKind::Pedestrian => &tuning.pedestrian,
        }
    }

    /// Incoming damage. Rejected outright while this entity is mid-attack;
    /// otherwise goes through the usual i-frame gate. The Bellhead recoils
    /// away from the attacker on every accepted hit.
    pub fn apply_damage<R: Rng>(
        &mut self,
        amount: i32,
        attacker_pos: Vec2,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.attacking() {
            return false;
        }
        if !self.vitals.take_damage(amount, self.iframe_ticks) {
            return false;
        }
        if self.vitals.health > 0
            && let Some(cue) = pick_cue(rng, self.kind.hurt_cues())
        {
            events.push(GameEvent::Sound(cue));
        }
        if self.kind == HostileKind::Bellhead {
            let away = self.pos - attacker_pos;
            self.pos.x += if away.x >= 0.0 {
                BELLHEAD_KNOCKBACK
            } else {
                -BELLHEAD_KNOCKBACK
            };
            self.pos.y += if away.y >= 0.0 {
                BELLHEAD_KNOCKBACK
            } else {
                -BELLHEAD_KNOCKBACK
            };
        }
        true
    }

    /// Advance this hostile one tick against the published player view.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        arena: &Arena,
        player: Option<&PlayerView>,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        // Base entity upkeep, fixed order: boundary, layering, death
        // transition, cooldown.
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
            self.attack = AttackPhase::Idle;
            events.push(GameEvent::HostileDied { kind: self.kind });
            if let Some(cue) = pick_cue(rng, self.kind.death_cues()) {
                events.push(GameEvent::Sound(cue));
            }
        }
        self.vitals.tick_cooldown();

        // Hazards outlive the attack phase but not their ttl
        if let Some(shockwave) = &mut self.shockwave {
            if shockwave.ttl == 0 {
                self.shockwave = None;
            } else {
                shockwave.ttl -= 1;
            }
        }

        if !self.vitals.alive || !self.kind.is_combatant() {
            return;
        }
        // No target, or combat frozen by player death: hold position
        let Some(view) = player else { return };
        if !view.alive {
            return;
        }
        if !view.pos.is_finite() {
            log::warn!("hostile: ignoring non-finite player position {:?}", view.pos);
            return;
        }

        let stats = self.stats(tuning);
        match self.attack {
            AttackPhase::Idle => {
                let dist = (view.pos - self.pos).length();
                if dist <= stats.aggro_distance {
                    self.attack = if stats.windup_secs > 0.0 {
                        AttackPhase::WindUp {
                            remaining: stats.windup_secs,
                        }
                    } else {
                        self.arm_attack(tuning, events)
                    };
                } else {
                    self.chase(view.pos, dt);
                }
            }
            AttackPhase::WindUp { remaining } => {
                let remaining = remaining - dt;
                self.attack = if remaining <= 0.0 {
                    self.arm_attack(tuning, events)
                } else {
                    AttackPhase::WindUp { remaining }
                };
            }
            AttackPhase::Active { remaining } => {
                let remaining = remaining - dt;
                self.attack = if remaining <= 0.0 {
                    AttackPhase::Recovery {
                        remaining: stats.recovery_secs,
                    }
                } else {
                    AttackPhase::Active { remaining }
                };
            }
            AttackPhase::Recovery { remaining } => {
                let remaining = remaining - dt;
                self.attack = if remaining <= 0.0 {
                    AttackPhase::Idle
                } else {
                    AttackPhase::Recovery { remaining }
                };
            }
        }
    }

    /// Open the damage window; the Bellhead's slam also drops its hazard
    fn arm_attack(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) -> AttackPhase {
        let stats = self.stats(tuning);
        if self.kind == HostileKind::Bellhead {
            self.shockwave = Some(Shockwave {
                hitbox: Hitbox::anchored(self.pos, SHOCKWAVE_WIDTH, SHOCKWAVE_HEIGHT),
                damage: tuning.shockwave_damage,
                ttl: tuning.shockwave_ttl_ticks,
            });
            events.push(GameEvent::ShockwaveSpawned);
            events.push(GameEvent::Sound(SoundCue::ShockwaveSlam));
        }
        AttackPhase::Active {
            remaining: stats.active_secs,
        }
    }

    /// Step toward the target at fixed per-axis speed. Each axis moves
    /// independently every tick, so the step is never normalized.
    fn chase(&mut self, target: Vec2, dt: f32) {
        let dx = target.x - self.pos.x;
        if self.pos.x < target.x {
            self.pos.x += self.vel.x * dt;
        } else {
            self.pos.x -= self.vel.x * dt;
        }
        // The Bellhead holds its facing inside a small deadzone so it
        // doesn't flicker while straddling the player.
        match self.kind {
            HostileKind::Bellhead => {
                if dx.abs() > BELLHEAD_FLIP_DEADZONE {
                    self.facing_left = dx < 0.0;
                }
            }
            _ => self.facing_left = dx < 0.0,
        }

        if self.pos.y < target.y {
            self.pos.y += self.vel.y * dt;
        } else {
            self.pos.y -= self.vel.y * dt;
        }
    }
}
