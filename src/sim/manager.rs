//! The entity manager: spawning, the update pass, and collision channels
//!
//! Owns every hostile in the arena. Each tick it advances the spawn
//! timers, updates every live entity against the published player view,
//! runs the three collision channels (sword-vs-hostile, hostile-body-vs-
//! player, shockwave-vs-player), and purges destroyed entities at the end
//! of the pass so the scan never invalidates its own indices.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::events::GameEvent;
use super::hostile::{Hostile, HostileKind};
use super::player::PlayerView;
use crate::consts::SPAWN_RIM_OFFSET;
use crate::tuning::Tuning;

/// Where the boss drops into the arena
const BELLHEAD_SPAWN: Vec2 = Vec2::new(0.0, -250.0);

/// Owner of the live hostile collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityManager {
    /// Live entities, insertion order = spawn order
    pub hostiles: Vec<Hostile>,
    /// Frame counter driving the regular spawn cadence
    frame: u64,
    /// Accumulated real time toward the next boss-class spawn
    boss_timer: f32,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one hostile of the given variant
    pub fn spawn(
        &mut self,
        kind: HostileKind,
        spawn: Vec2,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        let stats = match kind {
            HostileKind::Ghoul => &tuning.ghoul,
            HostileKind::Bellhead => &tuning.bellhead,
            HostileKind::Pedestrian => &tuning.pedestrian,
        };
        log::debug!("spawning {kind:?} at {spawn:?}");
        self.hostiles.push(Hostile::new(kind, stats, spawn));
        events.push(GameEvent::HostileSpawned { kind });
    }

    /// Advance the manager one tick.
    ///
    /// Returns the damage amounts the player incurred this tick; the
    /// orchestrator applies them through the player's own i-frame gate.
    /// While the player is dead (or absent) combat resolution is frozen:
    /// hostiles neither deal nor receive damage, but still tick.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        arena: &Arena,
        player: Option<&PlayerView>,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Vec<i32> {
        self.frame += 1;

        // Regular hostiles arrive on a frame cadence, at the rim, and walk in
        if self.frame % tuning.ghoul_spawn_every_frames == 0 {
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            let rim = (arena.radius + SPAWN_RIM_OFFSET) * Vec2::new(theta.cos(), theta.sin());
            self.spawn(HostileKind::Ghoul, rim, tuning, events);
        }

        // Boss-class spawns run on real time, independent of frame rate
        self.boss_timer += dt;
        if self.boss_timer >= tuning.boss_spawn_secs {
            self.boss_timer -= tuning.boss_spawn_secs;
            self.spawn(HostileKind::Bellhead, BELLHEAD_SPAWN, tuning, events);
        }

        let mut incoming = Vec::new();
        for hostile in &mut self.hostiles {
            if hostile.destroyed {
                continue;
            }
            hostile.update(dt, arena, player, tuning, rng, events);

            let Some(view) = player else { continue };
            if !view.alive {
                continue;
            }
            // Set dressing joins neither combat channel
            if !hostile.kind.is_combatant() {
                continue;
            }

            // Sword channel: the weapon box against the hostile's hurtbox
            if hostile.vitals.alive && view.sword.overlaps(&hostile.hurtbox()) {
                hostile.apply_damage(tuning.player.sword_damage, view.pos, rng, events);
            }

            // Body channel: only an armed attack hurts the player
            if hostile.vitals.alive
                && hostile.damage_window_open()
                && hostile.body_hitbox().overlaps(&view.body)
            {
                incoming.push(hostile.stats(tuning).contact_damage);
            }

            // Shockwave channel, independent of the melee window
            if let Some(shockwave) = &hostile.shockwave
                && shockwave.hitbox.overlaps(&view.body)
            {
                incoming.push(shockwave.damage);
            }
        }

        // End-of-pass purge of destroyed entities
        let before = self.hostiles.len();
        self.hostiles.retain(|h| !h.destroyed);
        if self.hostiles.len() != before {
            log::debug!("purged {} destroyed entities", before - self.hostiles.len());
        }

        incoming
    }

    /// Destroy and remove every entity (player death / retry)
    pub fn reset(&mut self) {
        log::info!("entity manager reset, clearing {} entities", self.hostiles.len());
        for hostile in &mut self.hostiles {
            hostile.destroy();
        }
        self.hostiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::combat::Hitbox;
    use crate::sim::hostile::Shockwave;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (EntityManager, Arena, Tuning, Pcg32, Vec<GameEvent>) {
        let mut tuning = Tuning::default();
        // Keep the cadence out of the way unless a test wants it
        tuning.ghoul_spawn_every_frames = u64::MAX;
        tuning.boss_spawn_secs = f32::INFINITY;
        (
            EntityManager::new(),
            Arena::new(400.0),
            tuning,
            Pcg32::seed_from_u64(3),
            Vec::new(),
        )
    }

    fn view_at(pos: Vec2, sword: Hitbox) -> PlayerView {
        PlayerView {
            pos,
            alive: true,
            sword,
            body: Hitbox::anchored(pos, PLAYER_BODY_WIDTH, PLAYER_BODY_HEIGHT),
        }
    }

    fn no_sword() -> Hitbox {
        Hitbox::new(-1000.0, -1000.0, 1.0, 1.0)
    }

    #[test]
    fn compaction_removes_destroyed_entities() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        for i in 0..3 {
            mgr.spawn(
                HostileKind::Ghoul,
                Vec2::new(i as f32 * 50.0, 0.0),
                &tuning,
                &mut events,
            );
        }
        mgr.hostiles[1].destroy();

        mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);
        mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);

        assert_eq!(mgr.hostiles.len(), 2);
        assert!(mgr.hostiles.iter().all(|h| !h.destroyed));
    }

    #[test]
    fn basic_combat_exchange() {
        let (mut mgr, arena, mut tuning, mut rng, mut events) = setup();
        tuning.ghoul.max_health = 10;
        tuning.player.sword_damage = 10;
        // Outside aggro (so the ghoul is not invulnerable) but inside the sword
        mgr.spawn(HostileKind::Ghoul, Vec2::new(50.0, 0.0), &tuning, &mut events);

        let view = view_at(Vec2::ZERO, Hitbox::new(16.0, -40.0, 36.0, 14.0));
        mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert_eq!(mgr.hostiles[0].vitals.health, 0);

        mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert!(!mgr.hostiles[0].vitals.alive);
        assert!(events.iter().any(|e| matches!(e, GameEvent::HostileDied { .. })));
    }

    #[test]
    fn armed_attack_damages_player() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        // Inside aggro: the ghoul attacks immediately and its body overlaps
        mgr.spawn(HostileKind::Ghoul, Vec2::new(10.0, 0.0), &tuning, &mut events);

        let view = view_at(Vec2::ZERO, no_sword());
        let incoming = mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert_eq!(incoming, vec![tuning.ghoul.contact_damage]);
    }

    #[test]
    fn proximity_without_attack_is_harmless() {
        let (mut mgr, arena, mut tuning, mut rng, mut events) = setup();
        tuning.ghoul.aggro_distance = 1.0; // never triggers from here
        mgr.spawn(HostileKind::Ghoul, Vec2::new(10.0, 0.0), &tuning, &mut events);

        let view = view_at(Vec2::ZERO, no_sword());
        let incoming = mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert!(incoming.is_empty());
    }

    #[test]
    fn shockwave_channel_hits_independently() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        mgr.spawn(HostileKind::Bellhead, Vec2::new(300.0, 300.0), &tuning, &mut events);
        mgr.hostiles[0].shockwave = Some(Shockwave {
            hitbox: Hitbox::new(-50.0, -50.0, 100.0, 100.0),
            damage: tuning.shockwave_damage,
            ttl: 5,
        });

        let view = view_at(Vec2::ZERO, no_sword());
        let incoming = mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert_eq!(incoming, vec![tuning.shockwave_damage]);
    }

    #[test]
    fn combat_frozen_once_player_dead() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        mgr.spawn(HostileKind::Ghoul, Vec2::new(10.0, 0.0), &tuning, &mut events);

        let mut view = view_at(Vec2::ZERO, Hitbox::new(-100.0, -100.0, 200.0, 200.0));
        view.alive = false;
        let health = mgr.hostiles[0].vitals.health;
        let incoming = mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert!(incoming.is_empty());
        assert_eq!(mgr.hostiles[0].vitals.health, health);
    }

    #[test]
    fn pedestrians_never_join_combat() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        mgr.spawn(
            HostileKind::Pedestrian,
            Vec2::new(30.0, -30.0),
            &tuning,
            &mut events,
        );

        // Sword covering the pedestrian outright: still no damage either way
        let view = view_at(Vec2::ZERO, Hitbox::new(-100.0, -100.0, 200.0, 200.0));
        let incoming = mgr.update(DT, &arena, Some(&view), &tuning, &mut rng, &mut events);
        assert!(incoming.is_empty());
        assert_eq!(mgr.hostiles[0].vitals.health, tuning.pedestrian.max_health);
    }

    #[test]
    fn no_player_is_a_safe_noop() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        mgr.spawn(HostileKind::Ghoul, Vec2::new(10.0, 0.0), &tuning, &mut events);
        let incoming = mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);
        assert!(incoming.is_empty());
    }

    #[test]
    fn ghouls_spawn_on_the_frame_cadence() {
        let (mut mgr, arena, mut tuning, mut rng, mut events) = setup();
        tuning.ghoul_spawn_every_frames = 2;
        for _ in 0..4 {
            mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);
        }
        assert_eq!(mgr.hostiles.len(), 2);
        // Spawned at the rim, outside the legal radius
        for h in &mgr.hostiles {
            assert!((h.pos.length() - (arena.radius + SPAWN_RIM_OFFSET)).abs() < 1e-3);
            assert!(!h.entered_arena);
        }
    }

    #[test]
    fn boss_spawns_on_real_time_interval() {
        let (mut mgr, arena, mut tuning, mut rng, mut events) = setup();
        tuning.boss_spawn_secs = 0.05;
        for _ in 0..6 {
            mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);
        }
        let bosses = mgr
            .hostiles
            .iter()
            .filter(|h| h.kind == HostileKind::Bellhead)
            .count();
        assert_eq!(bosses, 2); // 6 ticks at 60 Hz = 0.1s
    }

    #[test]
    fn reset_clears_everything() {
        let (mut mgr, arena, tuning, mut rng, mut events) = setup();
        mgr.spawn(HostileKind::Ghoul, Vec2::ZERO, &tuning, &mut events);
        mgr.spawn(HostileKind::Bellhead, Vec2::ZERO, &tuning, &mut events);
        mgr.update(DT, &arena, None, &tuning, &mut rng, &mut events);
        mgr.reset();
        assert!(mgr.hostiles.is_empty());
    }
}
