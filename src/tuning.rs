//! Data-driven game balance
//!
//! Every balance number the sim consumes lives here, with the shipped
//! values as defaults. A frontend can override any subset from JSON
//! without recompiling; absent fields keep their shipped defaults.
//! Overrides deserialize through an all-optional patch merged onto
//! [`Tuning::default`], so a partial override of one variant never
//! inherits another variant's baseline.

use serde::{Deserialize, Serialize};

/// Player balance
#[derive(Debug, Clone, Serialize)]
pub struct PlayerTuning {
    pub max_health: i32,
    /// Reserved stat, carried but not used in damage math
    pub shield: i32,
    /// Movement speed, units per second per axis
    pub movement_speed: f32,
    /// I-frame window after taking a hit, in ticks
    pub iframe_ticks: u32,
    /// Sword damage per connecting swing
    pub sword_damage: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            shield: 50,
            movement_speed: 120.0,
            iframe_ticks: 20,
            sword_damage: 25,
        }
    }
}

/// Per-variant hostile balance
#[derive(Debug, Clone, Serialize)]
pub struct HostileTuning {
    pub max_health: i32,
    /// Reserved stat, carried but not used in damage math
    pub shield: i32,
    /// Chase speed, units per second applied per axis (unnormalized)
    pub speed: f32,
    /// Damage dealt to the player during the active attack window
    pub contact_damage: i32,
    /// I-frame window after taking a hit, in ticks
    pub iframe_ticks: u32,
    /// Distance to the player at which chasing turns into attacking
    pub aggro_distance: f32,
    /// Attack wind-up before the damage window arms, in seconds
    pub windup_secs: f32,
    /// Length of the armed damage window, in seconds
    pub active_secs: f32,
    /// Post-swing recovery before chasing resumes, in seconds
    pub recovery_secs: f32,
}

impl Default for HostileTuning {
    fn default() -> Self {
        // Ghoul values double as the baseline
        Self {
            max_health: 100,
            shield: 50,
            speed: 30.0,
            contact_damage: 10,
            iframe_ticks: 10,
            aggro_distance: 40.0,
            windup_secs: 0.0,
            active_secs: 0.25,
            recovery_secs: 0.2,
        }
    }
}

impl HostileTuning {
    fn bellhead() -> Self {
        Self {
            max_health: 1000,
            shield: 50,
            speed: 12.0,
            contact_damage: 25,
            iframe_ticks: 20,
            aggro_distance: 90.0,
            windup_secs: 0.4,
            active_secs: 0.3,
            recovery_secs: 0.5,
        }
    }

    fn pedestrian() -> Self {
        // Decorative: never chases, never attacks
        Self {
            max_health: 100,
            shield: 0,
            speed: 0.0,
            contact_damage: 0,
            iframe_ticks: 3,
            aggro_distance: 0.0,
            windup_secs: 0.0,
            active_secs: 0.0,
            recovery_secs: 0.0,
        }
    }
}

/// Complete balance set consumed by the sim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TuningPatch")]
pub struct Tuning {
    pub player: PlayerTuning,
    pub ghoul: HostileTuning,
    pub bellhead: HostileTuning,
    pub pedestrian: HostileTuning,
    /// Shockwave hazard damage (separate from Bellhead contact damage)
    pub shockwave_damage: i32,
    /// Ticks the shockwave hazard stays live after the slam
    pub shockwave_ttl_ticks: u32,
    /// A ghoul spawns whenever the frame counter hits this modulus
    pub ghoul_spawn_every_frames: u64,
    /// Real-time interval between boss-class spawns, in seconds
    pub boss_spawn_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            ghoul: HostileTuning::default(),
            bellhead: HostileTuning::bellhead(),
            pedestrian: HostileTuning::pedestrian(),
            shockwave_damage: 50,
            shockwave_ttl_ticks: 12,
            ghoul_spawn_every_frames: 600,
            boss_spawn_secs: 30.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON; absent fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn merge<T>(slot: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *slot = value;
    }
}

/// All-optional mirror of [`PlayerTuning`] for partial overrides
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlayerTuningPatch {
    max_health: Option<i32>,
    shield: Option<i32>,
    movement_speed: Option<f32>,
    iframe_ticks: Option<u32>,
    sword_damage: Option<i32>,
}

impl PlayerTuningPatch {
    fn apply(self, base: &mut PlayerTuning) {
        merge(&mut base.max_health, self.max_health);
        merge(&mut base.shield, self.shield);
        merge(&mut base.movement_speed, self.movement_speed);
        merge(&mut base.iframe_ticks, self.iframe_ticks);
        merge(&mut base.sword_damage, self.sword_damage);
    }
}

/// All-optional mirror of [`HostileTuning`] for partial overrides
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostileTuningPatch {
    max_health: Option<i32>,
    shield: Option<i32>,
    speed: Option<f32>,
    contact_damage: Option<i32>,
    iframe_ticks: Option<u32>,
    aggro_distance: Option<f32>,
    windup_secs: Option<f32>,
    active_secs: Option<f32>,
    recovery_secs: Option<f32>,
}

impl HostileTuningPatch {
    fn apply(self, base: &mut HostileTuning) {
        merge(&mut base.max_health, self.max_health);
        merge(&mut base.shield, self.shield);
        merge(&mut base.speed, self.speed);
        merge(&mut base.contact_damage, self.contact_damage);
        merge(&mut base.iframe_ticks, self.iframe_ticks);
        merge(&mut base.aggro_distance, self.aggro_distance);
        merge(&mut base.windup_secs, self.windup_secs);
        merge(&mut base.active_secs, self.active_secs);
        merge(&mut base.recovery_secs, self.recovery_secs);
    }
}

/// Wire shape of a tuning override: every field optional, merged onto
/// the shipped defaults so each variant keeps its own baseline.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TuningPatch {
    player: PlayerTuningPatch,
    ghoul: HostileTuningPatch,
    bellhead: HostileTuningPatch,
    pedestrian: HostileTuningPatch,
    shockwave_damage: Option<i32>,
    shockwave_ttl_ticks: Option<u32>,
    ghoul_spawn_every_frames: Option<u64>,
    boss_spawn_secs: Option<f32>,
}

impl From<TuningPatch> for Tuning {
    fn from(patch: TuningPatch) -> Self {
        let mut tuning = Tuning::default();
        patch.player.apply(&mut tuning.player);
        patch.ghoul.apply(&mut tuning.ghoul);
        patch.bellhead.apply(&mut tuning.bellhead);
        patch.pedestrian.apply(&mut tuning.pedestrian);
        merge(&mut tuning.shockwave_damage, patch.shockwave_damage);
        merge(&mut tuning.shockwave_ttl_ticks, patch.shockwave_ttl_ticks);
        merge(&mut tuning.ghoul_spawn_every_frames, patch.ghoul_spawn_every_frames);
        merge(&mut tuning.boss_spawn_secs, patch.boss_spawn_secs);
        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_balance() {
        let t = Tuning::default();
        assert_eq!(t.player.max_health, 100);
        assert_eq!(t.player.shield, 50);
        assert_eq!(t.ghoul.max_health, 100);
        assert_eq!(t.bellhead.max_health, 1000);
        assert_eq!(t.shockwave_damage, 50);
        // Pedestrians must never enter combat
        assert_eq!(t.pedestrian.contact_damage, 0);
        assert_eq!(t.pedestrian.aggro_distance, 0.0);
    }

    #[test]
    fn partial_json_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{"bellhead": {"max_health": 2000}}"#).unwrap();
        assert_eq!(t.bellhead.max_health, 2000);
        // Untouched bellhead fields and siblings keep defaults
        assert_eq!(t.bellhead.contact_damage, 25);
        assert_eq!(t.ghoul.max_health, 100);
    }

    #[test]
    fn variant_patch_keeps_its_own_baseline() {
        // A partial bellhead override must not regress to the ghoul baseline
        let t = Tuning::from_json(
            r#"{"bellhead": {"speed": 20.0}, "player": {"sword_damage": 40}}"#,
        )
        .unwrap();
        assert_eq!(t.bellhead.speed, 20.0);
        assert_eq!(t.bellhead.max_health, 1000);
        assert_eq!(t.bellhead.windup_secs, 0.4);
        assert_eq!(t.bellhead.aggro_distance, 90.0);
        assert_eq!(t.player.sword_damage, 40);
        assert_eq!(t.player.max_health, 100);
    }

    #[test]
    fn top_level_scalar_override() {
        let t = Tuning::from_json(r#"{"shockwave_damage": 75}"#).unwrap();
        assert_eq!(t.shockwave_damage, 75);
        assert_eq!(t.shockwave_ttl_ticks, 12);
    }

    #[test]
    fn json_round_trip() {
        let t = Tuning::default();
        let json = t.to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.bellhead.aggro_distance, t.bellhead.aggro_distance);
        assert_eq!(back.bellhead.contact_damage, t.bellhead.contact_damage);
        assert_eq!(back.ghoul_spawn_every_frames, t.ghoul_spawn_every_frames);
    }

    #[test]
    fn garbage_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
