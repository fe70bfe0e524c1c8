//! Presentation events emitted by the simulation
//!
//! The sim never touches audio or rendering directly; it pushes
//! fire-and-forget events onto the world's queue and a frontend drains
//! them after each tick. Sound cues are plain identifiers the audio
//! collaborator resolves however it likes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hostile::HostileKind;

/// Sound effect identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player takes a hit
    PlayerHurtA,
    PlayerHurtB,
    /// Player death
    PlayerDeath,
    /// Ghoul takes a hit
    GhoulHurtA,
    GhoulHurtB,
    /// Ghoul death
    GhoulDeathA,
    GhoulDeathB,
    /// Bellhead takes a hit - metallic clang
    BellheadHurt,
    /// Bellhead death lines
    BellheadDeathA,
    BellheadDeathB,
    /// Bellhead slam shockwave
    ShockwaveSlam,
}

/// One tick's worth of things the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a sound, fire-and-forget
    Sound(SoundCue),
    /// A hostile entered the world
    HostileSpawned { kind: HostileKind },
    /// A hostile's death transition fired: swap to the death presentation
    /// and drop it beneath live entities
    HostileDied { kind: HostileKind },
    /// The player's death transition fired
    PlayerDied,
    /// The Bellhead slammed and its shockwave hazard went live
    ShockwaveSpawned,
}

/// Pick one cue at random from a variant's configured list.
///
/// Returns `None` for variants with no cues configured (e.g. decorative
/// entities die silently).
pub fn pick_cue<R: Rng>(rng: &mut R, cues: &'static [SoundCue]) -> Option<SoundCue> {
    if cues.is_empty() {
        return None;
    }
    Some(cues[rng.random_range(0..cues.len())])
}
