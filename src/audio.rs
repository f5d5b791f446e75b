//! Fire-and-forget sound cues
//!
//! The simulation never plays audio itself. Events coming out of a tick map to
//! cues, and the host hands them to whatever [`AudioSink`] it owns. Nothing is
//! awaited and nothing comes back.

use crate::sim::{GameEvent, Shooter};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player pistol shot
    PlayerShot,
    /// Enemy rifle shot
    EnemyShot,
    /// Player took a bullet
    PlayerHit,
    /// Enemy eliminated
    EnemyDown,
    /// Wave cleared
    WaveClear,
}

impl SoundCue {
    /// Sound asset name (without extension)
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::PlayerShot => "pistol_shot",
            SoundCue::EnemyShot => "rifle_shot-1",
            SoundCue::PlayerHit => "player_hit_1",
            SoundCue::EnemyDown => "power_up_1",
            SoundCue::WaveClear => "power_up_2",
        }
    }
}

/// Cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::ShotFired { by: Shooter::Player } => Some(SoundCue::PlayerShot),
        GameEvent::ShotFired { by: Shooter::Enemy } => Some(SoundCue::EnemyShot),
        GameEvent::PlayerDamaged { .. } => Some(SoundCue::PlayerHit),
        GameEvent::EnemyEliminated { .. } => Some(SoundCue::EnemyDown),
        GameEvent::WaveCleared { .. } => Some(SoundCue::WaveClear),
        GameEvent::LevelStarted { .. } | GameEvent::Defeated => None,
    }
}

/// Receives cue requests; implementations must not block
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("cue {} at {:.2}", cue.asset(), volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(
            cue_for(&GameEvent::ShotFired { by: Shooter::Player }),
            Some(SoundCue::PlayerShot)
        );
        assert_eq!(
            cue_for(&GameEvent::ShotFired { by: Shooter::Enemy }),
            Some(SoundCue::EnemyShot)
        );
        assert_eq!(
            cue_for(&GameEvent::PlayerDamaged { health: 80.0 }),
            Some(SoundCue::PlayerHit)
        );
        assert_eq!(
            cue_for(&GameEvent::EnemyEliminated { at: Vec2::ZERO }),
            Some(SoundCue::EnemyDown)
        );
        assert_eq!(cue_for(&GameEvent::Defeated), None);
    }

    #[test]
    fn test_assets_match_sound_files() {
        assert_eq!(SoundCue::PlayerShot.asset(), "pistol_shot");
        assert_eq!(SoundCue::PlayerHit.asset(), "player_hit_1");
    }
}
