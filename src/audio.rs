//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short list of oscillator tones; only the playback half
//! touches the browser.

use crate::sim::{GameEvent, ItemKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Enemy cut down or shot
    EnemySlain,
    /// Player lost a life
    Hurt,
    /// Shield soaked a hit
    ShieldBreak,
    /// Item picked up
    Pickup,
    /// Ranged shot
    Shoot,
    /// Boss took damage
    BossHit,
    /// Boss entered the field
    BossRoar,
    /// Boss defeated
    BossDown,
    /// Zone cleared, shop opening
    LevelClear,
    /// Final boss defeated
    Victory,
    /// Out of lives
    GameOver,
    /// Shop purchase
    Purchase,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice: exponential pitch sweep with a decaying gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Peak gain before the master volume is applied
    pub gain: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Seconds
    pub duration: f64,
}

const fn tone(wave: Wave, freq_start: f32, freq_end: f32, gain: f32, delay: f64, duration: f64) -> Tone {
    Tone {
        wave,
        freq_start,
        freq_end,
        gain,
        delay,
        duration,
    }
}

const ENEMY_SLAIN: &[Tone] = &[
    tone(Wave::Square, 600.0, 150.0, 0.25, 0.0, 0.12),
    tone(Wave::Sine, 90.0, 50.0, 0.3, 0.0, 0.1),
];

const HURT: &[Tone] = &[
    tone(Wave::Sawtooth, 220.0, 80.0, 0.4, 0.0, 0.25),
];

const SHIELD_BREAK: &[Tone] = &[
    tone(Wave::Triangle, 1800.0, 400.0, 0.3, 0.0, 0.2),
    tone(Wave::Square, 5000.0, 3000.0, 0.08, 0.0, 0.08),
];

const PICKUP: &[Tone] = &[
    tone(Wave::Sine, 660.0, 660.0, 0.3, 0.0, 0.08),
    tone(Wave::Sine, 990.0, 990.0, 0.3, 0.08, 0.12),
];

const SHOOT: &[Tone] = &[
    tone(Wave::Square, 900.0, 300.0, 0.15, 0.0, 0.08),
];

const BOSS_HIT: &[Tone] = &[
    tone(Wave::Triangle, 140.0, 90.0, 0.2, 0.0, 0.06),
];

const BOSS_ROAR: &[Tone] = &[
    tone(Wave::Sawtooth, 60.0, 120.0, 0.4, 0.0, 0.6),
    tone(Wave::Square, 45.0, 40.0, 0.2, 0.1, 0.5),
];

const BOSS_DOWN: &[Tone] = &[
    tone(Wave::Sawtooth, 300.0, 30.0, 0.5, 0.0, 0.8),
    tone(Wave::Sine, 80.0, 20.0, 0.5, 0.0, 0.9),
];

const LEVEL_CLEAR: &[Tone] = &[
    tone(Wave::Sine, 523.25, 523.25, 0.3, 0.0, 0.15),
    tone(Wave::Sine, 659.25, 659.25, 0.3, 0.12, 0.15),
    tone(Wave::Sine, 783.99, 783.99, 0.3, 0.24, 0.3),
];

const VICTORY: &[Tone] = &[
    tone(Wave::Triangle, 523.25, 523.25, 0.35, 0.0, 0.2),
    tone(Wave::Triangle, 659.25, 659.25, 0.35, 0.15, 0.2),
    tone(Wave::Triangle, 783.99, 783.99, 0.35, 0.3, 0.2),
    tone(Wave::Triangle, 1046.5, 1046.5, 0.4, 0.45, 0.6),
];

const GAME_OVER: &[Tone] = &[
    tone(Wave::Sawtooth, 392.0, 370.0, 0.3, 0.0, 0.3),
    tone(Wave::Sawtooth, 311.1, 293.7, 0.3, 0.3, 0.3),
    tone(Wave::Sawtooth, 261.6, 130.8, 0.35, 0.6, 0.8),
];

const PURCHASE: &[Tone] = &[
    tone(Wave::Square, 1200.0, 1200.0, 0.15, 0.0, 0.05),
    tone(Wave::Square, 1600.0, 1600.0, 0.15, 0.05, 0.1),
];

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::EnemySlain => Some(SoundEffect::EnemySlain),
            GameEvent::PlayerHurt { .. } => Some(SoundEffect::Hurt),
            GameEvent::ShieldBroken => Some(SoundEffect::ShieldBreak),
            GameEvent::ItemCollected(ItemKind::Shield | ItemKind::Sword) => {
                Some(SoundEffect::Pickup)
            }
            GameEvent::ProjectileFired => Some(SoundEffect::Shoot),
            GameEvent::BossArrived => Some(SoundEffect::BossRoar),
            GameEvent::BossHit { .. } => Some(SoundEffect::BossHit),
            GameEvent::BossDefeated => Some(SoundEffect::BossDown),
            GameEvent::LevelCleared { .. } => Some(SoundEffect::LevelClear),
            GameEvent::Won { .. } => Some(SoundEffect::Victory),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Purchased(_) => Some(SoundEffect::Purchase),
            GameEvent::LevelStarted { .. } => None,
        }
    }

    /// Oscillator voices making up this effect
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::EnemySlain => ENEMY_SLAIN,
            SoundEffect::Hurt => HURT,
            SoundEffect::ShieldBreak => SHIELD_BREAK,
            SoundEffect::Pickup => PICKUP,
            SoundEffect::Shoot => SHOOT,
            SoundEffect::BossHit => BOSS_HIT,
            SoundEffect::BossRoar => BOSS_ROAR,
            SoundEffect::BossDown => BOSS_DOWN,
            SoundEffect::LevelClear => LEVEL_CLEAR,
            SoundEffect::Victory => VICTORY,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::Purchase => PURCHASE,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up changed volume or mute settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time();
            for tone in effect.tones() {
                self.play_tone(ctx, tone, t);
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, now: f64) {
            let osc_type = match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq_start, osc_type) else {
                return;
            };
            let start = now + tone.delay;
            let end = start + tone.duration;

            gain.gain().set_value_at_time(0.0, now).ok();
            gain.gain()
                .set_value_at_time(self.volume * tone.gain, start)
                .ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.freq_end != tone.freq_start {
                osc.frequency().set_value_at_time(tone.freq_start, start).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.freq_end, end)
                    .ok();
            }

            osc.start_with_when(start).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ShopItem;

    #[test]
    fn test_every_effect_is_audible() {
        let all = [
            SoundEffect::EnemySlain,
            SoundEffect::Hurt,
            SoundEffect::ShieldBreak,
            SoundEffect::Pickup,
            SoundEffect::Shoot,
            SoundEffect::BossHit,
            SoundEffect::BossRoar,
            SoundEffect::BossDown,
            SoundEffect::LevelClear,
            SoundEffect::Victory,
            SoundEffect::GameOver,
            SoundEffect::Purchase,
        ];
        for effect in all {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{:?}", effect);
            for t in tones {
                // Exponential ramps need strictly positive endpoints
                assert!(t.freq_start > 0.0 && t.freq_end > 0.0);
                assert!(t.gain > 0.0 && t.gain <= 1.0);
                assert!(t.duration > 0.0);
            }
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Purchased(ShopItem::Sword)),
            Some(SoundEffect::Purchase)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerHurt { lives: 1 }),
            Some(SoundEffect::Hurt)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::LevelStarted { level: 0 }), None);
    }
}
