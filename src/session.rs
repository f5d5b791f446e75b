//! Frame-driven game session
//!
//! Owns at most one [`GameState`] and feeds it fixed ticks out of measured
//! frame time. Events produced by each tick are turned into sound cues and
//! handed to the audio sink right away.

use crate::audio::{AudioSink, cue_for};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, SimConfig, Snapshot, TickInput, tick};

/// A play session: menu, running game, defeat screen
pub struct Session<S: AudioSink> {
    settings: Settings,
    config: SimConfig,
    sink: S,
    state: Option<GameState>,
    accumulator: f32,
    /// Fire pressed since the last tick ran
    pending_fire: bool,
}

impl<S: AudioSink> Session<S> {
    pub fn new(settings: Settings, config: SimConfig, sink: S) -> Self {
        Self {
            settings,
            config,
            sink,
            state: None,
            accumulator: 0.0,
            pending_fire: false,
        }
    }

    /// Current phase (`Menu` until a run is started)
    pub fn phase(&self) -> GamePhase {
        self.state.as_ref().map_or(GamePhase::Menu, |s| s.phase)
    }

    /// Start a fresh run, discarding any previous one
    pub fn start(&mut self, seed: u64) {
        let mut config = self.config.clone();
        config.max_particles = config.max_particles.min(self.settings.max_particles());

        let mut state = GameState::new(seed, config);
        // Level setup events carry no cue; drop them so the first frame starts clean
        state.drain_events();

        self.state = Some(state);
        self.accumulator = 0.0;
        self.pending_fire = false;
        log::info!("Session started with seed {}", seed);
    }

    /// Tear down the current run
    pub fn return_to_menu(&mut self) {
        if self.state.take().is_some() {
            log::info!("Session returned to menu");
        }
        self.accumulator = 0.0;
        self.pending_fire = false;
    }

    /// Advance by measured frame time, returning the number of ticks run
    ///
    /// A fire press is held until a tick consumes it, even across frames
    /// too short to run one.
    pub fn frame(&mut self, elapsed: f32, input: &TickInput) -> u32 {
        let Some(state) = self.state.as_mut() else {
            return 0;
        };
        if state.phase != GamePhase::Playing {
            return 0;
        }

        let elapsed = if elapsed.is_finite() { elapsed.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += elapsed;

        self.pending_fire |= input.fire;
        let mut input = input.clone();
        input.fire = self.pending_fire;
        input.effects_enabled = self.settings.blood_effects;
        let volume = self.settings.effective_sound_volume();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire = false;
            self.pending_fire = false;

            for event in state.drain_events() {
                if let Some(cue) = cue_for(&event) {
                    self.sink.play(cue, volume);
                }
            }

            if state.phase != GamePhase::Playing {
                self.accumulator = 0.0;
                log::info!("Session over: wave {}, score {}", state.wave, state.score);
                break;
            }
        }

        substeps
    }

    /// Owned view of the current run, if any
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings; effects and volume apply from the next frame, the
    /// particle cap from the next `start`
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
