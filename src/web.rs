//! Browser bindings (WASM only)
//!
//! A thin `wasm-bindgen` wrapper over [`Session`]. Structured values cross
//! the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, CueSink, SoundCue};
use crate::persistence::KeyValueStore;
use crate::platform;
use crate::session::Session;
use crate::sim::SeededIndices;

#[wasm_bindgen(start)]
pub fn start() {
    platform::init_logging();
    log::info!("Safe Box (web) starting...");
}

/// Collects cue names for JS to play
#[derive(Debug, Default)]
struct CueQueue(Vec<&'static str>);

impl CueSink for CueQueue {
    fn play(&mut self, cue: SoundCue) {
        self.0.push(cue.as_str());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<Box<dyn KeyValueStore>, SeededIndices>,
    audio: AudioManager<CueQueue>,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a run; fails if the name is blank
    #[wasm_bindgen(constructor)]
    pub fn new(player: &str) -> Result<WebGame, JsError> {
        let rng = SeededIndices::from_entropy();
        log::info!("Round seed: {}", rng.seed());
        let session = Session::new(player, platform::default_store(), rng)?;
        let audio = AudioManager::new(CueQueue::default(), session.settings().muted);
        Ok(Self { session, audio })
    }

    /// Click a box; returns the effect kind ("None", "Safe", "Bonus", "Hazard")
    pub fn click(&mut self, index: usize) -> Result<String, JsError> {
        let effect = self.session.click(index)?;
        self.route_events();
        Ok(format!("{:?}", effect.kind))
    }

    pub fn next_level(&mut self) -> Result<bool, JsError> {
        let advanced = self.session.next_level()?;
        self.route_events();
        Ok(advanced)
    }

    pub fn play_again(&mut self) -> Result<(), JsError> {
        self.session.play_again()?;
        self.route_events();
        Ok(())
    }

    fn route_events(&mut self) {
        for event in self.session.drain_events() {
            self.audio.handle(&event);
        }
    }

    /// Sound cue names queued since the last call, as a JSON array
    pub fn drain_cues(&mut self) -> Result<String, JsError> {
        let cues = std::mem::take(&mut self.audio.sink_mut().0);
        Ok(serde_json::to_string(&cues)?)
    }

    pub fn player(&self) -> String {
        self.session.player().to_string()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn grid_size(&self) -> u32 {
        self.session.round().config().grid_size()
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    /// "in_progress", "won" or "lost"
    pub fn status(&self) -> String {
        self.session.status().as_str().to_string()
    }

    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    /// Popup text for the last click ("+10 🎁" / "+5 ✅")
    pub fn popup(&self) -> Option<String> {
        self.session.last_effect().popup_text().map(str::to_string)
    }

    /// Row-major cell views as a JSON array
    pub fn cells(&self) -> Result<String, JsError> {
        let cells: Vec<_> = self.session.round().cells().collect();
        Ok(serde_json::to_string(&cells)?)
    }

    /// Top 5 as a JSON array of `{name, score}`
    pub fn leaderboard(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.leaderboard())?)
    }

    /// Toggle mute, persist it, and return the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.session.settings_mut().toggle_muted();
        let muted = self.session.settings().muted;
        self.audio.set_muted(muted);
        self.persist_settings();
        muted
    }

    /// Toggle the theme, persist it, and return its name
    pub fn toggle_theme(&mut self) -> String {
        self.session.settings_mut().toggle_theme();
        self.persist_settings();
        self.session.settings().theme.as_str().to_string()
    }

    pub fn theme(&self) -> String {
        self.session.settings().theme.as_str().to_string()
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.session.save_settings() {
            log::warn!("Could not save settings: {}", e);
        }
    }
}
