//! Game session: the thin coordinator between the UI and the round engine
//!
//! Owns the active round, the level controller, the leaderboard and the
//! settings. Clicks go through the pure resolver; side effects (leaderboard
//! writes, event queueing) happen here.

use crate::error::{GameError, Result, StorageError};
use crate::highscores::{Leaderboard, LeaderboardEntry, LeaderboardStore};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{
    Effect, GameEvent, IndexSource, LevelController, RoundState, RoundStatus, resolve_click,
};

pub struct Session<S, R> {
    player: String,
    levels: LevelController<R>,
    round: RoundState,
    leaderboard: LeaderboardStore<S>,
    settings: Settings,
    events: Vec<GameEvent>,
    last_effect: Effect,
}

impl<S: KeyValueStore, R: IndexSource> Session<S, R> {
    /// Start a run at level 1 for `player`.
    ///
    /// The name is the entry gate: it must contain something besides
    /// whitespace.
    pub fn new(player: &str, store: S, rng: R) -> Result<Self> {
        let player = player.trim();
        if player.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }

        let leaderboard = LeaderboardStore::open(store);
        let settings = Settings::load(leaderboard.store());
        let mut levels = LevelController::new(rng);
        let round = levels.reset_to_level1()?;

        log::info!("Session started for {}", player);
        Ok(Self {
            player: player.to_string(),
            levels,
            round,
            leaderboard,
            settings,
            events: Vec::new(),
            last_effect: Effect::none(),
        })
    }

    /// Click box `index` of the active round.
    ///
    /// When the click ends the round the score is recorded on the leaderboard.
    pub fn click(&mut self, index: usize) -> Result<Effect> {
        let effect = resolve_click(&mut self.round, index)?;
        if effect.is_noop() {
            return Ok(effect);
        }

        self.events.extend(effect.events(self.round.score()));
        self.last_effect = effect;

        if effect.ends_round() {
            self.record_round();
        }
        Ok(effect)
    }

    fn record_round(&mut self) {
        let entry = match LeaderboardEntry::new(self.player.clone(), self.round.score()) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Not recording round: {}", e);
                return;
            }
        };
        match self.leaderboard.record(entry) {
            Some(rank) => log::info!("{} placed #{} on the leaderboard", self.player, rank),
            None => log::info!("{} did not make the leaderboard", self.player),
        }
    }

    /// Start a new round on `level`
    pub fn start_level(&mut self, level: u32) -> Result<()> {
        self.round = self.levels.start_level(level)?;
        self.last_effect = Effect::none();
        Ok(())
    }

    /// Whether the UI should offer "Next Level" (won, and below the max level)
    pub fn can_advance(&self) -> bool {
        self.round.status() == RoundStatus::Won && self.settings.offers_next_level(self.level())
    }

    /// Move to the next level after a win.
    ///
    /// Returns `false` (and does nothing) if the current round is not won.
    /// The max-level cap is a UI decision, see [`Session::can_advance`].
    pub fn next_level(&mut self) -> Result<bool> {
        if self.round.status() != RoundStatus::Won {
            return Ok(false);
        }
        self.round = self.levels.advance()?;
        self.last_effect = Effect::none();
        self.events.push(GameEvent::LevelAdvance {
            level: self.levels.level(),
        });
        Ok(true)
    }

    /// Restart the run from level 1 ("Play Again" / "Try Again")
    pub fn play_again(&mut self) -> Result<()> {
        self.round = self.levels.reset_to_level1()?;
        self.last_effect = Effect::none();
        self.events.push(GameEvent::RoundReset {
            level: self.levels.level(),
        });
        Ok(())
    }

    /// Take the queued presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn level(&self) -> u32 {
        self.levels.level()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> u64 {
        self.round.score()
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    /// Effect of the last scoring/ending click this round (for the popup)
    pub fn last_effect(&self) -> Effect {
        self.last_effect
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        self.leaderboard.board()
    }

    /// Re-read the leaderboard from storage
    pub fn load_leaderboard(&self) -> Leaderboard {
        self.leaderboard.load()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn save_settings(&mut self) -> std::result::Result<(), StorageError> {
        self.settings.save(self.leaderboard.store_mut())
    }
}
