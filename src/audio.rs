//! Sound cue routing
//!
//! The engine does not play audio. It maps game events to named cues and
//! hands them to a [`CueSink`] supplied by the presentation layer.

use crate::sim::GameEvent;

/// Sound cue names, one per sound asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Box revealed
    Click,
    /// Run restarted
    Reset,
    /// Round lost
    Lose,
    /// Bomb explosion
    Bomb,
    /// Round won / next level
    Transition,
}

impl SoundCue {
    /// Asset name (without extension)
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Click => "click",
            SoundCue::Reset => "reset",
            SoundCue::Lose => "lose",
            SoundCue::Bomb => "bomb",
            SoundCue::Transition => "transition",
        }
    }
}

/// Cues fired for an event, in play order
pub fn cues_for(event: &GameEvent) -> &'static [SoundCue] {
    match event {
        GameEvent::HazardHit { .. } => &[SoundCue::Lose, SoundCue::Bomb],
        GameEvent::SafeReveal { .. } | GameEvent::BonusReveal { .. } => &[SoundCue::Click],
        GameEvent::RoundWon { .. } | GameEvent::LevelAdvance { .. } => &[SoundCue::Transition],
        GameEvent::RoundReset { .. } => &[SoundCue::Reset],
    }
}

/// Whatever actually makes noise
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that only logs cues (headless/native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("♪ {}", cue.as_str());
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<S> {
    sink: S,
    muted: bool,
}

impl<S: CueSink> AudioManager<S> {
    pub fn new(sink: S, muted: bool) -> Self {
        Self { sink, muted }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play the cues for one event
    pub fn handle(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }
        log::trace!("{} -> {:?}", event.name(), cues_for(event));
        for &cue in cues_for(event) {
            self.sink.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_hazard_plays_lose_then_bomb() {
        let mut audio = AudioManager::new(Recorder::default(), false);
        audio.handle(&GameEvent::HazardHit { score: 0 });
        assert_eq!(audio.sink().0, vec![SoundCue::Lose, SoundCue::Bomb]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default(), true);
        audio.handle(&GameEvent::SafeReveal { points: 5 });
        assert!(audio.sink().0.is_empty());

        audio.set_muted(false);
        audio.handle(&GameEvent::RoundReset { level: 1 });
        assert_eq!(audio.sink().0, vec![SoundCue::Reset]);
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(cues_for(&GameEvent::BonusReveal { points: 10 }), &[SoundCue::Click]);
        assert_eq!(SoundCue::Transition.as_str(), "transition");
    }
}
