//! Click resolution
//!
//! The only code path that mutates a [`RoundState`]. Each call either applies
//! one reveal or leaves the state untouched.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::state::{RoundState, RoundStatus, check_index};
use crate::consts::{BONUS_POINTS, SAFE_POINTS};
use crate::error::Result;

/// What a click revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectKind {
    /// Already revealed, or the round is over
    #[default]
    None,
    Safe,
    Bonus,
    Hazard,
}

/// Outcome of a single click, handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub points_awarded: u64,
    /// This reveal completed the round
    pub won: bool,
}

impl Effect {
    pub fn none() -> Self {
        Self::default()
    }

    fn reveal(kind: EffectKind, points_awarded: u64) -> Self {
        Self {
            kind,
            points_awarded,
            won: false,
        }
    }

    /// Nothing changed
    pub fn is_noop(&self) -> bool {
        self.kind == EffectKind::None
    }

    /// The round ended with this click (win or loss)
    pub fn ends_round(&self) -> bool {
        self.won || self.kind == EffectKind::Hazard
    }

    /// Transient "+N" popup text, if the click scored
    pub fn popup_text(&self) -> Option<&'static str> {
        match self.kind {
            EffectKind::Bonus => Some("+10 🎁"),
            EffectKind::Safe => Some("+5 ✅"),
            EffectKind::None | EffectKind::Hazard => None,
        }
    }

    /// Presentation events implied by this effect, in firing order
    pub fn events(&self, score: u64) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(2);
        match self.kind {
            EffectKind::None => {}
            EffectKind::Safe => events.push(GameEvent::SafeReveal {
                points: self.points_awarded,
            }),
            EffectKind::Bonus => events.push(GameEvent::BonusReveal {
                points: self.points_awarded,
            }),
            EffectKind::Hazard => events.push(GameEvent::HazardHit { score }),
        }
        if self.won {
            events.push(GameEvent::RoundWon { score });
        }
        events
    }
}

/// Resolve a click on box `index`.
///
/// Out-of-range indices are rejected without touching the state. Clicking a
/// revealed box or clicking after the round ended is a no-op.
pub fn resolve_click(state: &mut RoundState, index: usize) -> Result<Effect> {
    check_index(index, state.config.total_cells())?;

    if state.status.is_terminal() || state.revealed.contains(&index) {
        return Ok(Effect::none());
    }

    state.revealed.insert(index);

    if state.config.is_hazard(index) {
        state.status = RoundStatus::Lost;
        log::debug!("Box {} was the bomb, final score {}", index, state.score);
        return Ok(Effect::reveal(EffectKind::Hazard, 0));
    }

    let (kind, points) = if state.config.is_bonus(index) {
        (EffectKind::Bonus, BONUS_POINTS)
    } else {
        (EffectKind::Safe, SAFE_POINTS)
    };
    state.score += points;

    let mut effect = Effect::reveal(kind, points);
    if state.revealed.len() == state.config.safe_cell_count() {
        state.status = RoundStatus::Won;
        effect.won = true;
    }

    log::debug!(
        "Box {} -> {:?} (+{}), score {}, status {}",
        index,
        kind,
        points,
        state.score,
        state.status.as_str()
    );
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::sim::state::RoundConfig;
    use proptest::prelude::*;

    fn scenario_state() -> RoundState {
        RoundState::new(RoundConfig::new(3, 4, [2]).unwrap())
    }

    #[test]
    fn test_full_clear_wins_with_expected_score() {
        let mut state = scenario_state();
        let clicks = [0, 1, 2, 3, 5, 6, 7, 8];

        for (n, &index) in clicks.iter().enumerate() {
            let effect = resolve_click(&mut state, index).unwrap();
            if index == 2 {
                assert_eq!(effect.kind, EffectKind::Bonus);
                assert_eq!(effect.points_awarded, 10);
                assert_eq!(state.score(), 10);
            } else {
                assert_eq!(effect.kind, EffectKind::Safe);
                assert_eq!(effect.points_awarded, 5);
            }
            let last = n == clicks.len() - 1;
            assert_eq!(effect.won, last);
            assert_eq!(effect.ends_round(), last);
        }

        assert_eq!(state.revealed().len(), 8);
        assert_eq!(state.status(), RoundStatus::Won);
        assert_eq!(state.score(), 45);
        assert_eq!(state.remaining_safe(), 0);
    }

    #[test]
    fn test_hazard_loses_without_scoring() {
        let mut state = scenario_state();
        let first = resolve_click(&mut state, 0).unwrap();
        assert_eq!(first.kind, EffectKind::Safe);
        let score_before = state.score();
        assert_eq!(score_before, 5);

        let effect = resolve_click(&mut state, 4).unwrap();
        assert_eq!(effect.kind, EffectKind::Hazard);
        assert_eq!(effect.points_awarded, 0);
        assert!(effect.ends_round());
        assert_eq!(state.status(), RoundStatus::Lost);
        assert_eq!(state.score(), score_before);
        assert!(state.is_revealed(4));
    }

    #[test]
    fn test_hazard_first_click_keeps_zero_score() {
        let mut state = scenario_state();
        let effect = resolve_click(&mut state, 4).unwrap();
        assert_eq!(effect.kind, EffectKind::Hazard);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_repeat_click_is_noop() {
        let mut state = scenario_state();
        resolve_click(&mut state, 3).unwrap();
        let before = state.clone();

        let effect = resolve_click(&mut state, 3).unwrap();
        assert!(effect.is_noop());
        assert_eq!(effect, Effect::none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_clicks_after_loss_are_ignored() {
        let mut state = scenario_state();
        resolve_click(&mut state, 4).unwrap();
        let frozen = state.clone();

        for index in [0, 1, 2] {
            let effect = resolve_click(&mut state, index).unwrap();
            assert!(effect.is_noop());
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_out_of_range_click_is_rejected() {
        let mut state = scenario_state();
        let before = state.clone();
        assert_eq!(
            resolve_click(&mut state, 9),
            Err(GameError::InvalidIndex {
                index: 9,
                total_cells: 9
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_single_cell_round_is_unwinnable() {
        let mut state = RoundState::new(RoundConfig::new(1, 0, [0]).unwrap());
        let effect = resolve_click(&mut state, 0).unwrap();
        assert_eq!(effect.kind, EffectKind::Hazard);
        assert!(!effect.won);
        assert_eq!(state.status(), RoundStatus::Lost);
    }

    #[test]
    fn test_effect_events_and_popup() {
        let bonus = Effect::reveal(EffectKind::Bonus, 10);
        assert_eq!(bonus.popup_text(), Some("+10 🎁"));
        assert_eq!(bonus.events(10), vec![GameEvent::BonusReveal { points: 10 }]);

        let mut winning = Effect::reveal(EffectKind::Safe, 5);
        winning.won = true;
        assert_eq!(
            winning.events(45),
            vec![
                GameEvent::SafeReveal { points: 5 },
                GameEvent::RoundWon { score: 45 }
            ]
        );

        let hazard = Effect::reveal(EffectKind::Hazard, 0);
        assert_eq!(hazard.popup_text(), None);
        assert_eq!(hazard.events(15), vec![GameEvent::HazardHit { score: 15 }]);
        assert!(Effect::none().events(0).is_empty());
    }

    proptest! {
        /// Revealed only grows, score never drops, and the status leaves
        /// InProgress at most once.
        #[test]
        fn prop_round_invariants(
            grid_size in 1u32..6,
            hazard_seed in any::<usize>(),
            bonus_seeds in proptest::collection::vec(any::<usize>(), 0..3),
            clicks in proptest::collection::vec(0usize..40, 0..60),
        ) {
            let total = (grid_size * grid_size) as usize;
            let config = RoundConfig::new(
                grid_size,
                hazard_seed % total,
                bonus_seeds.iter().map(|b| b % total),
            ).unwrap();
            let hazard = config.hazard_index();
            let mut state = RoundState::new(config);
            let mut terminal_transitions = 0;

            for index in clicks {
                let before = state.clone();
                let result = resolve_click(&mut state, index);

                if index >= total {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(&state, &before);
                    continue;
                }
                let effect = result.unwrap();

                prop_assert!(state.revealed().len() >= before.revealed().len());
                prop_assert!(state.revealed().is_superset(before.revealed()));
                prop_assert!(state.score() >= before.score());
                prop_assert_eq!(state.score() - before.score(), effect.points_awarded);

                if before.status().is_terminal() {
                    prop_assert!(effect.is_noop());
                    prop_assert_eq!(&state, &before);
                }
                if before.status() != state.status() {
                    terminal_transitions += 1;
                    prop_assert_eq!(before.status(), RoundStatus::InProgress);
                }

                // Status agrees with what has been revealed
                prop_assert_eq!(
                    state.is_revealed(hazard),
                    state.status() == RoundStatus::Lost
                );
                prop_assert_eq!(
                    state.status() == RoundStatus::Won,
                    !state.is_revealed(hazard) && state.revealed().len() == total - 1
                );
            }
            prop_assert!(terminal_transitions <= 1);
        }
    }
}
