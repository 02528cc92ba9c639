//! Game state and the match/round state machine
//!
//! `Countdown -> Playing -> RoundOver -> (Countdown | MatchOver)`.
//! MatchOver is terminal; a fresh match needs an explicit reset.
//! Malformed transition calls are silent no-ops.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pickups::{Pickup, PickupRegistry, generate_pickups};
use super::player::{Player, Side};
use super::walls::{Wall, generate_walls};
use crate::config::GameConfig;

/// Phase of the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Pre-round countdown; simulation is frozen
    Countdown,
    /// Active round
    Playing,
    /// A round just ended, waiting for confirmation
    RoundOver,
    /// Match decided; terminal until an external reset
    MatchOver,
}

/// Round/match bookkeeping
#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// Round wins per player index
    pub round_wins: [u32; 2],
    /// 1-based round counter
    pub current_round: u32,
    /// Winner index of each finished round, in order
    pub round_history: Vec<usize>,
    /// Winner of the last finished round
    pub round_winner: Option<usize>,
    /// Winner of the match, set with MatchOver
    pub match_winner: Option<usize>,
    countdown_end: f64,
}

impl MatchState {
    pub fn new(now: f64, config: &GameConfig) -> Self {
        Self {
            phase: MatchPhase::Countdown,
            round_wins: [0, 0],
            current_round: 1,
            round_history: Vec::new(),
            round_winner: None,
            match_winner: None,
            countdown_end: now + config.countdown_duration as f64,
        }
    }

    /// Seconds left on the countdown (0 outside the Countdown phase)
    pub fn countdown_remaining(&self, now: f64) -> f32 {
        if self.phase != MatchPhase::Countdown {
            return 0.0;
        }
        (self.countdown_end - now).max(0.0) as f32
    }

    /// Countdown display step: Some(3), Some(2), Some(1), then Some(0) for
    /// "GO" in the last quarter. None outside the Countdown phase.
    pub fn countdown_step(&self, now: f64, config: &GameConfig) -> Option<u32> {
        if self.phase != MatchPhase::Countdown {
            return None;
        }
        let quarter = config.countdown_duration / 4.0;
        let remaining = self.countdown_remaining(now);
        let step = (remaining / quarter).ceil() as u32;
        Some(step.saturating_sub(1).min(3))
    }

    /// Advance the countdown; returns true on the tick it expires
    pub(crate) fn tick_countdown(&mut self, now: f64) -> bool {
        if self.phase == MatchPhase::Countdown && now >= self.countdown_end {
            self.phase = MatchPhase::Playing;
            return true;
        }
        false
    }

    /// Record a round win and decide whether the match is over
    pub(crate) fn record_round_win(&mut self, winner: usize, config: &GameConfig) {
        if self.phase != MatchPhase::Playing {
            return;
        }
        self.round_wins[winner] += 1;
        self.round_history.push(winner);
        self.round_winner = Some(winner);

        if self.round_wins[winner] >= config.rounds_to_win {
            self.phase = MatchPhase::MatchOver;
            self.match_winner = Some(winner);
            log::info!(
                "match over: player {} wins {}-{}",
                winner + 1,
                self.round_wins[winner],
                self.round_wins[1 - winner]
            );
        } else {
            self.phase = MatchPhase::RoundOver;
            log::info!(
                "round {} to player {} ({}-{})",
                self.current_round,
                winner + 1,
                self.round_wins[0],
                self.round_wins[1]
            );
        }
    }

    /// Move from RoundOver into the next round's countdown. No-op in any
    /// other phase (including MatchOver).
    pub(crate) fn advance_round(&mut self, now: f64, config: &GameConfig) {
        if self.phase != MatchPhase::RoundOver {
            return;
        }
        self.current_round += 1;
        self.phase = MatchPhase::Countdown;
        self.countdown_end = now + config.countdown_duration as f64;
    }
}

/// Complete simulation state for one match
pub struct GameState {
    /// Match seed; all generation derives from it
    pub seed: u64,
    pub players: [Player; 2],
    pub walls: Vec<Wall>,
    pub pickups: Vec<Pickup>,
    pub match_state: MatchState,
}

impl GameState {
    /// Start a match: players at their spawns, round 1 layout generated,
    /// countdown running
    pub fn new(seed: u64, now: f64, config: &GameConfig, registry: &PickupRegistry) -> Self {
        let mut state = Self {
            seed,
            players: [
                Player::new(Side::Left, config),
                Player::new(Side::Right, config),
            ],
            walls: Vec::new(),
            pickups: Vec::new(),
            match_state: MatchState::new(now, config),
        };
        state.regenerate_round(config, registry);
        state
    }

    /// Deterministic per-round RNG: same seed and round, same layout
    fn round_rng(&self) -> Pcg32 {
        let round = self.match_state.current_round as u64;
        Pcg32::seed_from_u64(self.seed ^ round.wrapping_mul(2654435761))
    }

    /// Rebuild all per-round transient state: spawns, projectiles, and a
    /// freshly generated wall/pickup layout
    pub(crate) fn regenerate_round(&mut self, config: &GameConfig, registry: &PickupRegistry) {
        for player in &mut self.players {
            player.reset(config);
        }
        let mut rng = self.round_rng();
        self.walls = generate_walls(&mut rng, config);
        self.pickups = generate_pickups(&mut rng, &self.walls, config, registry);
        log::debug!(
            "round {}: {} walls, {} pickups",
            self.match_state.current_round,
            self.walls.len(),
            self.pickups.len()
        );
    }

    /// Discard everything and start a new match with the same seed
    pub fn reset_match(&mut self, now: f64, config: &GameConfig, registry: &PickupRegistry) {
        self.match_state = MatchState::new(now, config);
        self.regenerate_round(config, registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_match_starts_in_countdown() {
        let config = config();
        let registry = PickupRegistry::with_builtin_kinds();
        let state = GameState::new(7, 0.0, &config, &registry);
        assert_eq!(state.match_state.phase, MatchPhase::Countdown);
        assert_eq!(state.match_state.current_round, 1);
        assert_eq!(state.walls.len(), 6);
        assert_eq!(state.pickups.len(), 10);
        assert_eq!(state.players[0].pos, Side::Left.spawn(&config));
        assert_eq!(state.players[1].pos, Side::Right.spawn(&config));
    }

    #[test]
    fn test_countdown_expiry() {
        let config = config();
        let mut match_state = MatchState::new(0.0, &config);
        assert!(!match_state.tick_countdown(1.0));
        assert_eq!(match_state.phase, MatchPhase::Countdown);
        assert!((match_state.countdown_remaining(1.0) - 1.0).abs() < 1e-6);
        assert!(match_state.tick_countdown(2.0));
        assert_eq!(match_state.phase, MatchPhase::Playing);
        assert_eq!(match_state.countdown_remaining(2.0), 0.0);
    }

    #[test]
    fn test_countdown_steps() {
        // Duration 2.0: quarters of 0.5s stepping 3, 2, 1, GO(0)
        let config = config();
        let match_state = MatchState::new(0.0, &config);
        assert_eq!(match_state.countdown_step(0.1, &config), Some(3));
        assert_eq!(match_state.countdown_step(0.6, &config), Some(2));
        assert_eq!(match_state.countdown_step(1.1, &config), Some(1));
        assert_eq!(match_state.countdown_step(1.6, &config), Some(0));
    }

    #[test]
    fn test_round_win_then_next_round() {
        let config = config();
        let mut match_state = MatchState::new(0.0, &config);
        match_state.tick_countdown(3.0);
        match_state.record_round_win(0, &config);
        assert_eq!(match_state.phase, MatchPhase::RoundOver);
        assert_eq!(match_state.round_wins, [1, 0]);
        assert_eq!(match_state.round_history, vec![0]);
        match_state.advance_round(5.0, &config);
        assert_eq!(match_state.phase, MatchPhase::Countdown);
        assert_eq!(match_state.current_round, 2);
    }

    #[test]
    fn test_match_over_at_threshold() {
        let config = config();
        let mut match_state = MatchState::new(0.0, &config);
        for round in 0..config.rounds_to_win {
            match_state.tick_countdown(100.0 + round as f64);
            match_state.record_round_win(1, &config);
            match_state.advance_round(100.5 + round as f64, &config);
        }
        assert_eq!(match_state.phase, MatchPhase::MatchOver);
        assert_eq!(match_state.match_winner, Some(1));
        assert_eq!(match_state.round_wins, [0, 3]);
        // Terminal: further transitions are no-ops
        match_state.advance_round(200.0, &config);
        assert_eq!(match_state.phase, MatchPhase::MatchOver);
        match_state.record_round_win(0, &config);
        assert_eq!(match_state.round_wins, [0, 3]);
    }

    #[test]
    fn test_round_layouts_are_seeded() {
        let config = config();
        let registry = PickupRegistry::with_builtin_kinds();
        let a = GameState::new(42, 0.0, &config, &registry);
        let b = GameState::new(42, 0.0, &config, &registry);
        for (wa, wb) in a.walls.iter().zip(&b.walls) {
            assert_eq!(wa.pos, wb.pos);
        }
        for (pa, pb) in a.pickups.iter().zip(&b.pickups) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.kind, pb.kind);
        }

        let c = GameState::new(43, 0.0, &config, &registry);
        let all_equal = a.walls.iter().zip(&c.walls).all(|(x, y)| x.pos == y.pos);
        assert!(!all_equal);
    }

    #[test]
    fn test_new_round_regenerates_layout() {
        let config = config();
        let registry = PickupRegistry::with_builtin_kinds();
        let mut state = GameState::new(42, 0.0, &config, &registry);
        let round1_walls: Vec<_> = state.walls.iter().map(|w| w.pos).collect();

        state.match_state.phase = MatchPhase::Playing;
        state.match_state.record_round_win(0, &config);
        state.match_state.advance_round(10.0, &config);
        state.regenerate_round(&config, &registry);

        let round2_walls: Vec<_> = state.walls.iter().map(|w| w.pos).collect();
        assert_eq!(round1_walls.len(), round2_walls.len());
        assert_ne!(round1_walls, round2_walls);
        assert_eq!(state.pickups.len(), 10);
    }
}
