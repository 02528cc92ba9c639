//! Center Rush headless demo
//!
//! Runs an AI-vs-AI match at the fixed simulation rate and prints the
//! result. Useful for eyeballing balance changes and for smoke-testing
//! the simulation without a frontend.

use center_rush::ai::AiController;
use center_rush::consts::SIM_DT;
use center_rush::sim::{GameState, MatchPhase, PickupRegistry, TickInput, tick};
use center_rush::GameConfig;

/// Hard stop for a stalled match, in simulated seconds
const MAX_SIM_SECONDS: f64 = 600.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let config = GameConfig::load_or_default("game_config.json");
    let registry = PickupRegistry::with_builtin_kinds();

    log::info!("starting match with seed {seed}");
    let mut state = GameState::new(seed, 0.0, &config, &registry);
    let controllers = [AiController::new(0), AiController::new(1)];

    let mut now = 0.0;
    let mut last_phase = state.match_state.phase;
    while state.match_state.phase != MatchPhase::MatchOver && now < MAX_SIM_SECONDS {
        let input = TickInput {
            players: [
                controllers[0].decide(&state, &config),
                controllers[1].decide(&state, &config),
            ],
            // Demo auto-confirms finished rounds
            confirm: state.match_state.phase == MatchPhase::RoundOver,
        };
        tick(&mut state, &input, SIM_DT, now, &config, &registry);

        if state.match_state.phase != last_phase {
            report_phase(&state, now);
            last_phase = state.match_state.phase;
        }
        now += SIM_DT as f64;
    }

    let wins = state.match_state.round_wins;
    match state.match_state.match_winner {
        Some(winner) => println!(
            "Player {} wins the match {}-{} after {:.1}s",
            winner + 1,
            wins[winner],
            wins[1 - winner],
            now
        ),
        None => println!("Match abandoned after {now:.0}s at {}-{}", wins[0], wins[1]),
    }
}

fn report_phase(state: &GameState, now: f64) {
    match state.match_state.phase {
        MatchPhase::Countdown => {
            log::info!("[{now:7.2}s] round {} countdown", state.match_state.current_round)
        }
        MatchPhase::Playing => {
            log::info!("[{now:7.2}s] round {} live", state.match_state.current_round)
        }
        MatchPhase::RoundOver => {
            let winner = state.match_state.round_winner.map(|w| w + 1).unwrap_or(0);
            let wins = state.match_state.round_wins;
            log::info!(
                "[{now:7.2}s] round {} to player {winner} ({}-{})",
                state.match_state.current_round,
                wins[0],
                wins[1]
            );
        }
        MatchPhase::MatchOver => {}
    }
}
