// Cycles agent with an OOP-style API mirroring the channel endpoints
//
// The Bot owns the only DecisionEngine, and with it the move history. Ticks
// are serialised through a mutex so evaluation and I/O strictly alternate.

use log::info;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::DecisionEngine;
use crate::error::EngineError;
use crate::types::{Direction, GameState};

/// Light-cycles agent
/// Takes static configuration and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    engine: Mutex<DecisionEngine>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot with decision logging disabled
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    /// Creates a new Bot that records every decision through `debug_logger`
    pub fn with_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let engine = DecisionEngine::new(config.scoring.clone(), config.history.length);
        Bot {
            config,
            engine: Mutex::new(engine),
            debug_logger,
        }
    }

    /// Current move history, oldest first
    pub fn history(&self) -> Vec<Direction> {
        self.engine.lock().history().to_vec()
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "name": self.config.agent.name,
            "author": self.config.agent.author,
            "color": self.config.agent.color,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!(
            "GAME START {} ({}x{}, {} players)",
            state.game_id,
            state.board.width,
            state.board.height,
            state.board.players.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("GAME OVER {} at tick {}", state.game_id, state.tick);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `state` - The tick's game state
    ///
    /// # Returns
    /// * `Result<Value, EngineError>` - JSON response containing the chosen
    ///   direction, or the reason the tick could not be evaluated
    pub async fn get_move(&self, state: &GameState) -> Result<Value, EngineError> {
        let start_time = Instant::now();

        info!("Tick {}: Computing move", state.tick);

        let (decision, prior_history) = {
            let mut engine = self.engine.lock();
            let prior_history = engine.history().to_vec();
            let decision = engine.decide(&state.board, &self.config.agent.name)?;
            (decision, prior_history)
        };

        self.debug_logger.log_move(
            state.tick,
            &self.config.agent.name,
            prior_history,
            state.board.clone(),
            decision.direction,
        );

        info!(
            "Tick {}: Chose {} ({:?}, time: {}us)",
            state.tick,
            decision.direction,
            decision.outcome,
            start_time.elapsed().as_micros()
        );

        Ok(json!({ "move": decision.direction.as_str() }))
    }
}
