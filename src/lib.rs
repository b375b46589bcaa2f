// Library exports for the cycles agent
// This allows the replay tool and other utilities to use the core decision logic

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod error;
pub mod history;
pub mod reachability;
pub mod replay;
pub mod risk;
pub mod types;
