// Configuration module for reading Cycles.toml
// This module provides OOP-style configuration management for the cycles agent

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub history: HistoryConfig,
    pub scoring: ScoringConfig,
    pub debug: DebugConfig,
}

/// Identity of the agent on the board
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    /// Display name matched against the players listed in each snapshot
    pub name: String,
    pub author: String,
    pub color: String,
}

/// Move history constants
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    pub length: usize,
}

/// All evaluation and scoring constants
///
/// Every penalty is a truncating integer division, applied in the order the
/// fields appear here.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    // Trap avoidance
    pub min_reachable_space: usize,
    pub area_weight: usize,

    // Neighborhood risk
    pub adjacent_wall_threshold: usize,
    pub adjacent_wall_divisor: usize,
    pub player_wall_divisor: usize,
    pub diagonal_wall_threshold: usize,
    pub diagonal_wall_divisor: usize,

    // History penalties
    pub reversal_divisor: usize,
    pub repetition_weight: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            min_reachable_space: 15,
            area_weight: 2,
            adjacent_wall_threshold: 2,
            adjacent_wall_divisor: 3,
            player_wall_divisor: 4,
            diagonal_wall_threshold: 2,
            diagonal_wall_divisor: 2,
            reversal_divisor: 8,
            repetition_weight: 5,
        }
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Cycles.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Cycles.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Cycles.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Cycles.toml
    pub fn default_hardcoded() -> Self {
        Config {
            agent: AgentConfig {
                name: "flood-runner".to_string(),
                author: "cycles-bot".to_string(),
                color: "#00DEAD".to_string(),
            },
            history: HistoryConfig { length: 4 },
            scoring: ScoringConfig::default(),
            debug: DebugConfig {
                enabled: false,
                log_file_path: "cycles_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Cycles.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.history.length, 4);
        assert_eq!(config.scoring.min_reachable_space, 15);
        assert_eq!(config.scoring.area_weight, 2);
    }

    #[test]
    fn test_cycles_toml_can_be_parsed() {
        let result = Config::from_file("Cycles.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Cycles.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config =
            Config::from_file("Cycles.toml").expect("Cycles.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.agent.name, hardcoded_config.agent.name);
        assert_eq!(file_config.history.length, hardcoded_config.history.length);
        assert_eq!(file_config.scoring, hardcoded_config.scoring);
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result = Config::from_toml_str(
            r##"
            [agent]
            name = "a"
            author = "b"
            color = "#000000"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.scoring.reversal_divisor, 8);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
