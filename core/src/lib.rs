#![no_std]

extern crate alloc;

use alloc::string::ToString;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use catalog::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use generator::*;
pub use selection::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod catalog;
mod error;
mod event;
mod game;
mod generator;
mod selection;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: Coord,
    pub footprint: Coord,
    /// Edge of one tile in pixels, used for overlay positions.
    pub tile_size: u16,
    /// Foods on the board, recipe ingredients included.
    pub slot_count: u8,
    pub starting_coins: Coins,
    pub hit_reward: Coins,
    pub miss_penalty: Coins,
    pub max_attempts: u32,
    /// How many times a food set that does not fit is swapped for a new one.
    pub max_reselections: u32,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| GameError::MalformedConfig(err.to_string()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        self.board_config().validate()?;
        if self.slot_count == 0 {
            return Err(GameError::MalformedConfig("slot_count must be positive".into()));
        }
        if self.tile_size == 0 {
            return Err(GameError::MalformedConfig("tile_size must be positive".into()));
        }
        Ok(self)
    }

    pub const fn board_config(&self) -> BoardConfig {
        BoardConfig::new(self.board_size, self.footprint)
    }

    pub const fn rules(&self) -> Rules {
        Rules {
            starting_coins: self.starting_coins,
            hit_reward: self.hit_reward,
            miss_penalty: self.miss_penalty,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            footprint: DEFAULT_FOOTPRINT,
            tile_size: 32,
            slot_count: 8,
            starting_coins: rules.starting_coins,
            hit_reward: rules.hit_reward,
            miss_penalty: rules.miss_penalty,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_reselections: 8,
        }
    }
}

/// Outcome of flipping a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    NoChange,
    Hit,
    Miss,
    /// Last tile of a recipe ingredient, more ingredients still hidden.
    FoundIngredient,
    Won,
    Lost,
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default().validate().unwrap();

        assert_eq!(config.board_config().span(), 12);
        assert_eq!(config.rules(), Rules::default());
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "board_size": 24, "starting_coins": 30 }"#).unwrap();

        assert_eq!(config.board_size, 24);
        assert_eq!(config.starting_coins, 30);
        assert_eq!(config.slot_count, 8);
        assert_eq!(config.miss_penalty, 2);
    }

    #[test]
    fn config_from_json_validates() {
        assert_eq!(
            GameConfig::from_json(r#"{ "board_size": 8 }"#),
            Err(GameError::BoardTooSmall {
                size: 8,
                footprint: 8
            })
        );
        assert!(matches!(
            GameConfig::from_json(r#"{ "slot_count": 0 }"#),
            Err(GameError::MalformedConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "board_size": "big" }"#),
            Err(GameError::MalformedConfig(_))
        ));
    }

    #[test]
    fn flip_outcome_updates() {
        assert!(!FlipOutcome::NoChange.has_update());
        assert!(FlipOutcome::Miss.has_update());
        assert!(FlipOutcome::Lost.is_finished());
        assert!(!FlipOutcome::FoundIngredient.is_finished());
    }
}
