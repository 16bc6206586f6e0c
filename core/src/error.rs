use alloc::string::String;
use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board of size {size} cannot hold a {footprint}x{footprint} footprint")]
    BoardTooSmall { size: u8, footprint: u8 },
    #[error("Shape of {food} does not match the {footprint}x{footprint} footprint")]
    FootprintMismatch { food: String, footprint: u8 },
    #[error("Placement of food #{food} overlaps another food at {coords:?}")]
    OverlappingPlacement { food: u16, coords: Coord2 },
    #[error("Could not place every food after {attempts} attempts")]
    BoardGenerationFailed { attempts: u32 },
    #[error("Catalog has no recipes")]
    EmptyCatalog,
    #[error("Unknown food {0:?}")]
    UnknownFood(String),
    #[error("Food {0:?} is defined more than once")]
    DuplicateFood(String),
    #[error("Recipe {recipe:?} lists {food:?} more than once")]
    DuplicateIngredient { recipe: String, food: String },
    #[error("Shape of {0:?} is malformed")]
    InvalidShape(String),
    #[error("Catalog data is malformed: {0}")]
    MalformedCatalog(String),
    #[error("Configuration is malformed: {0}")]
    MalformedConfig(String),
    #[error("Game is not being played, no flips are accepted")]
    NotPlaying,
    #[error("Game has already started")]
    NotInitializing,
    #[error("Board does not hold exactly the selected foods")]
    SelectionMismatch,
    #[error("Reported flip at {0:?} does not match the board")]
    MismatchedFlip(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
