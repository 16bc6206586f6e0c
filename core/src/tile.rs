use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Unflipped,
    Flipped,
}

impl TileState {
    pub const fn is_flipped(self) -> bool {
        matches!(self, Self::Flipped)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Unflipped
    }
}

/// Read-only view of one cell handed to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub coords: Coord2,
    pub food: Option<FoodId>,
    pub state: TileState,
}

impl Tile {
    pub const fn x(&self) -> Coord {
        self.coords.0
    }

    pub const fn y(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_hit(&self) -> bool {
        self.food.is_some()
    }
}
