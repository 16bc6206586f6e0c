use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Default number of tiles along each side of the board.
pub const DEFAULT_BOARD_SIZE: Coord = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub footprint: Coord,
}

impl BoardConfig {
    pub const fn new(size: Coord, footprint: Coord) -> Self {
        Self { size, footprint }
    }

    /// Checks that at least one top-left position exists for a shape.
    pub fn validate(self) -> Result<Self> {
        if self.footprint == 0 || self.size <= self.footprint {
            return Err(GameError::BoardTooSmall {
                size: self.size,
                footprint: self.footprint,
            });
        }
        Ok(self)
    }

    /// Number of candidate top-left positions along each axis.
    pub const fn span(&self) -> Coord {
        self.size.saturating_sub(self.footprint)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, DEFAULT_FOOTPRINT)
    }
}

/// Where a food's shape landed, in tile units from the board's top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub food: FoodId,
    pub origin: Coord2,
}

impl Placement {
    /// Offset of the food overlay graphic in pixels.
    pub fn pixel_origin(&self, tile_size: u16) -> (u32, u32) {
        let tile_size = u32::from(tile_size);
        (
            u32::from(self.origin.0) * tile_size,
            u32::from(self.origin.1) * tile_size,
        )
    }
}

pub(crate) type OccupancyGrid = Array2<Option<FoodId>>;

pub(crate) fn empty_grid(size: Coord) -> OccupancyGrid {
    Array2::from_elem((size, size).to_nd_index(), None)
}

/// Whether every occupied cell of `shape` at `origin` is inside the grid and unassigned.
pub(crate) fn shape_fits(grid: &OccupancyGrid, shape: &ShapeMask, origin: Coord2) -> bool {
    shape.iter_occupied().all(|(x, y)| {
        let cell = (
            usize::from(origin.0) + usize::from(x),
            usize::from(origin.1) + usize::from(y),
        );
        matches!(grid.get(cell), Some(None))
    })
}

/// Assigns the cells of `food` at `origin`. Callers check [`shape_fits`] first.
pub(crate) fn stamp(grid: &mut OccupancyGrid, food: &Food, origin: Coord2) -> Placement {
    for (x, y) in food.shape.iter_occupied() {
        grid[(origin.0 + x, origin.1 + y).to_nd_index()] = Some(food.id);
    }
    Placement {
        food: food.id,
        origin,
    }
}

/// Final layout of one game: which food owns each cell, and where each food was placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: OccupancyGrid,
    placements: Vec<Placement>,
    attempts: u32,
}

impl Board {
    pub(crate) fn new(grid: OccupancyGrid, placements: Vec<Placement>, attempts: u32) -> Self {
        Self {
            grid,
            placements,
            attempts,
        }
    }

    /// Builds a board from known placements, rejecting overlaps and out-of-range shapes.
    pub fn from_placements(size: Coord, foods: &[&Food], placements: &[Placement]) -> Result<Self> {
        let mut grid = empty_grid(size);
        for placement in placements {
            let food = foods
                .iter()
                .find(|food| food.id == placement.food)
                .ok_or_else(|| {
                    GameError::UnknownFood(alloc::format!("#{}", placement.food.0))
                })?;
            for (x, y) in food.shape.iter_occupied() {
                let cell = (
                    usize::from(placement.origin.0) + usize::from(x),
                    usize::from(placement.origin.1) + usize::from(y),
                );
                match grid.get(cell) {
                    None => return Err(GameError::InvalidCoords),
                    Some(Some(_)) => {
                        return Err(GameError::OverlappingPlacement {
                            food: placement.food.0,
                            coords: (cell.0 as Coord, cell.1 as Coord),
                        });
                    }
                    Some(None) => {}
                }
            }
            stamp(&mut grid, food, placement.origin);
        }
        Ok(Self::new(grid, placements.to_vec(), 1))
    }

    pub fn size(&self) -> Coord {
        self.grid.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn food_at(&self, coords: Coord2) -> Option<FoodId> {
        self.grid.get(coords.to_nd_index()).copied().flatten()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_of(&self, food: FoodId) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.food == food)
    }

    /// Number of whole-board attempts the generator needed.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Option<FoodId>)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((x, y), &food)| ((x as Coord, y as Coord), food))
    }

    /// Cells owned by `food`.
    pub fn tiles_of(&self, food: FoodId) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(move |&(_, owner)| owner == Some(food))
            .map(|(coords, _)| coords)
    }

    pub fn tile_count_of(&self, food: FoodId) -> CellCount {
        self.tiles_of(food).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Option<FoodId>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}
