use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Default cap on whole-board attempts before generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Generation strategy that places foods one after another, each at the first free position of a
/// wrapping scan that starts at a random offset. When a food does not fit anywhere the whole board
/// is thrown away and the attempt starts over, up to `max_attempts` times.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanBoardGenerator {
    seed: u64,
    max_attempts: u32,
}

impl ScanBoardGenerator {
    pub fn new(seed: u64, max_attempts: u32) -> Self {
        Self { seed, max_attempts }
    }
}

impl BoardGenerator for ScanBoardGenerator {
    fn generate(self, config: BoardConfig, foods: &[&Food]) -> Result<Board> {
        let config = config.validate()?;
        if let Some(food) = foods
            .iter()
            .find(|food| food.shape.footprint() != config.footprint)
        {
            return Err(GameError::FootprintMismatch {
                food: food.key.clone(),
                footprint: config.footprint,
            });
        }

        let span = config.span();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for attempt in 1..=self.max_attempts {
            let mut grid = empty_grid(config.size);
            let placements: Option<Vec<Placement>> = foods
                .iter()
                .map(|food| place_food(&mut grid, food, span, &mut rng))
                .collect();

            match placements {
                Some(placements) => {
                    log::debug!(
                        "Placed {} foods on a {}x{} board after {} attempts",
                        placements.len(),
                        config.size,
                        config.size,
                        attempt
                    );
                    return Ok(Board::new(grid, placements, attempt));
                }
                None => log::trace!("Board attempt {} failed, starting over", attempt),
            }
        }

        log::warn!(
            "Gave up placing {} foods after {} attempts",
            foods.len(),
            self.max_attempts
        );
        Err(GameError::BoardGenerationFailed {
            attempts: self.max_attempts,
        })
    }
}

/// Scans every top-left position once, starting at a random one and wrapping around.
fn place_food<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    food: &Food,
    span: Coord,
    rng: &mut R,
) -> Option<Placement> {
    let start = (rng.random_range(0..span), rng.random_range(0..span));
    let origin = iter_square(span)
        .map(|delta| wrap_offset(start, delta, span))
        .find(|&origin| shape_fits(grid, &food.shape, origin))?;
    Some(stamp(grid, food, origin))
}
