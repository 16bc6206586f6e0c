use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Inbound commands from the rendering layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TileFlippedHit(Coord2),
    TileFlippedNoHit(Coord2),
    /// Flip where the core itself decides hit or no-hit.
    Flip(Coord2),
    DismissNotification,
    Reset,
}

/// Owns the catalog, the random source and the current [`GameSession`], and starts new games.
#[derive(Clone, Debug)]
pub struct Game {
    catalog: Catalog,
    config: GameConfig,
    rng: SmallRng,
    session: GameSession,
}

impl Game {
    pub fn new(catalog: Catalog, config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let session = new_session(&catalog, &config, &mut rng)?;
        Ok(Self {
            catalog,
            config,
            rng,
            session,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// Starts a new game: new recipe, new decoys, new board, back to the start prompt.
    ///
    /// On failure the current session is left untouched.
    pub fn reset(&mut self) -> Result<()> {
        self.session = new_session(&self.catalog, &self.config, &mut self.rng)?;
        Ok(())
    }

    /// Dismisses the pending notification and runs its continuation.
    ///
    /// When the continuation fails the notification stays pending.
    pub fn dismiss_notification(&mut self) -> Result<Option<Continuation>> {
        let continuation = self.session.notification().and_then(|n| n.on_dismiss);
        match continuation {
            Some(Continuation::StartPlaying) => {
                self.session.start()?;
                self.session.dismiss_notification();
            }
            // The new session brings its own start prompt.
            Some(Continuation::PlayAgain) => self.reset()?,
            None => {
                self.session.dismiss_notification();
            }
        }
        Ok(continuation)
    }

    pub fn on_tile_flipped_hit(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        self.session.on_tile_flipped_hit(coords)
    }

    pub fn on_tile_flipped_no_hit(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        self.session.on_tile_flipped_no_hit(coords)
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        self.session.flip(coords)
    }

    pub fn handle(&mut self, command: Command) -> Result<FlipOutcome> {
        log::trace!("Handling {:?}", command);
        match command {
            Command::TileFlippedHit(coords) => self.on_tile_flipped_hit(coords),
            Command::TileFlippedNoHit(coords) => self.on_tile_flipped_no_hit(coords),
            Command::Flip(coords) => self.flip(coords),
            Command::DismissNotification => {
                self.dismiss_notification()?;
                Ok(FlipOutcome::NoChange)
            }
            Command::Reset => {
                self.reset()?;
                Ok(FlipOutcome::NoChange)
            }
        }
    }
}

/// Rolls a recipe and decoys and lays them out, re-rolling the food set when it does not fit.
fn new_session<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameSession> {
    let mut last_error = GameError::BoardGenerationFailed { attempts: 0 };
    for round in 0..=config.max_reselections {
        let selection = select_recipe_and_decoys(catalog, config.slot_count, rng)?;
        let placed: Vec<FoodId> = selection.placed().collect();
        let foods = catalog.resolve(&placed)?;

        let generator = ScanBoardGenerator::new(rng.random(), config.max_attempts);
        match generator.generate(config.board_config(), &foods) {
            Ok(board) => {
                log::debug!(
                    "New game: {} on a {}x{} board",
                    selection.recipe.name,
                    config.board_size,
                    config.board_size
                );
                return GameSession::new(catalog, selection, board, config.rules());
            }
            Err(err @ GameError::BoardGenerationFailed { .. }) => {
                log::warn!(
                    "Foods for {:?} did not fit (round {}), choosing again",
                    selection.recipe.name,
                    round
                );
                last_error = err;
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_error)
}
