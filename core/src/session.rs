use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Initializing,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Initializing
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    WrongIngredient { food: FoodId, name: String },
    OutOfMoney,
}

impl fmt::Display for LoseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongIngredient { name, .. } => write!(f, "{name} is not in your recipe."),
            Self::OutOfMoney => f.write_str("You've run out of money looking for ingredients."),
        }
    }
}

/// Coin economy of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub starting_coins: Coins,
    pub hit_reward: Coins,
    pub miss_penalty: Coins,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_coins: 20,
            hit_reward: 1,
            miss_penalty: 2,
        }
    }
}

/// Discovery progress of one food on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodProgress {
    pub key: String,
    pub name: String,
    pub is_ingredient: bool,
    total_tile_count: CellCount,
    discovered_tiles: Vec<Coord2>,
}

impl FoodProgress {
    pub fn total_tile_count(&self) -> CellCount {
        self.total_tile_count
    }

    pub fn discovered_tiles(&self) -> &[Coord2] {
        &self.discovered_tiles
    }

    pub fn is_revealed(&self) -> bool {
        self.discovered_tiles.len() >= usize::from(self.total_tile_count)
    }
}

/// Everything about one game in progress, from the start prompt to the final win or loss.
///
/// The session only reacts to the commands it is given, and records what changed as
/// [`GameEvent`]s for the renderer to pick up with [`GameSession::drain_events`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    rules: Rules,
    recipe: Recipe,
    decoys: Vec<FoodId>,
    board: Board,
    tiles: Array2<TileState>,
    progress: BTreeMap<FoodId, FoodProgress>,
    coins: Coins,
    found: usize,
    state: GameState,
    lose_reason: Option<LoseReason>,
    notification: Option<Notification>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(catalog: &Catalog, selection: Selection, board: Board, rules: Rules) -> Result<Self> {
        let mut wanted: Vec<FoodId> = selection.placed().collect();
        let mut on_board: Vec<FoodId> = board.placements().iter().map(|p| p.food).collect();
        wanted.sort_unstable();
        on_board.sort_unstable();
        let count = wanted.len();
        wanted.dedup();
        if wanted.len() != count || wanted != on_board {
            return Err(GameError::SelectionMismatch);
        }

        let mut progress = BTreeMap::new();
        for id in selection.placed() {
            let food = catalog
                .food(id)
                .ok_or_else(|| GameError::UnknownFood(alloc::format!("#{}", id.0)))?;
            progress.insert(
                id,
                FoodProgress {
                    key: food.key.clone(),
                    name: food.name.clone(),
                    is_ingredient: selection.recipe.requires(id),
                    total_tile_count: board.tile_count_of(id),
                    discovered_tiles: Vec::new(),
                },
            );
        }

        let size = board.size();
        let notification = Notification::start(rules.starting_coins, &selection.recipe.name);
        Ok(Self {
            rules,
            tiles: Array2::default((size, size).to_nd_index()),
            recipe: selection.recipe,
            decoys: selection.decoys,
            board,
            progress,
            coins: rules.starting_coins,
            found: 0,
            state: GameState::Initializing,
            lose_reason: None,
            notification: Some(notification.clone()),
            events: alloc::vec![
                GameEvent::StateChanged(GameState::Initializing),
                GameEvent::Notify(notification),
            ],
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn coins(&self) -> Coins {
        self.coins
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn remaining_ingredients(&self) -> usize {
        self.recipe.ingredients.len().saturating_sub(self.found)
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn decoys(&self) -> &[FoodId] {
        &self.decoys
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn placements(&self) -> &[Placement] {
        self.board.placements()
    }

    pub fn lose_reason(&self) -> Option<&LoseReason> {
        self.lose_reason.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn progress(&self, food: FoodId) -> Option<&FoodProgress> {
        self.progress.get(&food)
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.board.validate_coords(coords)?;
        Ok(Tile {
            coords,
            food: self.board[coords],
            state: self.tiles[coords.to_nd_index()],
        })
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.board.iter_cells().map(|(coords, food)| Tile {
            coords,
            food,
            state: self.tiles[coords.to_nd_index()],
        })
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Closes the pending notification and hands back its continuation, if any.
    pub fn dismiss_notification(&mut self) -> Option<Continuation> {
        self.notification.take().and_then(|n| n.on_dismiss)
    }

    /// Moves from the start prompt into play.
    pub fn start(&mut self) -> Result<()> {
        if self.state != GameState::Initializing {
            return Err(GameError::NotInitializing);
        }
        self.set_state(GameState::Playing);
        Ok(())
    }

    /// Flips a tile, deciding hit or no-hit from the board itself.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.board[coords].is_some() {
            self.on_tile_flipped_hit(coords)
        } else {
            self.on_tile_flipped_no_hit(coords)
        }
    }

    pub fn on_tile_flipped_hit(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;
        if self.tiles[coords.to_nd_index()].is_flipped() {
            return Ok(FlipOutcome::NoChange);
        }
        let food = self.board[coords].ok_or(GameError::MismatchedFlip(coords))?;
        if !self.progress.contains_key(&food) {
            return Err(GameError::UnknownFood(alloc::format!("#{}", food.0)));
        }

        self.flip_tile(coords);
        self.add_coins(self.rules.hit_reward);

        let progress = self
            .progress
            .get_mut(&food)
            .ok_or_else(|| GameError::UnknownFood(alloc::format!("#{}", food.0)))?;
        progress.discovered_tiles.push(coords);
        if !progress.is_revealed() {
            return Ok(FlipOutcome::Hit);
        }

        let is_ingredient = progress.is_ingredient;
        let bonus = Coins::from(progress.total_tile_count);
        let key = progress.key.clone();
        let name = progress.name.clone();
        self.reveal_food(food);

        if !is_ingredient {
            self.set_coins(0);
            self.end_game(Some(LoseReason::WrongIngredient { food, name }));
            return Ok(FlipOutcome::Lost);
        }

        self.found += 1;
        self.add_coins(bonus);
        if self.found == self.recipe.ingredients.len() {
            self.end_game(None);
            return Ok(FlipOutcome::Won);
        }

        self.notify(Notification::ingredient_found(
            &key,
            &name,
            self.remaining_ingredients(),
        ));
        Ok(FlipOutcome::FoundIngredient)
    }

    pub fn on_tile_flipped_no_hit(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;
        if self.tiles[coords.to_nd_index()].is_flipped() {
            return Ok(FlipOutcome::NoChange);
        }
        if self.board[coords].is_some() {
            return Err(GameError::MismatchedFlip(coords));
        }

        self.flip_tile(coords);

        if self.coins <= self.rules.miss_penalty {
            self.set_coins(0);
            self.end_game(Some(LoseReason::OutOfMoney));
            return Ok(FlipOutcome::Lost);
        }

        self.set_coins(self.coins - self.rules.miss_penalty);
        match self.coins {
            1..3 => self.notify(Notification::almost_out()),
            5..7 => self.notify(Notification::running_low()),
            _ => {}
        }
        Ok(FlipOutcome::Miss)
    }

    fn reveal_food(&mut self, food: FoodId) {
        let tiles: Vec<Coord2> = self.board.tiles_of(food).collect();
        for &coords in &tiles {
            self.tiles[coords.to_nd_index()] = TileState::Flipped;
        }
        self.events.push(GameEvent::FoodRevealed { food, tiles });
    }

    fn flip_tile(&mut self, coords: Coord2) {
        self.tiles[coords.to_nd_index()] = TileState::Flipped;
        self.events.push(GameEvent::TileFlipped(coords));
    }

    fn add_coins(&mut self, amount: Coins) {
        self.set_coins(self.coins.saturating_add(amount));
    }

    fn set_coins(&mut self, coins: Coins) {
        self.coins = coins;
        self.events.push(GameEvent::CoinsChanged(coins));
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification.clone());
        self.events.push(GameEvent::Notify(notification));
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        self.events.push(GameEvent::StateChanged(state));
    }

    fn end_game(&mut self, lose_reason: Option<LoseReason>) {
        if self.state.is_finished() {
            return;
        }

        let notification = match &lose_reason {
            Some(reason) => {
                log::debug!("Game lost: {}", reason);
                self.set_state(GameState::Lost);
                Notification::lost(reason)
            }
            None => {
                log::debug!("Game won with {} coins", self.coins);
                self.set_state(GameState::Won);
                Notification::won(self.coins)
            }
        };
        self.lose_reason = lose_reason;
        self.notify(notification);
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}
