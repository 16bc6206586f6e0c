use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Recipe chosen for one game plus the decoy foods hidden next to its ingredients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub recipe: Recipe,
    pub decoys: Vec<FoodId>,
}

impl Selection {
    /// Foods to put on the board: ingredients in recipe order, then decoys.
    pub fn placed(&self) -> impl Iterator<Item = FoodId> + '_ {
        self.recipe
            .ingredients
            .iter()
            .chain(self.decoys.iter())
            .copied()
    }

    pub fn placed_count(&self) -> usize {
        self.recipe.ingredients.len() + self.decoys.len()
    }
}

/// Number of decoys that fill `slot_count` slots next to `ingredient_count` ingredients.
pub fn decoy_count(slot_count: u8, ingredient_count: usize) -> usize {
    let slots = usize::from(slot_count);
    if ingredient_count > slots {
        log::warn!(
            "Recipe needs {} ingredients but only {} slots are available, no decoys placed",
            ingredient_count,
            slots
        );
    }
    slots.saturating_sub(ingredient_count)
}

/// Shuffles every food the recipe does not need and keeps as many as there are free slots.
pub fn select_decoys<R: Rng + ?Sized>(
    catalog: &Catalog,
    recipe: &Recipe,
    slot_count: u8,
    rng: &mut R,
) -> Vec<FoodId> {
    let wanted = decoy_count(slot_count, recipe.ingredients.len());
    let mut pool: Vec<FoodId> = catalog
        .foods()
        .iter()
        .map(|food| food.id)
        .filter(|&id| !recipe.requires(id))
        .collect();

    if wanted > pool.len() {
        log::warn!(
            "Only {} decoys available, requested {}",
            pool.len(),
            wanted
        );
    }

    pool.shuffle(rng);
    pool.truncate(wanted);
    pool
}

/// Picks a recipe uniformly at random and fills the remaining slots with decoys.
pub fn select_recipe_and_decoys<R: Rng + ?Sized>(
    catalog: &Catalog,
    slot_count: u8,
    rng: &mut R,
) -> Result<Selection> {
    let recipe = catalog
        .recipes()
        .choose(rng)
        .ok_or(GameError::EmptyCatalog)?
        .clone();
    let decoys = select_decoys(catalog, &recipe, slot_count, rng);
    log::debug!(
        "Selected recipe {:?} with {} decoys",
        recipe.name,
        decoys.len()
    );
    Ok(Selection { recipe, decoys })
}
