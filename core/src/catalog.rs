use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Side length of the square every food shape is drawn in.
pub const DEFAULT_FOOTPRINT: Coord = 8;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Compact handle of a food, its index in the owning [`Catalog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub u16);

impl FoodId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Occupancy mask of a food shape, indexed by `(x, y)` inside its footprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeMask {
    cells: Array2<bool>,
    tile_count: CellCount,
}

impl ShapeMask {
    /// Parses rows top to bottom, `#` marks an occupied cell and `.` an empty one.
    ///
    /// The rows must form a non-empty square with at least one occupied cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let side = rows.len();
        if side == 0 || side > Coord::MAX as usize {
            return None;
        }

        let mut cells = Array2::from_elem([side, side], false);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != side {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => cells[[x, y]] = true,
                    '.' => {}
                    _ => return None,
                }
            }
        }

        let mask = Self::from_cells(cells);
        (mask.tile_count > 0).then_some(mask)
    }

    pub fn from_cells(cells: Array2<bool>) -> Self {
        let tile_count = cells.iter().filter(|&&occupied| occupied).count() as CellCount;
        Self { cells, tile_count }
    }

    pub fn footprint(&self) -> Coord {
        let (width, height) = self.cells.dim();
        if width == height {
            width as Coord
        } else {
            0
        }
    }

    pub fn tile_count(&self) -> CellCount {
        self.tile_count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Occupied cells relative to the top-left corner of the footprint.
    pub fn iter_occupied(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &occupied)| occupied)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub key: String,
    pub name: String,
    pub shape: ShapeMask,
}

impl Food {
    pub fn tile_count(&self) -> CellCount {
        self.shape.tile_count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<FoodId>,
}

impl Recipe {
    pub fn requires(&self, food: FoodId) -> bool {
        self.ingredients.contains(&food)
    }
}

#[derive(Deserialize)]
struct CatalogData {
    #[serde(default = "default_footprint")]
    footprint: Coord,
    foods: Vec<FoodData>,
    recipes: Vec<RecipeData>,
}

#[derive(Deserialize)]
struct FoodData {
    key: String,
    name: String,
    shape: Vec<String>,
}

#[derive(Deserialize)]
struct RecipeData {
    name: String,
    ingredients: Vec<String>,
}

const fn default_footprint() -> Coord {
    DEFAULT_FOOTPRINT
}

/// Every food that can appear on a board, and the recipes built from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    footprint: Coord,
    foods: Vec<Food>,
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// The catalog shipped with the game.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)
            .map_err(|err| GameError::MalformedCatalog(err.to_string()))?;
        Self::from_data(data)
    }

    fn from_data(data: CatalogData) -> Result<Self> {
        let footprint = data.footprint;
        if footprint == 0 {
            return Err(GameError::MalformedCatalog("footprint must be positive".into()));
        }
        if data.foods.len() > u16::MAX as usize {
            return Err(GameError::MalformedCatalog("too many foods".into()));
        }

        let mut keys = BTreeSet::new();
        let mut foods = Vec::with_capacity(data.foods.len());
        for (index, food) in data.foods.into_iter().enumerate() {
            if !keys.insert(food.key.clone()) {
                return Err(GameError::DuplicateFood(food.key));
            }
            let shape = ShapeMask::from_rows(food.shape.as_slice())
                .ok_or_else(|| GameError::InvalidShape(food.key.clone()))?;
            if shape.footprint() != footprint {
                return Err(GameError::FootprintMismatch {
                    food: food.key,
                    footprint,
                });
            }
            foods.push(Food {
                id: FoodId(index as u16),
                key: food.key,
                name: food.name,
                shape,
            });
        }

        let mut catalog = Self {
            footprint,
            foods,
            recipes: Vec::new(),
        };

        for recipe in data.recipes {
            if recipe.ingredients.is_empty() {
                return Err(GameError::MalformedCatalog(alloc::format!(
                    "recipe {:?} has no ingredients",
                    recipe.name
                )));
            }
            let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
            for key in recipe.ingredients {
                let id = catalog
                    .food_by_key(&key)
                    .map(|food| food.id)
                    .ok_or_else(|| GameError::UnknownFood(key.clone()))?;
                if ingredients.contains(&id) {
                    return Err(GameError::DuplicateIngredient {
                        recipe: recipe.name,
                        food: key,
                    });
                }
                ingredients.push(id);
            }
            catalog.recipes.push(Recipe {
                name: recipe.name,
                ingredients,
            });
        }

        log::debug!(
            "Loaded catalog with {} foods and {} recipes",
            catalog.foods.len(),
            catalog.recipes.len()
        );
        Ok(catalog)
    }

    pub fn footprint(&self) -> Coord {
        self.footprint
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods.get(id.index())
    }

    pub fn food_by_key(&self, key: &str) -> Option<&Food> {
        self.foods.iter().find(|food| food.key == key)
    }

    pub fn recipe_by_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// Resolves ids to foods, failing on the first id this catalog does not know.
    pub fn resolve(&self, ids: &[FoodId]) -> Result<Vec<&Food>> {
        ids.iter()
            .map(|&id| {
                self.food(id)
                    .ok_or_else(|| GameError::UnknownFood(alloc::format!("#{}", id.0)))
            })
            .collect()
    }
}
