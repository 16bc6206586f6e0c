use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use forager_core::*;
use rand::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about = "Generate many boards and report how hard they were to lay out", long_about = None)]
struct Args {
    /// Number of boards to generate
    #[arg(short, long, default_value_t = 1000)]
    games: u32,

    /// Seed for the first board, following boards use the next seeds
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// JSON game configuration, defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON food catalog instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the last generated board
    #[arg(long)]
    show: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json(&json)?
        }
        None => GameConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Catalog::from_json(&json)?
        }
        None => Catalog::builtin()?,
    };

    let mut attempts: BTreeMap<u32, u32> = BTreeMap::new();
    let mut recipes: BTreeMap<String, u32> = BTreeMap::new();
    let mut failures = 0;
    let mut last = None;

    for seed in args.seed..args.seed + u64::from(args.games) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let selection = select_recipe_and_decoys(&catalog, config.slot_count, &mut rng)?;
        let placed: Vec<FoodId> = selection.placed().collect();
        let foods = catalog.resolve(&placed)?;
        *recipes.entry(selection.recipe.name.clone()).or_default() += 1;

        match ScanBoardGenerator::new(seed, config.max_attempts)
            .generate(config.board_config(), &foods)
        {
            Ok(board) => {
                *attempts.entry(board.attempts()).or_default() += 1;
                last = Some((selection, board));
            }
            Err(GameError::BoardGenerationFailed { .. }) => failures += 1,
            Err(err) => return Err(err.into()),
        }
    }

    let generated: u32 = attempts.values().sum();
    let total: u64 = attempts
        .iter()
        .map(|(&tries, &count)| u64::from(tries) * u64::from(count))
        .sum();
    println!("boards:    {generated}");
    println!("failures:  {failures}");
    if generated > 0 {
        println!("mean:      {:.2} attempts", total as f64 / f64::from(generated));
        println!("max:       {} attempts", attempts.keys().last().copied().unwrap_or(0));
    }
    println!();
    println!("attempts  boards");
    for (tries, count) in &attempts {
        println!("{tries:>8}  {count}");
    }
    println!();
    for (name, count) in &recipes {
        println!("{name:<14} {count}");
    }

    if args.show {
        if let Some((selection, board)) = last {
            println!();
            print_board(&catalog, &selection, &board);
        }
    }

    Ok(())
}

fn print_board(catalog: &Catalog, selection: &Selection, board: &Board) {
    let symbol = |food: Option<FoodId>| match food.and_then(|id| catalog.food(id)) {
        Some(food) if selection.recipe.requires(food.id) => {
            food.key.chars().next().map_or('?', |c| c.to_ascii_uppercase())
        }
        Some(food) => food.key.chars().next().unwrap_or('?'),
        None => '.',
    };

    println!("{} (upper case: ingredients)", selection.recipe.name);
    for y in 0..board.size() {
        let row: String = (0..board.size()).map(|x| symbol(board[(x, y)])).collect();
        println!("{row}");
    }
}
