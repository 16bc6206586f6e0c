use std::collections::BTreeSet;

use forager_core::*;
use rand::prelude::*;

fn builtin() -> Catalog {
    Catalog::builtin().unwrap()
}

fn assert_board_matches_shapes(catalog: &Catalog, board: &Board) {
    let mut covered = 0;
    for placement in board.placements() {
        let food = catalog.food(placement.food).unwrap();
        for (x, y) in food.shape.iter_occupied() {
            let coords = (placement.origin.0 + x, placement.origin.1 + y);
            assert_eq!(board[coords], Some(food.id), "cell {coords:?} of {}", food.key);
        }
        covered += usize::from(food.tile_count());
    }
    // Each cell holds a single food, so shapes only add up when none of them overlap.
    let owned = board.iter_cells().filter(|(_, food)| food.is_some()).count();
    assert_eq!(owned, covered);
}

#[test]
fn generated_boards_never_overlap_and_hold_every_selected_food() {
    let catalog = builtin();

    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let selection = select_recipe_and_decoys(&catalog, 8, &mut rng).unwrap();
        let placed: Vec<FoodId> = selection.placed().collect();
        let foods = catalog.resolve(&placed).unwrap();

        let board = ScanBoardGenerator::new(seed, DEFAULT_MAX_ATTEMPTS)
            .generate(BoardConfig::default(), &foods)
            .unwrap();

        assert_eq!(
            selection.decoys.len(),
            8 - selection.recipe.ingredients.len()
        );
        let on_board: BTreeSet<FoodId> = board.placements().iter().map(|p| p.food).collect();
        let wanted: BTreeSet<FoodId> = placed.iter().copied().collect();
        assert_eq!(on_board, wanted);
        assert_eq!(board.placements().len(), 8);
        assert_board_matches_shapes(&catalog, &board);
    }
}

#[test]
fn salad_with_eight_slots_places_six_decoys() {
    let catalog = builtin();
    let salad = catalog.recipe_by_name("Salad").unwrap().clone();

    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let decoys = select_decoys(&catalog, &salad, 8, &mut rng);
        assert_eq!(decoys.len(), 6);

        let selection = Selection {
            recipe: salad.clone(),
            decoys,
        };
        let placed: Vec<FoodId> = selection.placed().collect();
        let foods = catalog.resolve(&placed).unwrap();
        let board = ScanBoardGenerator::new(seed, DEFAULT_MAX_ATTEMPTS)
            .generate(BoardConfig::new(20, 8), &foods)
            .unwrap();

        assert_eq!(board.placements().len(), 8);
        assert_board_matches_shapes(&catalog, &board);
    }
}

#[test]
fn reset_always_yields_a_fresh_playable_game() {
    let mut game = Game::new(builtin(), GameConfig::default(), 77).unwrap();

    for _ in 0..20 {
        game.reset().unwrap();
        game.dismiss_notification().unwrap();

        let session = game.session();
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.coins(), 20);
        assert_eq!(session.found(), 0);
        assert!(session.tiles().all(|tile| tile.state == TileState::Unflipped));
        assert_board_matches_shapes(game.catalog(), session.board());
    }
}

#[test]
fn each_food_decides_the_game_exactly_once_after_all_its_tiles() {
    let catalog = builtin();

    for seed in 0..40 {
        let mut game = Game::new(catalog.clone(), GameConfig::default(), seed).unwrap();
        game.dismiss_notification().unwrap();

        let food = game.session().placements()[(seed % 8) as usize].food;
        let tiles: Vec<Coord2> = game.session().board().tiles_of(food).collect();
        let is_ingredient = game.session().recipe().requires(food);

        for &coords in &tiles[..tiles.len() - 1] {
            assert_eq!(game.on_tile_flipped_hit(coords).unwrap(), FlipOutcome::Hit);
        }
        let outcome = game.on_tile_flipped_hit(tiles[tiles.len() - 1]).unwrap();

        let progress = game.session().progress(food).unwrap();
        assert_eq!(progress.discovered_tiles().len(), tiles.len());
        assert!(progress.is_revealed());
        if is_ingredient {
            assert_eq!(outcome, FlipOutcome::FoundIngredient);
            assert_eq!(game.session().found(), 1);
            assert_eq!(game.session().state(), GameState::Playing);
        } else {
            assert_eq!(outcome, FlipOutcome::Lost);
            assert_eq!(game.session().state(), GameState::Lost);
            assert_eq!(game.session().coins(), 0);
        }

        let revealed = game
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, GameEvent::FoodRevealed { .. }))
            .count();
        assert_eq!(revealed, 1);
    }
}

#[test]
fn misses_never_drive_coins_below_zero() {
    for seed in 0..10 {
        let mut game = Game::new(builtin(), GameConfig::default(), seed).unwrap();
        game.dismiss_notification().unwrap();
        let blanks: Vec<Coord2> = game
            .session()
            .tiles()
            .filter(|tile| !tile.is_hit())
            .map(|tile| tile.coords)
            .collect();

        let mut last = FlipOutcome::NoChange;
        for coords in blanks {
            match game.on_tile_flipped_no_hit(coords) {
                Ok(outcome) => last = outcome,
                Err(err) => {
                    assert_eq!(err, GameError::NotPlaying);
                    break;
                }
            }
        }

        assert_eq!(last, FlipOutcome::Lost);
        assert_eq!(game.session().coins(), 0);
        assert_eq!(game.session().lose_reason(), Some(&LoseReason::OutOfMoney));
    }
}

#[test]
fn three_misses_then_a_five_tile_decoy_loses_everything() {
    let catalog = Catalog::from_json(
        r####"{
            "footprint": 8,
            "foods": [
                { "key": "tomato", "name": "Tomato", "shape": [
                    "##......", "##......", "........", "........",
                    "........", "........", "........", "........"
                ] },
                { "key": "lettuce", "name": "Lettuce", "shape": [
                    "###.....", "........", "........", "........",
                    "........", "........", "........", "........"
                ] },
                { "key": "olive", "name": "Olive", "shape": [
                    ".#......", "###.....", ".#......", "........",
                    "........", "........", "........", "........"
                ] }
            ],
            "recipes": [{ "name": "Salad", "ingredients": ["tomato", "lettuce"] }]
        }"####,
    )
    .unwrap();
    let tomato = catalog.food_by_key("tomato").unwrap().id;
    let lettuce = catalog.food_by_key("lettuce").unwrap().id;
    let olive = catalog.food_by_key("olive").unwrap();
    assert_eq!(olive.tile_count(), 5);

    let foods = catalog.resolve(&[tomato, lettuce, olive.id]).unwrap();
    let board = Board::from_placements(
        20,
        &foods,
        &[
            Placement { food: tomato, origin: (0, 0) },
            Placement { food: lettuce, origin: (0, 5) },
            Placement { food: olive.id, origin: (10, 10) },
        ],
    )
    .unwrap();
    let selection = Selection {
        recipe: catalog.recipe_by_name("Salad").unwrap().clone(),
        decoys: vec![olive.id],
    };
    let mut session = GameSession::new(&catalog, selection, board, Rules::default()).unwrap();
    session.dismiss_notification();
    session.start().unwrap();

    for coords in [(19, 19), (18, 19), (17, 19)] {
        session.on_tile_flipped_no_hit(coords).unwrap();
    }
    assert_eq!(session.coins(), 14);

    let olive_tiles: Vec<Coord2> = session.board().tiles_of(olive.id).collect();
    for &coords in &olive_tiles[..4] {
        assert_eq!(session.on_tile_flipped_hit(coords).unwrap(), FlipOutcome::Hit);
    }
    assert_eq!(session.coins(), 18);
    assert_eq!(
        session.on_tile_flipped_hit(olive_tiles[4]).unwrap(),
        FlipOutcome::Lost
    );

    assert_eq!(session.state(), GameState::Lost);
    assert_eq!(session.coins(), 0);
    assert_eq!(
        session.notification().map(|n| n.message.as_str()),
        Some("Olive is not in your recipe.")
    );
    assert!(session
        .tiles()
        .filter(|tile| tile.food == Some(olive.id))
        .all(|tile| tile.state == TileState::Flipped));
}

#[test]
fn sessions_round_trip_through_json() {
    let mut game = Game::new(builtin(), GameConfig::default(), 5).unwrap();
    game.dismiss_notification().unwrap();
    game.flip((0, 0)).unwrap();

    let json = serde_json::to_string(game.session()).unwrap();
    let restored: GameSession = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, game.session());
}
