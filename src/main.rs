//! FrostFin entry point
//!
//! Sets up logging and storage for the platform, then plays today's daily
//! puzzle with a scripted sequence of moves.

use frostfin::Game;
use frostfin::consts::TIMER_TICK_SECS;
use frostfin::game::TurnOutcome;
use frostfin::persistence::PersistenceGateway;
use frostfin::sim::{ElementKind, ElementState};
use frostfin::{format_temperature, format_time};

/// Scripted play: wake every fish, then park one on each goal
fn play_daily<S: PersistenceGateway>(game: &mut Game<S>) {
    let audio = game.tracker().settings().any_audio();
    log::info!("Audio {}", if audio { "on" } else { "muted" });

    let puzzle = game.start_daily().clone();
    log::info!(
        "Daily puzzle: {} ({}, {}, {} moves max)",
        puzzle.title,
        puzzle.difficulty.as_str(),
        format_temperature(puzzle.temperature),
        puzzle.max_moves
    );

    let fish: Vec<_> = puzzle.elements_of(ElementKind::Fish).collect();
    let goals: Vec<_> = puzzle.elements_of(ElementKind::Goal).collect();

    let mut actions = Vec::new();
    for f in &fish {
        if f.state != ElementState::Active {
            actions.push((f.id, None));
        }
    }
    for (f, goal) in fish.iter().zip(&goals) {
        actions.push((f.id, Some(goal.pos)));
    }

    for (id, target) in actions {
        // A second and a half of think time per action
        for _ in 0..15 {
            game.tick(TIMER_TICK_SECS);
        }
        let outcome = match target {
            None => game.activate(id),
            Some(pos) => game.move_element(id, pos),
        };
        match outcome {
            Ok(TurnOutcome::Completed { result, events }) => {
                log::info!(
                    "Solved in {} moves, {}",
                    result.moves,
                    format_time(result.elapsed_secs)
                );
                for event in events {
                    log::info!("  {event:?}");
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Action on element {id} failed: {e}");
                break;
            }
        }
    }

    let user = game.tracker().user();
    log::info!(
        "{}: {} solved, score {}, {} coins, streak {}",
        user.username,
        user.puzzles_solved,
        user.total_score,
        user.coins,
        user.daily_streak
    );

    let board = game.tracker().leaderboard(&mut rand::rng());
    match board.rank_of(&user.username) {
        Some(rank) => log::info!("Leaderboard rank {rank} of {}", board.entries.len()),
        None => log::info!("Not on the leaderboard yet"),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use frostfin::Game;
    use frostfin::persistence::LocalStorageStore;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }
        log::info!("FrostFin (web) starting...");

        let mut game = Game::load(LocalStorageStore::new());
        super::play_daily(&mut game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use frostfin::persistence::FileStore;

    env_logger::init();
    log::info!("FrostFin (native) starting...");

    let dir = std::env::var("FROSTFIN_DATA_DIR").unwrap_or_else(|_| "frostfin-data".to_string());
    let store = match FileStore::open(&dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Cannot open save directory {dir}: {e}");
            std::process::exit(1);
        }
    };

    let mut game = Game::load(store);
    play_daily(&mut game);
    println!("Progress saved in {}", game.tracker().store().dir().display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
