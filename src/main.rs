//! Live T3 - command-line front end
//!
//! Plays against a file-backed game store, one operation per invocation.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use live_t3::{
    FileStore, GameConfig, GameController, GameView, MoveOutcome, Player, RoundStats,
    StateRepository,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let roster = config.roster()?;

    let store = FileStore::open(&cli.store_dir)
        .with_context(|| format!("opening store at {}", cli.store_dir.display()))?;
    let repository = StateRepository::new(store, config.storage_key())?;
    let game = GameController::new(repository, roster);

    match cli.command {
        Command::Show => {
            print_view(&game.game()?);
            print_stats("Round", &game.stats()?);
        }
        Command::Move { square } => {
            let view = game.game()?;
            if view.status().is_complete() {
                println!("Game over. Run `reset` to play again.");
                print_view(&view);
                return Ok(());
            }

            match game.player_move(square)? {
                MoveOutcome::Played(view) => print_view(&view),
                MoveOutcome::SquareOccupied(square) => {
                    println!("Square {} is already taken.", square);
                }
            }
        }
        Command::Reset => {
            let view = game.reset_game()?;
            info!("Game reset");
            print_view(&view);
            print_stats("Round", &game.stats()?);
        }
        Command::NewRound => {
            let view = game.start_new_round()?;
            info!("New round started");
            print_view(&view);
            print_stats("Session", &game.session_stats()?);
        }
        Command::Stats { session } => {
            if session {
                print_stats("Session", &game.session_stats()?);
            } else {
                print_stats("Round", &game.stats()?);
            }
        }
    }

    Ok(())
}

/// Short mark for a player: the icon suffix (`fa-x` -> `X`), else the id.
fn mark(player: &Player) -> String {
    player
        .icon_class()
        .strip_prefix("fa-")
        .map(str::to_uppercase)
        .unwrap_or_else(|| player.id().to_string())
}

fn print_view(view: &GameView) {
    let board = view.board();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                board[index].map_or_else(|| (index + 1).to_string(), mark)
            })
            .collect();
        println!(" {}", cells.join(" | "));
        if row < 2 {
            println!("---+---+---");
        }
    }

    let status = view.status();
    match (status.is_complete(), status.winner()) {
        (true, Some(winner)) => println!("{} wins!", winner.name()),
        (true, None) => println!("Tie game!"),
        (false, _) => println!(
            "{}'s turn ({})",
            view.current_player().name(),
            mark(view.current_player())
        ),
    }
}

fn print_stats(label: &str, stats: &RoundStats) {
    let wins: Vec<String> = stats
        .players()
        .iter()
        .map(|s| format!("{} {}", s.player().name(), s.wins()))
        .collect();
    println!("{}: {} | Ties {}", label, wins.join(" | "), stats.ties());
}
