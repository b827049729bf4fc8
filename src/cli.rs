//! Command-line interface for live_t3.

use clap::{Parser, Subcommand};
use live_t3::Position;
use std::path::PathBuf;

/// Live T3 - tic-tac-toe with persistent round and session history
#[derive(Parser, Debug)]
#[command(name = "live_t3")]
#[command(about = "Play tic-tac-toe against a persistent game store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the stored game document
    #[arg(long, default_value = ".live_t3")]
    pub store_dir: PathBuf,

    /// Path to a TOML config file (storage key and players)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the board, whose turn it is, and the round score
    Show,

    /// Claim a square for the player whose turn it is
    Move {
        /// Square id (1-9, row-major) or label such as "center"
        #[arg(value_parser = parse_square)]
        square: Position,
    },

    /// End the current game, recording it if it is finished
    Reset,

    /// End the current game and start a new round
    NewRound,

    /// Show win and tie counts
    Stats {
        /// Count every recorded game instead of the current round
        #[arg(long)]
        session: bool,
    },
}

fn parse_square(s: &str) -> Result<Position, String> {
    Position::parse(s)
        .ok_or_else(|| format!("'{}' is not a square (use 1-9 or a label like \"center\")", s))
}
