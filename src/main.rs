//! Gomoku engine self-play demo
//!
//! Two engines play each other and the final board and game record are
//! printed. Run with: cargo run --release -- --black hard --white medium

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gomoku::board::Board;
use gomoku::rules::winning_line;
use gomoku::{BackgroundSearch, Difficulty, EngineConfig, GomokuAI, Stone};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Gomoku engine self-play")]
struct Args {
    /// TOML config file (defaults are used if it does not exist)
    #[arg(long, default_value = "gomoku.toml")]
    config: PathBuf,

    /// Board size, overrides the config file
    #[arg(long)]
    board_size: Option<usize>,

    /// Stones in a row needed to win, overrides the config file
    #[arg(long)]
    win_length: Option<usize>,

    /// Difficulty of the Black engine
    #[arg(long, default_value = "hard")]
    black: Difficulty,

    /// Difficulty of the White engine
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many moves
    #[arg(long, default_value = "225")]
    max_moves: usize,

    /// Decide moves on a worker thread with the configured think delay
    #[arg(long)]
    background: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(args.log_level.parse()?),
        )
        .init();

    let mut config = EngineConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(size) = args.board_size {
        config.board_size = size;
    }
    if let Some(win_length) = args.win_length {
        config.win_length = win_length;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let mut black = new_engine(&config, Stone::Black, args.black, 0)?;
    let mut white = new_engine(&config, Stone::White, args.white, 1)?;
    let mut worker = args.background.then(|| BackgroundSearch::from_config(&config));

    info!(
        size = config.board_size,
        win_length = config.win_length,
        black = %args.black,
        white = %args.white,
        "starting self-play"
    );

    let mut board = Board::with_size(config.board_size);
    let mut to_move = Stone::Black;
    let mut winner = None;

    for _ in 0..args.max_moves {
        if board.is_full() {
            break;
        }
        let (mover, other) = match to_move {
            Stone::Black => (&mut black, &mut white),
            _ => (&mut white, &mut black),
        };

        let index = match worker.as_mut() {
            Some(bg) => {
                bg.start(mover, &board);
                let result = bg
                    .wait(Duration::from_secs(600))
                    .context("background search timed out")??;
                mover.record_move(result.index, to_move)?;
                result.index
            }
            None => mover.find_best_move(board.cells())?,
        };
        other.record_move(index, to_move)?;

        let pos = board.pos(index);
        board.place_stone(pos, to_move);
        println!("{:>3}. {} {}", board.stone_count(), to_move.name(), pos.label());

        if let Some(line) = winning_line(&board, pos, config.win_length) {
            let cells: Vec<String> = line.iter().map(|p| p.label()).collect();
            info!(line = %cells.join(" "), "line completed");
            winner = Some(to_move);
            break;
        }
        to_move = to_move.opponent();
    }

    println!();
    match winner {
        Some(stone) => println!("{} wins", stone.name()),
        None => println!("No winner"),
    }
    println!();
    print!("{}", black.export_game_record(&board, true));
    Ok(())
}

fn new_engine(
    config: &EngineConfig,
    stone: Stone,
    difficulty: Difficulty,
    stream: u64,
) -> Result<GomokuAI> {
    let mut engine = GomokuAI::from_config(config)?;
    if let Some(seed) = config.seed {
        engine = engine.with_seed(seed.wrapping_add(stream));
    }
    engine.set_difficulty(difficulty);
    engine.set_pieces(stone)?;
    Ok(engine)
}
