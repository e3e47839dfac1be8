//! Game-loop driver for the search engine.
//!
//! Plays the engine against itself from a given position (or analyzes a
//! single position with `--analyze`), logging each turn's move, value,
//! depth and node count.

use anyhow::{anyhow, Result};
use chess_ai::{
    Board, BoardExt, Engine, EvalWeights, Evaluate, MaterialEvaluator, Player, SearchConfig,
    WeightedEvaluator,
};
use clap::{Parser, ValueEnum};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EvalKind {
    /// Plain material count.
    Material,
    /// Material + piece-square tables + king safety + mobility.
    Weighted,
}

#[derive(Debug, Parser)]
#[command(name = "lookahead", about = "Alpha-beta chess engine driver")]
struct Args {
    /// Starting position as FEN; defaults to the standard start position.
    #[arg(long)]
    fen: Option<String>,

    /// Nominal search depth.
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Wall-clock budget per move, in milliseconds.
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Node cap per move.
    #[arg(long, default_value_t = 1_000_000)]
    max_nodes: u64,

    /// Stop a self-play game after this many plies.
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Static evaluator to use for both sides.
    #[arg(long, value_enum, default_value_t = EvalKind::Weighted)]
    eval: EvalKind,

    /// Analyze the position once instead of playing a game.
    #[arg(long)]
    analyze: bool,
}

fn build_engine(args: &Args) -> Engine {
    let evaluator: Box<dyn Evaluate> = match args.eval {
        EvalKind::Material => Box::new(MaterialEvaluator),
        EvalKind::Weighted => Box::new(WeightedEvaluator::new(EvalWeights::default())),
    };
    Engine::new(
        evaluator,
        SearchConfig {
            base_depth: args.depth,
            max_nodes: args.max_nodes,
            ..SearchConfig::default()
        },
    )
}

fn report_result(board: &Board) {
    if board.checkmate() {
        let winner = match board.turn() {
            Player::White => "black",
            Player::Black => "white",
        };
        info!(winner, "checkmate");
    } else if board.stalemate() {
        info!("stalemate");
    } else if board.insufficient_material() {
        info!("draw by insufficient material");
    } else {
        info!("game stopped");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut board = match &args.fen {
        Some(fen) => Board::from_fen(fen).map_err(|e| anyhow!("invalid FEN {fen:?}: {e:?}"))?,
        None => Board::start_pos(),
    };
    let budget = args.movetime_ms.map(Duration::from_millis);

    if args.analyze {
        let mut engine = build_engine(&args);
        let mv = engine
            .choose_move(&mut board, budget)
            .map_err(|e| anyhow!(e))?;
        info!(
            best = %mv,
            value = engine.last_value(),
            depth = engine.last_depth(),
            nodes = engine.nodes(),
            "analysis complete"
        );
        return Ok(());
    }

    let mut white = build_engine(&args);
    let mut black = build_engine(&args);

    for ply in 1..=args.max_plies {
        if board.is_decided() {
            break;
        }
        let side = board.turn();
        let engine = match side {
            Player::White => &mut white,
            Player::Black => &mut black,
        };
        let mv = engine
            .choose_move(&mut board, budget)
            .map_err(|e| anyhow!(e))?;
        board.apply_move(mv);
        info!(
            ply,
            side = ?side,
            mv = %mv,
            value = engine.last_value(),
            depth = engine.last_depth(),
            nodes = engine.nodes(),
            fen = %board.fen(),
            "move played"
        );
    }

    report_result(&board);
    Ok(())
}
