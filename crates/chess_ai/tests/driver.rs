//! End-to-end scenarios for the iterative deepening driver, exercised
//! through the public API only.

use chess_ai::{
    BitMove, Board, BoardExt, Engine, EngineError, EvalWeights, MaterialEvaluator, SearchConfig,
    WeightedEvaluator,
};
use std::time::Duration;

fn legal_moves(board: &Board) -> Vec<BitMove> {
    board.generate_moves().iter().copied().collect()
}

#[test]
fn engine_always_answers_with_a_legal_move() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        "8/8/8/3k4/8/8/3P4/4K3 w - - 0 1",
    ];
    let mut engine = Engine::new(
        Box::new(WeightedEvaluator::default()),
        SearchConfig {
            base_depth: 2,
            ..SearchConfig::default()
        },
    );
    for fen in fens {
        let mut board = Board::from_fen(fen).unwrap();
        let legal = legal_moves(&board);
        let mv = engine.choose_move(&mut board, None).unwrap();
        assert!(legal.contains(&mv), "illegal move chosen for {fen}");
        assert_eq!(board.fen(), fen, "the driver must restore the position");
    }
}

#[test]
fn forced_mate_is_played_and_proven_at_depth_one() {
    let mut board = Board::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
    let mut engine = Engine::default();
    let mv = engine.choose_move(&mut board, None).unwrap();
    board.apply_move(mv);
    assert!(board.checkmate(), "the queen must deliver mate");
    assert_eq!(engine.last_depth(), 1);
    assert!(engine.last_value().is_infinite());
}

#[test]
fn time_budget_still_produces_a_move() {
    let mut board = Board::start_pos();
    let mut engine = Engine::default();
    // A budget below the safety margin cancels before depth 1 completes;
    // the driver falls back to the first enumerated legal move.
    let mv = engine
        .choose_move(&mut board, Some(Duration::from_millis(1)))
        .unwrap();
    assert!(legal_moves(&board).contains(&mv));
}

#[test]
fn two_engines_keep_independent_state() {
    let mut board = Board::start_pos();
    let config = SearchConfig {
        base_depth: 2,
        ..SearchConfig::default()
    };
    let mut white = Engine::new(Box::new(MaterialEvaluator), config.clone());
    let mut black = Engine::new(
        Box::new(WeightedEvaluator::new(EvalWeights::default())),
        config,
    );
    for _ in 0..4 {
        if board.is_decided() || legal_moves(&board).is_empty() {
            break;
        }
        let engine = match board.turn() {
            chess_ai::Player::White => &mut white,
            chess_ai::Player::Black => &mut black,
        };
        let mv = engine.choose_move(&mut board, None).unwrap();
        board.apply_move(mv);
    }
    // Four plies of self-play from the start cannot end the game.
    assert!(!board.is_decided());
}

#[test]
fn exhausted_position_reports_the_contract_breach() {
    // Fool's mate: white has no legal reply.
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    let mut engine = Engine::default();
    match engine.choose_move(&mut board, None) {
        Err(EngineError::NoLegalMoves { fen }) => assert!(fen.contains("RNBQKBNR")),
        other => panic!("expected NoLegalMoves, got {other:?}"),
    }
}
