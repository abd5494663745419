//! Board tests - ticking, locking, scoring and game over

use blockfall::core::{Board, Grid, Occupancy, Phase, Piece, TickOutcome};
use blockfall::types::{GameAction, GridPos, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const GRAY: Rgb = Rgb::new(128, 128, 128);

/// Tick until something other than a one-row fall happens.
fn tick_until_settled(board: &mut Board) -> TickOutcome {
    loop {
        match board.tick() {
            TickOutcome::Fell => continue,
            other => return other,
        }
    }
}

#[test]
fn test_empty_grid_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!grid.is_filled_safe(GridPos::new(x, y)), "({x}, {y})");
        }
    }

    // Everything outside counts as filled.
    assert!(grid.is_filled_safe(GridPos::new(-1, 0)));
    assert!(grid.is_filled_safe(GridPos::new(0, -1)));
    assert!(grid.is_filled_safe(GridPos::new(BOARD_WIDTH as i8, 0)));
    assert!(grid.is_filled_safe(GridPos::new(0, BOARD_HEIGHT as i8)));
}

#[test]
fn test_grid_rows_are_row_major() {
    let mut grid = Grid::new();
    assert!(grid.fill(GridPos::new(3, 7), GRAY));

    let row = grid.rows().nth(7).unwrap();
    assert_eq!(row.len(), BOARD_WIDTH as usize);
    assert!(row[3].is_filled());
    assert_eq!(row[3].grid_position(), GridPos::new(3, 7));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_o_piece_falls_to_floor_and_locks() {
    let mut board = Board::with_pieces(1, PieceKind::O, PieceKind::I);
    assert_eq!(board.active().map(Piece::origin), Some(GridPos::new(4, 0)));

    let mut falls = 0;
    while board.tick() == TickOutcome::Fell {
        falls += 1;
    }
    assert_eq!(falls, 18);
    assert_eq!(board.score(), 20);
    assert_eq!(board.phase(), Phase::Locking);

    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        let block = board.grid().get(GridPos::new(x, y)).unwrap();
        assert!(block.is_filled());
        assert_eq!(block.color(), PieceKind::O.color());
    }

    assert_eq!(board.tick(), TickOutcome::Spawned(PieceKind::I));
}

#[test]
fn test_pieces_stack() {
    let mut board = Board::with_pieces(3, PieceKind::I, PieceKind::I);

    assert_eq!(tick_until_settled(&mut board), TickOutcome::Locked { points: 40 });
    assert_eq!(board.tick(), TickOutcome::Spawned(PieceKind::I));
    assert_eq!(tick_until_settled(&mut board), TickOutcome::Locked { points: 40 });

    // Second I rests on the first one: column 5 rows 12..20.
    for y in 12..20 {
        assert!(board.is_filled_safe(GridPos::new(5, y)), "row {y}");
    }
    assert!(!board.is_filled_safe(GridPos::new(5, 11)));
    assert_eq!(board.score(), 80);
}

#[test]
fn test_soft_drop_matches_tick_fall() {
    let mut dropped = Board::with_pieces(5, PieceKind::T, PieceKind::O);
    let mut ticked = dropped.clone();

    while dropped.apply_action(GameAction::SoftDrop) {}
    while ticked.tick() == TickOutcome::Fell {}

    // Soft drop never locks; the next tick does.
    assert_eq!(dropped.phase(), Phase::Active);
    assert_eq!(dropped.tick(), TickOutcome::Locked { points: 30 });
    assert_eq!(dropped.grid(), ticked.grid());
}

#[test]
fn test_tick_action_reports_change_until_game_over() {
    let mut board = Board::with_pieces(1, PieceKind::O, PieceKind::O);
    board.fill(GridPos::new(4, 2), GRAY);
    board.fill(GridPos::new(5, 2), GRAY);

    // Lock, then the blocked spawn: both change the board.
    assert!(board.apply_action(GameAction::Tick));
    assert_eq!(board.phase(), Phase::Locking);
    assert!(board.apply_action(GameAction::Tick));
    assert_eq!(board.phase(), Phase::GameOver);

    // From here on a tick is idle and needs no redraw.
    assert!(!board.apply_action(GameAction::Tick));
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut board = Board::with_pieces(1, PieceKind::O, PieceKind::O);
    assert!(board.fill(GridPos::new(4, 2), GRAY));
    assert!(board.fill(GridPos::new(5, 2), GRAY));

    assert_eq!(tick_until_settled(&mut board), TickOutcome::Locked { points: 20 });
    assert_eq!(board.tick(), TickOutcome::GameOver { score: 20 });
    assert!(board.is_game_over());
    assert!(board.active().is_none());

    // Terminal: nothing changes any more.
    let grid = board.grid().clone();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::RotateLeft,
        GameAction::RotateRight,
        GameAction::Tick,
    ] {
        assert!(!board.apply_action(action));
    }
    assert_eq!(board.tick(), TickOutcome::Idle);
    assert_eq!(board.grid(), &grid);
    assert_eq!(board.score(), 20);
}

#[test]
fn test_full_game_runs_to_game_over() {
    let mut board = Board::new(2024);
    let mut locked = 0;
    let mut expected_score = 0;

    // Rows never clear, so at most 200 / 4 pieces fit.
    for _ in 0..10_000 {
        match board.tick() {
            TickOutcome::Locked { points } => {
                locked += 1;
                expected_score += points;
                assert_eq!(board.score(), expected_score);
                assert_eq!(board.grid().occupied_count(), locked * 4);
            }
            TickOutcome::GameOver { score } => {
                assert_eq!(score, expected_score);
                break;
            }
            TickOutcome::Idle => panic!("idle before game over"),
            TickOutcome::Fell | TickOutcome::Spawned(_) => {}
        }
    }

    assert!(board.is_game_over());
    assert!(locked > 0 && locked <= 50);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut board = Board::new(seed);
        let mut outcomes = Vec::new();
        while !board.is_game_over() {
            board.apply_action(GameAction::MoveLeft);
            outcomes.push(board.tick());
        }
        (outcomes, board.score())
    };

    assert_eq!(play(77), play(77));
}
