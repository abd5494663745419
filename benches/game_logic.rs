use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, Grid, Piece};
use blockfall::term::{FrameBuffer, GameView};
use blockfall::types::{GridPos, MoveDir, PieceKind, RotateDir};

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_until_game_over", |b| {
        b.iter(|| {
            let mut board = Board::new(black_box(12345));
            while !board.is_game_over() {
                board.tick();
            }
            board.score()
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let grid = Grid::new();
    let piece = Piece::new(PieceKind::T, GridPos::new(4, 8));

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let mut p = piece.clone();
            p.try_move(black_box(MoveDir::Left), &grid);
            p.try_move(black_box(MoveDir::Right), &grid);
            p
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let grid = Grid::new();
    let mut piece = Piece::new(PieceKind::I, GridPos::new(4, 8));

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            piece.try_rotate(black_box(RotateDir::Right), &grid);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut board = Board::new(7);
    for _ in 0..200 {
        board.tick();
    }
    let view = GameView::default();
    let (w, h) = view.frame_size();
    let mut fb = FrameBuffer::new(w, h);

    c.bench_function("render_into", |b| {
        b.iter(|| {
            view.render_into(black_box(&board), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_try_move,
    bench_try_rotate,
    bench_render
);
criterion_main!(benches);
