use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_arcade::core::{BagRandomizer, Board, GameSession, GameSnapshot, PieceController, SnakeGame};
use tui_arcade::term::{FrameBuffer, GameView, Viewport};
use tui_arcade::types::{InputEvent, Key, PieceKind};

const NO_EVENTS: [InputEvent; 0] = [];

fn bench_frame(c: &mut Criterion) {
    let mut game = GameSession::new(12345);

    c.bench_function("session_frame_16ms", |b| {
        b.iter(|| {
            if game.game_over() {
                game = GameSession::new(12345);
            }
            game.update(NO_EVENTS, black_box(16));
        })
    });
}

fn bench_hard_drop_frame(c: &mut Criterion) {
    let mut game = GameSession::new(12345);

    c.bench_function("session_hard_drop", |b| {
        b.iter(|| {
            if game.game_over() {
                game = GameSession::new(12345);
            }
            game.update([InputEvent::KeyDown(Key::Space)], black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_lines());
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut pc = PieceController::new(BagRandomizer::new(12345));

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            pc.move_horizontal(black_box(1));
            pc.rotate(true);
            pc.move_horizontal(black_box(-1));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let game = GameSession::new(12345);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render_80x24", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

fn bench_snake_step(c: &mut Criterion) {
    let mut game = SnakeGame::new(12345);

    c.bench_function("snake_step", |b| {
        b.iter(|| {
            if game.game_over() {
                game = SnakeGame::new(12345);
            }
            game.step();
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_hard_drop_frame,
    bench_line_clear,
    bench_move_and_rotate,
    bench_render,
    bench_snake_step
);
criterion_main!(benches);
