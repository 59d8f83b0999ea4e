use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snakebot::game::GameState;
use snakebot::game_fixture;
use snakebot::planner::choose_move;
use snakebot::types::{Move, Position};

/// a long snake winding back and forth across the top of a big board
fn serpentine() -> GameState {
    let width = 20;
    let mut body = Vec::new();
    for y in 0..6 {
        let row: Vec<_> = (0..width).map(|x| Position::new(x, y)).collect();
        if y % 2 == 0 {
            body.extend(row.into_iter().rev());
        } else {
            body.extend(row);
        }
    }
    body.reverse();
    GameState {
        width: width as u32,
        height: 20,
        body: body.into_iter().collect(),
        food: Position::new(10, 15),
        heading: Move::Right,
    }
}

fn bench_choose_move(c: &mut Criterion) {
    let g = game_fixture(include_str!("../fixtures/corner_8x5.json"));
    c.bench_function("choose move small board", |b| {
        b.iter(|| choose_move(black_box(&g)))
    });

    let g = serpentine();
    c.bench_function("choose move long snake", |b| {
        b.iter(|| choose_move(black_box(&g)))
    });
}

criterion_group!(benches, bench_choose_move);
criterion_main!(benches);
