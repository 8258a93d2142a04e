use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use maze_pathfinding::{Coordinate, Jump, Maze, PathingGrid, Wall};
use std::hint::black_box;

/// A serpentine maze: alternating rows of blocking hwalls with a single gap,
/// forcing the search to sweep the whole grid.
fn serpentine_maze(n: i32) -> Maze {
    let mut maze = Maze::new(n, n);
    for y in 1..n {
        if y % 2 == 0 {
            continue;
        }
        let gap = if (y / 2) % 2 == 0 { n - 1 } else { 0 };
        for x in 0..n {
            if x != gap {
                maze.hwalls.push(Wall::blocking(x, y));
            }
        }
    }
    maze
}

fn search_bench(c: &mut Criterion) {
    let n = 64;
    let open = PathingGrid::new(&Maze::new(n, n)).unwrap();
    let serpentine = PathingGrid::new(&serpentine_maze(n)).unwrap();
    let mut shortcut_maze = serpentine_maze(n);
    shortcut_maze.jumps.push(Jump::new(
        Coordinate::new(0, 0),
        Coordinate::new(n - 1, n - 2),
        1.0,
    ));
    let shortcut = PathingGrid::new(&shortcut_maze).unwrap();

    let start = Point::new(0, 0);
    let goal = Point::new(n - 1, n - 1);
    for (name, grid) in [
        ("open 64x64", &open),
        ("serpentine 64x64", &serpentine),
        ("serpentine 64x64 with jump", &shortcut),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| black_box(grid.search(start, goal).unwrap()))
        });
    }
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
