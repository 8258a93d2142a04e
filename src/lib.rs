//! # maze_pathfinding
//!
//! A grid-based shortest-path system for mazes whose cell-to-cell
//! connectivity is shaped by directional walls and one-way jumps, each with
//! an optional traversal cost. Implements
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! with a lazy-deletion frontier over the implicit graph spanned by the maze
//! records. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
mod dijkstra;
pub mod error;
pub mod maze;
pub mod pathing_grid;

pub use error::Error;
pub use maze::{Coordinate, Jump, Maze, Quest, Wall};
pub use pathing_grid::{Barrier, PathResult, PathingGrid};

/// Cost of an unobstructed axis-aligned move, used wherever no wall record is
/// attached to the boundary being crossed.
pub const DEFAULT_STEP_COST: f64 = 1.0;
