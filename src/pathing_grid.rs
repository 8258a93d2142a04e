//! The searchable form of a maze and the shortest-path query on it.
use crate::dijkstra::dijkstra;
use crate::error::Error;
use crate::maze::{Maze, Wall};
use crate::DEFAULT_STEP_COST;
use core::fmt;
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Inline capacity of the per-cell edge list: four axis-aligned moves plus a
/// handful of jumps.
const N_SMALLVEC_SIZE: usize = 8;

/// Resolution of a wall record for one cell boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Barrier {
    /// The boundary cannot be crossed.
    Blocked,
    /// The boundary is crossed at the given cost.
    Passable(f64),
}

impl From<Wall> for Barrier {
    fn from(wall: Wall) -> Barrier {
        match wall.cost {
            Some(cost) => Barrier::Passable(cost),
            None => Barrier::Blocked,
        }
    }
}

/// Outcome of a shortest-path query: the cell sequence from start to goal
/// inclusive and its total cost. An unreachable goal is a normal result with
/// an empty path and infinite cost.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub cost: f64,
}

impl PathResult {
    fn unreachable() -> PathResult {
        PathResult {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// [true] when the goal could not be reached.
    pub fn is_unreachable(&self) -> bool {
        self.path.is_empty()
    }
}

/// [PathingGrid] holds a [Maze] in searchable form: wall records indexed by
/// the cell they are attached to, jump edges grouped by origin cell, and a
/// [UnionFind] over-approximation of connectivity used to cut off queries
/// that cannot succeed. Nothing is mutated after construction, so one grid
/// can serve any number of [search](Self::search) calls, concurrently if the
/// caller wishes.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: i32,
    height: i32,
    hwalls: FxHashMap<Point, Barrier>,
    vwalls: FxHashMap<Point, Barrier>,
    jumps: FxHashMap<Point, Vec<(Point, f64)>>,
    components: UnionFind<usize>,
}

/// Builds the wall index for one axis. The first record attached to a cell
/// wins; later duplicates are dropped with a warning.
fn index_walls(
    walls: &[Wall],
    kind: &str,
    width: i32,
    height: i32,
) -> Result<FxHashMap<Point, Barrier>, Error> {
    let mut index = FxHashMap::default();
    for wall in walls {
        if wall.x < 0 || wall.y < 0 || wall.x >= width || wall.y >= height {
            return Err(Error::WallOutOfBounds {
                x: wall.x,
                y: wall.y,
            });
        }
        let cell = Point::new(wall.x, wall.y);
        if index.contains_key(&cell) {
            warn!("duplicate {} record at {} ignored", kind, cell);
        } else {
            index.insert(cell, Barrier::from(*wall));
        }
    }
    Ok(index)
}

impl PathingGrid {
    /// Builds the indices from maze data. Fails on non-positive dimensions
    /// and on wall or jump records outside the grid; wall costs are taken
    /// verbatim and their sign is not validated.
    pub fn new(maze: &Maze) -> Result<PathingGrid, Error> {
        if maze.width <= 0 || maze.height <= 0 {
            return Err(Error::InvalidDimensions {
                width: maze.width,
                height: maze.height,
            });
        }
        let hwalls = index_walls(&maze.hwalls, "hwall", maze.width, maze.height)?;
        let vwalls = index_walls(&maze.vwalls, "vwall", maze.width, maze.height)?;
        let mut jumps: FxHashMap<Point, Vec<(Point, f64)>> = FxHashMap::default();
        for jump in &maze.jumps {
            let from = Point::from(jump.from);
            let to = Point::from(jump.to);
            for p in [from, to] {
                if p.x < 0 || p.y < 0 || p.x >= maze.width || p.y >= maze.height {
                    return Err(Error::JumpOutOfBounds { x: p.x, y: p.y });
                }
            }
            jumps.entry(from).or_default().push((to, jump.cost));
        }
        let mut grid = PathingGrid {
            width: maze.width,
            height: maze.height,
            hwalls,
            vwalls,
            jumps,
            components: UnionFind::new((maze.width * maze.height) as usize),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn get_ix(&self, x: i32, y: i32) -> usize {
        (x + y * self.width) as usize
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        self.get_ix(point.x, point.y)
    }

    fn resolve(barrier: Option<&Barrier>) -> Option<f64> {
        match barrier {
            None => Some(DEFAULT_STEP_COST),
            Some(Barrier::Blocked) => None,
            Some(Barrier::Passable(cost)) => Some(*cost),
        }
    }

    /// Cost of the vertical move between (x, y-1) and (x, y), governed by the
    /// hwall attached to (x, y) regardless of the direction of travel.
    /// [None] means the boundary is blocked.
    pub fn vertical_step_cost(&self, x: i32, y: i32) -> Option<f64> {
        Self::resolve(self.hwalls.get(&Point::new(x, y)))
    }

    /// Cost of the horizontal move between (x-1, y) and (x, y), governed by
    /// the vwall attached to (x, y) regardless of the direction of travel.
    pub fn horizontal_step_cost(&self, x: i32, y: i32) -> Option<f64> {
        Self::resolve(self.vwalls.get(&Point::new(x, y)))
    }

    /// Produces the outgoing edges of a cell: the axis-aligned moves (right,
    /// left, up, down) that survive bounds and wall gating, followed by the
    /// jump edges departing from the cell in load order.
    pub fn neighborhood(&self, pos: &Point) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        let (x, y) = (pos.x, pos.y);
        let mut edges = SmallVec::new();
        // Moving right crosses the boundary owned by the right-hand cell.
        if x + 1 < self.width {
            if let Some(cost) = self.horizontal_step_cost(x + 1, y) {
                edges.push((Point::new(x + 1, y), cost));
            }
        }
        if x - 1 >= 0 {
            if let Some(cost) = self.horizontal_step_cost(x, y) {
                edges.push((Point::new(x - 1, y), cost));
            }
        }
        // Moving up crosses the boundary owned by the upper cell.
        if y + 1 < self.height {
            if let Some(cost) = self.vertical_step_cost(x, y + 1) {
                edges.push((Point::new(x, y + 1), cost));
            }
        }
        if y - 1 >= 0 {
            if let Some(cost) = self.vertical_step_cost(x, y) {
                edges.push((Point::new(x, y - 1), cost));
            }
        }
        if let Some(jumps) = self.jumps.get(pos) {
            edges.extend(jumps.iter().copied());
        }
        edges
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks whether any route from start to goal can exist at all. Jump
    /// edges are one-way but unioned like everything else, so components
    /// over-approximate reachability: different components prove there is no
    /// route, equal components leave the answer to the search.
    pub fn maybe_reachable(&self, start: &Point, goal: &Point) -> bool {
        self.components
            .equiv(self.get_ix_point(start), self.get_ix_point(goal))
    }

    /// Generates a new [UnionFind] structure and links up cells over every
    /// passable boundary and jump.
    fn generate_components(&mut self) {
        info!("Generating connected components");
        let mut components = UnionFind::new((self.width * self.height) as usize);
        for x in 0..self.width {
            for y in 0..self.height {
                let point = Point::new(x, y);
                let parent_ix = self.get_ix(x, y);
                for (neighbour, _) in self.neighborhood(&point) {
                    components.union(parent_ix, self.get_ix_point(&neighbour));
                }
            }
        }
        self.components = components;
    }

    /// Computes the minimum-cost path between two cells, or reports the goal
    /// as unreachable. Endpoints outside the grid are rejected. With `start`
    /// equal to `goal` the path is the single cell at cost 0. Repeated calls
    /// with the same endpoints return the same result.
    pub fn search(&self, start: Point, goal: Point) -> Result<PathResult, Error> {
        for p in [&start, &goal] {
            if !self.in_bounds(p.x, p.y) {
                return Err(Error::CoordinateOutOfBounds { x: p.x, y: p.y });
            }
        }
        if !self.maybe_reachable(&start, &goal) {
            info!("{} and {} are in different components", start, goal);
            return Ok(PathResult::unreachable());
        }
        match dijkstra(&start, |node| self.neighborhood(node), |node| *node == goal) {
            Some((path, cost)) => Ok(PathResult { path, cost }),
            None => Ok(PathResult::unreachable()),
        }
    }
}

impl fmt::Display for PathingGrid {
    /// Renders the maze top row first. `|` and `-` mark blocked boundaries,
    /// `:` and `=` costed ones, `J` a jump origin.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                match self.vwalls.get(&Point::new(x, y)) {
                    Some(Barrier::Blocked) => write!(f, "|")?,
                    Some(Barrier::Passable(_)) => write!(f, ":")?,
                    None => write!(f, " ")?,
                }
                if self.jumps.contains_key(&Point::new(x, y)) {
                    write!(f, "J")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
            if y > 0 {
                // The hwall at (x, y) sits below the row just printed.
                for x in 0..self.width {
                    match self.hwalls.get(&Point::new(x, y)) {
                        Some(Barrier::Blocked) => write!(f, " -")?,
                        Some(Barrier::Passable(_)) => write!(f, " =")?,
                        None => write!(f, "  ")?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Coordinate, Jump};

    fn blocked_corridor() -> Maze {
        let mut maze = Maze::new(3, 1);
        maze.vwalls.push(Wall::blocking(1, 0));
        maze
    }

    #[test]
    fn neighborhood_order_is_right_left_up_down_then_jumps() {
        let mut maze = Maze::new(3, 3);
        maze.jumps.push(Jump::new(
            Coordinate::new(1, 1),
            Coordinate::new(0, 0),
            0.25,
        ));
        let grid = PathingGrid::new(&maze).unwrap();
        let edges = grid.neighborhood(&Point::new(1, 1));
        assert_eq!(
            edges.to_vec(),
            vec![
                (Point::new(2, 1), 1.0),
                (Point::new(0, 1), 1.0),
                (Point::new(1, 2), 1.0),
                (Point::new(1, 0), 1.0),
                (Point::new(0, 0), 0.25),
            ]
        );
    }

    #[test]
    fn boundary_cells_skip_outside_moves() {
        let grid = PathingGrid::new(&Maze::new(2, 2)).unwrap();
        let edges = grid.neighborhood(&Point::new(0, 0));
        assert_eq!(
            edges.to_vec(),
            vec![(Point::new(1, 0), 1.0), (Point::new(0, 1), 1.0)]
        );
    }

    #[test]
    fn wall_gates_both_directions_of_travel() {
        let mut maze = Maze::new(2, 2);
        maze.hwalls.push(Wall::costed(0, 1, 3.5));
        let grid = PathingGrid::new(&maze).unwrap();
        // Up from (0, 0) and down from (0, 1) both resolve the hwall at (0, 1).
        assert!(grid
            .neighborhood(&Point::new(0, 0))
            .contains(&(Point::new(0, 1), 3.5)));
        assert!(grid
            .neighborhood(&Point::new(0, 1))
            .contains(&(Point::new(0, 0), 3.5)));
    }

    #[test]
    fn first_loaded_duplicate_wall_wins() {
        let mut maze = blocked_corridor();
        maze.vwalls.push(Wall::costed(1, 0, 5.0));
        let grid = PathingGrid::new(&maze).unwrap();
        assert_eq!(grid.horizontal_step_cost(1, 0), None);

        let mut flipped = Maze::new(3, 1);
        flipped.vwalls.push(Wall::costed(1, 0, 5.0));
        flipped.vwalls.push(Wall::blocking(1, 0));
        let grid = PathingGrid::new(&flipped).unwrap();
        assert_eq!(grid.horizontal_step_cost(1, 0), Some(5.0));
    }

    #[test]
    fn components_split_by_blocking_wall() {
        let grid = PathingGrid::new(&blocked_corridor()).unwrap();
        let left = Point::new(0, 0);
        let right = Point::new(2, 0);
        assert!(!grid.maybe_reachable(&left, &right));
        assert_ne!(grid.get_component(&left), grid.get_component(&right));
    }

    #[test]
    fn costed_wall_does_not_split_components() {
        let mut maze = Maze::new(3, 1);
        maze.vwalls.push(Wall::costed(1, 0, 9.0));
        let grid = PathingGrid::new(&maze).unwrap();
        assert!(grid.maybe_reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn jump_bridges_components() {
        let mut maze = blocked_corridor();
        maze.jumps.push(Jump::new(
            Coordinate::new(0, 0),
            Coordinate::new(2, 0),
            0.5,
        ));
        let grid = PathingGrid::new(&maze).unwrap();
        assert!(grid.maybe_reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn build_rejects_malformed_mazes() {
        assert!(matches!(
            PathingGrid::new(&Maze::new(0, 5)),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PathingGrid::new(&Maze::new(3, -1)),
            Err(Error::InvalidDimensions { .. })
        ));

        let mut maze = Maze::new(2, 2);
        maze.hwalls.push(Wall::blocking(2, 0));
        assert!(matches!(
            PathingGrid::new(&maze),
            Err(Error::WallOutOfBounds { x: 2, y: 0 })
        ));

        let mut maze = Maze::new(2, 2);
        maze.jumps.push(Jump::new(
            Coordinate::new(0, 0),
            Coordinate::new(5, 5),
            1.0,
        ));
        assert!(matches!(
            PathingGrid::new(&maze),
            Err(Error::JumpOutOfBounds { x: 5, y: 5 })
        ));
    }

    #[test]
    fn search_rejects_out_of_range_endpoints() {
        let grid = PathingGrid::new(&Maze::new(2, 2)).unwrap();
        assert!(matches!(
            grid.search(Point::new(-1, 0), Point::new(1, 1)),
            Err(Error::CoordinateOutOfBounds { x: -1, y: 0 })
        ));
        assert!(matches!(
            grid.search(Point::new(0, 0), Point::new(2, 0)),
            Err(Error::CoordinateOutOfBounds { x: 2, y: 0 })
        ));
    }
}
