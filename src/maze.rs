//! Wire-format maze records and the JSON loader.
//!
//! These types mirror the maze file layout one to one; the searchable form is
//! built from them by [PathingGrid::new](crate::PathingGrid::new). All lists
//! are optional in the file and deserialize as empty when absent.
use crate::error::Error;
use grid_util::point::Point;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A grid cell position as it appears in maze files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Point {
        Point::new(c.x, c.y)
    }
}

/// A directional barrier attached to the cell (x, y). A record without a cost
/// makes its boundary impassable; a record with a cost makes the boundary
/// passable at that cost instead of [DEFAULT_STEP_COST](crate::DEFAULT_STEP_COST).
/// Whether the record gates vertical or horizontal movement depends on the
/// list it is loaded into ([hwalls](Maze::hwalls) or [vwalls](Maze::vwalls)).
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Wall {
    pub x: i32,
    pub y: i32,
    pub cost: Option<f64>,
}

impl Wall {
    /// A wall that blocks its boundary outright.
    pub fn blocking(x: i32, y: i32) -> Wall {
        Wall { x, y, cost: None }
    }

    /// A wall that is crossed at the given cost.
    pub fn costed(x: i32, y: i32, cost: f64) -> Wall {
        Wall {
            x,
            y,
            cost: Some(cost),
        }
    }
}

/// A one-way shortcut edge with an explicit cost, independent of grid
/// adjacency.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Jump {
    pub from: Coordinate,
    pub to: Coordinate,
    pub cost: f64,
}

impl Jump {
    pub fn new(from: Coordinate, to: Coordinate, cost: f64) -> Jump {
        Jump { from, to, cost }
    }
}

/// A (from, to) query carried by the maze file.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Quest {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// In-memory maze description: grid dimensions plus the wall, jump and quest
/// records. Read-only for the lifetime of all queries.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub hwalls: Vec<Wall>,
    #[serde(default)]
    pub vwalls: Vec<Wall>,
    #[serde(default)]
    pub jumps: Vec<Jump>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl Maze {
    /// An empty maze of the given dimensions.
    pub fn new(width: i32, height: i32) -> Maze {
        Maze {
            width,
            height,
            ..Maze::default()
        }
    }

    /// Reads a maze description from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Maze, Error> {
        let file = File::open(path)?;
        Maze::from_reader(BufReader::new(file))
    }

    /// Reads a maze description from a JSON stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Maze, Error> {
        Ok(serde_json::from_reader(reader)?)
    }
}
