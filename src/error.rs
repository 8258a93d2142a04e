use std::fmt;
use std::io;

/// Failures reported while loading a maze, building a
/// [PathingGrid](crate::PathingGrid) or validating search endpoints.
///
/// An unreachable goal is deliberately not in this list: it is a normal
/// search outcome, reported as an empty path with infinite cost.
#[derive(Debug)]
pub enum Error {
    /// Maze width or height is not strictly positive.
    InvalidDimensions { width: i32, height: i32 },
    /// A wall record is attached to a cell outside the grid.
    WallOutOfBounds { x: i32, y: i32 },
    /// A jump endpoint lies outside the grid.
    JumpOutOfBounds { x: i32, y: i32 },
    /// A search endpoint lies outside the grid.
    CoordinateOutOfBounds { x: i32, y: i32 },
    /// The maze file could not be read.
    Io(io::Error),
    /// The maze file could not be parsed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions {}x{}", width, height)
            }
            Error::WallOutOfBounds { x, y } => {
                write!(f, "wall record at ({}, {}) is outside the grid", x, y)
            }
            Error::JumpOutOfBounds { x, y } => {
                write!(f, "jump endpoint ({}, {}) is outside the grid", x, y)
            }
            Error::CoordinateOutOfBounds { x, y } => {
                write!(f, "coordinate ({}, {}) is out of range", x, y)
            }
            Error::Io(e) => write!(f, "failed to read maze file: {}", e),
            Error::Json(e) => write!(f, "failed to parse maze file: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}
