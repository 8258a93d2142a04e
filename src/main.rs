use log::warn;
use maze_pathfinding::{Error, Maze, PathingGrid};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Resolves the maze file: first argument if it exists, otherwise the default
/// `maze.json`, otherwise nothing.
fn locate_maze_file() -> Option<PathBuf> {
    match std::env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(&arg);
            if path.exists() {
                return Some(path);
            }
            warn!("Can't find file {}", arg);
        }
        None => warn!("no file passed as arg. Falling back to default maze.json"),
    }
    let fallback = PathBuf::from("maze.json");
    if fallback.exists() {
        Some(fallback)
    } else {
        warn!("Can't find default file maze.json");
        None
    }
}

fn run(path: &Path) -> Result<(), Error> {
    let maze = Maze::from_path(path)?;
    let grid = PathingGrid::new(&maze)?;
    for quest in &maze.quests {
        let result = grid.search(quest.from.into(), quest.to.into())?;
        println!(
            "distance from ({}, {}) to ({}, {}): {}",
            quest.from.x, quest.from.y, quest.to.x, quest.to.y, result.cost
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let Some(path) = locate_maze_file() else {
        return ExitCode::FAILURE;
    };
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
