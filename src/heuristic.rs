use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::puzzle::{Puzzle, PuzzleError};
use crate::tile::Tile;
use crate::traits::puzzle::Heuristic;

/// Row and column offsets between where `tile` sits and where it belongs.
fn displacement(puzzle: &Puzzle, idx: usize, tile: &Tile) -> (usize, usize) {
    let size = puzzle.size();
    let (goal_row, goal_col) = tile.solved_position(size, puzzle.goal());
    ((idx / size).abs_diff(goal_row), (idx % size).abs_diff(goal_col))
}

/// `cost + Σ |Δrow| + |Δcol|` over every tile except the blank.
pub fn manhattan_distance(puzzle: &Puzzle) -> u32 {
    let mut h = puzzle.cost();

    for (idx, tile) in puzzle.tiles().iter().enumerate() {
        if tile.is_blank() {
            continue;
        }
        let (rows, cols) = displacement(puzzle, idx, tile);
        h += (rows + cols) as u32;
    }

    h
}

/// `cost + Σ sqrt(Δrow² + Δcol²)` over every tile except the blank.
pub fn euclidean_distance(puzzle: &Puzzle) -> f64 {
    let mut h = puzzle.cost() as f64;

    for (idx, tile) in puzzle.tiles().iter().enumerate() {
        if tile.is_blank() {
            continue;
        }
        let (rows, cols) = displacement(puzzle, idx, tile);
        h += ((rows * rows + cols * cols) as f64).sqrt();
    }

    h
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Manhattan {
    fn get_heuristic(&self, puzzle: &Puzzle) -> f64 {
        manhattan_distance(puzzle) as f64
    }
}

impl Heuristic for Euclidean {
    fn get_heuristic(&self, puzzle: &Puzzle) -> f64 {
        euclidean_distance(puzzle)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic for HeuristicKind {
    fn get_heuristic(&self, puzzle: &Puzzle) -> f64 {
        match self {
            HeuristicKind::Manhattan => Manhattan.get_heuristic(puzzle),
            HeuristicKind::Euclidean => Euclidean.get_heuristic(puzzle),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            other => Err(PuzzleError::UnknownHeuristic(other.to_string())),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicKind::Manhattan => write!(f, "manhattan"),
            HeuristicKind::Euclidean => write!(f, "euclidean"),
        }
    }
}
