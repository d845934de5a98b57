use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::puzzle::PuzzleError;

/// Where the blank sits once the board is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalLayout {
    /// `0, 1, 2, …, size²-1`
    #[default]
    BlankFirst,
    /// `1, 2, …, size²-1, 0`
    BlankLast,
}

impl FromStr for GoalLayout {
    type Err = PuzzleError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        match str.trim().to_ascii_lowercase().as_str() {
            "blank-first" | "first" => Ok(GoalLayout::BlankFirst),
            "blank-last" | "last" => Ok(GoalLayout::BlankLast),
            other => Err(PuzzleError::UnknownGoalLayout(other.to_string())),
        }
    }
}

impl GoalLayout {
    pub fn tiles(&self, size: usize) -> Vec<Tile> {
        let len = size * size;
        (0..len).map(|idx| self.tile_at(idx, len)).collect()
    }

    fn tile_at(&self, idx: usize, len: usize) -> Tile {
        match self {
            GoalLayout::BlankFirst => Tile(idx as u16),
            GoalLayout::BlankLast => Tile(((idx + 1) % len) as u16),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(pub u16);

impl Tile {
    pub const BLANK: Tile = Tile(0);

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0 == 0
    }

    /// Flat index of the cell this tile occupies on a solved board.
    pub fn solved_idx(&self, size: usize, goal: GoalLayout) -> usize {
        let value = self.0 as usize;
        match goal {
            GoalLayout::BlankFirst => value,
            GoalLayout::BlankLast if value == 0 => size * size - 1,
            GoalLayout::BlankLast => value - 1,
        }
    }

    pub fn solved_position(&self, size: usize, goal: GoalLayout) -> (usize, usize) {
        let idx = self.solved_idx(size, goal);
        (idx / size, idx % size)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

pub fn serialize_tiles(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.0.to_string()).collect::<Vec<_>>().join(",")
}
