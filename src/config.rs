use std::fs;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::puzzle::{Puzzle, PuzzleError};
use crate::tile::GoalLayout;

pub const DEFAULT_DEPTH_LIMIT: u32 = 50;

/// Which parity check, if any, runs before a search starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolvabilityCheck {
    #[default]
    Off,
    /// [`Puzzle::can_be_solved`]
    Legacy,
    /// [`Puzzle::is_solvable`]
    Inversions,
}

impl SolvabilityCheck {
    pub fn run(&self, puzzle: &Puzzle) -> Result<(), PuzzleError> {
        match self {
            SolvabilityCheck::Off => Ok(()),
            SolvabilityCheck::Legacy => puzzle.can_be_solved(),
            SolvabilityCheck::Inversions => puzzle.check_solvable(),
        }
    }
}

impl FromStr for SolvabilityCheck {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_ascii_lowercase()))
            .map_err(PuzzleError::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// States this many moves from the root are goal-tested but never expanded by
    /// depth-limited search.
    pub depth_limit: u32,
    /// Stop any strategy after expanding this many states.
    pub max_expansions: Option<usize>,
    pub goal: GoalLayout,
    pub solvability: SolvabilityCheck,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            max_expansions: None,
            goal: GoalLayout::default(),
            solvability: SolvabilityCheck::default(),
        }
    }
}

impl SearchConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn with_depth_limit(mut self, depth_limit: u32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_goal(mut self, goal: GoalLayout) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_solvability(mut self, solvability: SolvabilityCheck) -> Self {
        self.solvability = solvability;
        self
    }
}

impl FromStr for SearchConfig {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SearchConfig = r#"{ "depth_limit": 12 }"#.parse().unwrap();
        assert_eq!(config.depth_limit, 12);
        assert_eq!(config.max_expansions, None);
        assert_eq!(config.goal, GoalLayout::BlankFirst);
        assert_eq!(config.solvability, SolvabilityCheck::Off);
    }

    #[test]
    fn parses_every_field() {
        let config: SearchConfig = r#"{
            "depth_limit": 20,
            "max_expansions": 1000,
            "goal": "blank-last",
            "solvability": "inversions"
        }"#
        .parse()
        .unwrap();

        assert_eq!(
            config,
            SearchConfig::default()
                .with_depth_limit(20)
                .with_max_expansions(1000)
                .with_goal(GoalLayout::BlankLast)
                .with_solvability(SolvabilityCheck::Inversions)
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            r#"{ "depth": 3 }"#.parse::<SearchConfig>(),
            Err(PuzzleError::Config(_))
        ));
    }

    #[test]
    fn solvability_check_from_str() {
        assert_eq!("Legacy".parse::<SolvabilityCheck>().unwrap(), SolvabilityCheck::Legacy);
        assert!("sometimes".parse::<SolvabilityCheck>().is_err());
    }
}
