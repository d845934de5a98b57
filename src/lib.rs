//! Sliding tile puzzle (the generalized 8-puzzle) and three ways to solve it:
//! breadth-first search, depth-limited depth-first search, and A* with a Manhattan or
//! Euclidean heuristic.
//!
//! ```no_run
//! use slide_puzzle_search::{search, GoalLayout, Puzzle, SearchConfig, Strategy};
//!
//! let config = SearchConfig::default().with_goal(GoalLayout::BlankLast);
//! let root = Puzzle::with_goal(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], config.goal).unwrap();
//! let outcome = search::solve(root, "astar,manhattan".parse::<Strategy>().unwrap(), &config).unwrap();
//! assert_eq!(outcome.solution().unwrap().cost, 1);
//! ```

pub mod arena;
pub mod config;
pub mod frontier;
pub mod heuristic;
pub mod puzzle;
pub mod report;
pub mod search;
pub mod tile;
pub mod traits;
pub mod util;

pub use config::{SearchConfig, SolvabilityCheck};
pub use heuristic::{euclidean_distance, manhattan_distance, Euclidean, HeuristicKind, Manhattan};
pub use puzzle::{Direction, Puzzle, PuzzleError};
pub use report::{SearchStats, Solution};
pub use search::{Exhaustion, SearchOutcome, Strategy};
pub use tile::{GoalLayout, Tile};
