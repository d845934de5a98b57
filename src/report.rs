use serde::Serialize;
use crate::arena::{NodeId, StateArena};
use crate::puzzle::{Direction, Puzzle, PuzzleError};

/// Counters kept by the search loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped from the frontier and marked explored.
    pub expanded: usize,
    /// Children admitted into the frontier.
    pub generated: usize,
    /// Children dropped because they were already explored or queued.
    pub duplicates: usize,
    /// States left unexpanded because of the depth limit.
    pub pruned: usize,
    pub max_frontier: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Root first, goal last.
    pub states: Vec<Puzzle>,
    pub cost: u32,
    pub nodes_expanded: usize,
    pub depth: usize,
    pub stats: SearchStats,
}

impl Solution {
    pub fn root(&self) -> &Puzzle {
        &self.states[0]
    }

    pub fn goal(&self) -> &Puzzle {
        &self.states[self.states.len() - 1]
    }

    /// Moves applied to the root, excluding the `Start` label.
    pub fn moves(&self) -> Vec<Direction> {
        self.states.iter().skip(1).map(|s| s.direction()).collect()
    }

    pub fn moves_str(&self) -> String {
        self.moves().iter().map(|d| d.to_char()).collect()
    }

    /// `Start -> Up -> Left -> ...`
    pub fn path_taken(&self) -> String {
        self.states
            .iter()
            .map(|s| s.direction().to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Replays the moves from `root` and checks that they reach a solved board at the
    /// reported cost.
    pub fn verify(&self, root: &Puzzle) -> Result<(), PuzzleError> {
        let mut puzzle = root.clone();
        for direction in self.moves() {
            puzzle = puzzle.apply(direction)?;
        }

        if !puzzle.is_solved() {
            return Err(PuzzleError::IllegalMove(format!(
                "moves {} do not solve the board",
                self.moves_str()
            )));
        }
        if puzzle.cost() != self.cost {
            return Err(PuzzleError::IllegalMove(format!(
                "replayed cost {} differs from reported cost {}",
                puzzle.cost(),
                self.cost
            )));
        }

        Ok(())
    }
}

/// Rebuild the root-to-goal path by following parent handles from `goal`.
pub fn reconstruct(arena: &StateArena, goal: NodeId, stats: SearchStats) -> Solution {
    let mut states: Vec<Puzzle> = arena.ancestors(goal).cloned().collect();
    states.reverse();

    let cost = arena[goal].cost();
    let depth = arena.depth_of(goal);

    Solution {
        states,
        cost,
        nodes_expanded: stats.expanded,
        depth,
        stats,
    }
}
