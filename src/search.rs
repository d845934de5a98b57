use std::fmt;
use std::str::FromStr;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use serde::Serialize;
use crate::arena::StateArena;
use crate::config::SearchConfig;
use crate::frontier::{BestFirst, Entry, Fifo, Frontier, Lifo};
use crate::heuristic::HeuristicKind;
use crate::puzzle::{Puzzle, PuzzleError};
use crate::report::{reconstruct, SearchStats, Solution};
use crate::tile::Tile;
use crate::traits::puzzle::Heuristic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BreadthFirst,
    DepthLimited,
    AStar(HeuristicKind),
}

impl FromStr for Strategy {
    type Err = PuzzleError;

    /// `bfs`, `dfs`, or `<label>,<heuristic>` for A*; the label is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim().to_ascii_lowercase();

        match selector.as_str() {
            "bfs" => Ok(Strategy::BreadthFirst),
            "dfs" => Ok(Strategy::DepthLimited),
            _ => match selector.split_once(',') {
                Some((_, heuristic)) => Ok(Strategy::AStar(heuristic.parse()?)),
                None => Err(PuzzleError::UnknownStrategy(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "bfs"),
            Strategy::DepthLimited => write!(f, "dfs"),
            Strategy::AStar(heuristic) => write!(f, "astar,{}", heuristic),
        }
    }
}

/// Why a search stopped without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhaustion {
    /// Every reachable state was expanded.
    SpaceExhausted,
    /// States at the depth limit were left unexpanded; a deeper solution may exist.
    DepthLimited { limit: u32 },
    ExpansionCap { limit: usize },
}

impl fmt::Display for Exhaustion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exhaustion::SpaceExhausted => write!(f, "every reachable state was explored"),
            Exhaustion::DepthLimited { limit } => {
                write!(f, "no solution within the depth limit of {} moves", limit)
            }
            Exhaustion::ExpansionCap { limit } => {
                write!(f, "stopped after expanding {} states", limit)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Solved(Solution),
    Exhausted { reason: Exhaustion, stats: SearchStats },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Exhausted { stats, .. } => stats,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Limits {
    depth_limit: Option<u32>,
    max_expansions: Option<usize>,
}

/// Runs the optional solvability check from `config`, then the selected strategy.
///
/// Every entry point searches towards `config.goal`, whatever layout `root` was
/// built with.
pub fn solve(root: Puzzle, strategy: Strategy, config: &SearchConfig) -> Result<SearchOutcome, PuzzleError> {
    let root = root.retarget(config.goal);
    config.solvability.run(&root)?;

    let outcome = match strategy {
        Strategy::BreadthFirst => breadth_first(root, config),
        Strategy::DepthLimited => depth_limited(root, config),
        Strategy::AStar(heuristic) => a_star(root, heuristic, config),
    };

    Ok(outcome)
}

pub fn breadth_first(root: Puzzle, config: &SearchConfig) -> SearchOutcome {
    let limits = Limits {
        max_expansions: config.max_expansions,
        ..Limits::default()
    };
    run("bfs", root.retarget(config.goal), Fifo::default(), limits)
}

/// Depth-first search that never expands a state `config.depth_limit` or more moves
/// from the root. There is no iterative deepening, so an instance whose shortest
/// solution is deeper than the limit comes back as [`Exhaustion::DepthLimited`].
pub fn depth_limited(root: Puzzle, config: &SearchConfig) -> SearchOutcome {
    let limits = Limits {
        depth_limit: Some(config.depth_limit),
        max_expansions: config.max_expansions,
    };
    run("dfs", root.retarget(config.goal), Lifo::default(), limits)
}

pub fn a_star<H: Heuristic>(root: Puzzle, heuristic: H, config: &SearchConfig) -> SearchOutcome {
    let limits = Limits {
        max_expansions: config.max_expansions,
        ..Limits::default()
    };
    run("astar", root.retarget(config.goal), BestFirst::new(heuristic), limits)
}

/// Shared expansion loop. A state is marked explored when it leaves the frontier and
/// goal-tested right after; children already explored or already queued are dropped.
fn run<F: Frontier>(label: &str, root: Puzzle, mut frontier: F, limits: Limits) -> SearchOutcome {
    let mut arena = StateArena::new();
    let mut explored: FxHashSet<Vec<Tile>> = FxHashSet::default();
    let mut queued: FxHashSet<Vec<Tile>> = FxHashSet::default();
    let mut stats = SearchStats::default();
    let mut deepest = 0;

    debug!("{}: searching from {}", label, crate::tile::serialize_tiles(root.tiles()));

    queued.insert(root.tiles().to_vec());
    let root_id = arena.insert(root);
    frontier.push(Entry { id: root_id, depth: 0 }, &arena[root_id]);
    stats.max_frontier = frontier.len();

    while let Some(entry) = frontier.pop() {
        let puzzle = &arena[entry.id];
        queued.remove(puzzle.tiles());
        explored.insert(puzzle.tiles().to_vec());
        stats.expanded += 1;

        if entry.depth > deepest {
            deepest = entry.depth;
            debug!("{}: reached depth {} after {} expansions", label, deepest, stats.expanded);
        }

        if puzzle.is_solved() {
            let solution = reconstruct(&arena, entry.id, stats);
            debug!(
                "{}: solved in {} moves, {} states expanded",
                label, solution.cost, solution.nodes_expanded
            );
            return SearchOutcome::Solved(solution);
        }

        if let Some(limit) = limits.max_expansions {
            if stats.expanded >= limit {
                debug!("{}: expansion cap of {} reached", label, limit);
                return SearchOutcome::Exhausted {
                    reason: Exhaustion::ExpansionCap { limit },
                    stats,
                };
            }
        }

        if let Some(limit) = limits.depth_limit {
            if entry.depth >= limit {
                stats.pruned += 1;
                continue;
            }
        }

        let children = puzzle.children();
        for child in children {
            if explored.contains(child.tiles()) || queued.contains(child.tiles()) {
                stats.duplicates += 1;
                continue;
            }

            queued.insert(child.tiles().to_vec());
            let id = arena.insert(child.adopted_by(entry.id));
            frontier.push(Entry { id, depth: entry.depth + 1 }, &arena[id]);
            stats.generated += 1;
        }

        stats.max_frontier = stats.max_frontier.max(frontier.len());
        trace!(
            "{}: expanded {:?} at depth {}, frontier {}",
            label,
            entry.id,
            entry.depth,
            frontier.len()
        );
    }

    let reason = match limits.depth_limit {
        Some(limit) if stats.pruned > 0 => Exhaustion::DepthLimited { limit },
        _ => Exhaustion::SpaceExhausted,
    };
    debug!("{}: exhausted after {} expansions ({})", label, stats.expanded, reason);

    SearchOutcome::Exhausted { reason, stats }
}
