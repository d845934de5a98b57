use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slide_puzzle_search::search::{self, SearchOutcome, Strategy};
use slide_puzzle_search::tile::serialize_tiles;
use slide_puzzle_search::traits::puzzle::{BoardPrintable, Palette};
use slide_puzzle_search::util::{parse_tiles, read_puzzles};
use slide_puzzle_search::{GoalLayout, Puzzle, SearchConfig, SolvabilityCheck, Solution};

/// Solve N-tile sliding puzzles with breadth-first, depth-limited depth-first or A* search.
#[derive(Parser, Debug)]
#[command(name = "slide-puzzle", version)]
struct Cli {
    /// Tiles row by row, comma separated, 0 is the blank (e.g. "1,2,3,4,5,6,7,0,8").
    /// A random board is generated when omitted; a lone strategy here (`slide-puzzle dfs`)
    /// is read as STRATEGY.
    tiles: Option<String>,

    /// `bfs`, `dfs`, or `<label>,manhattan` / `<label>,euclidean` for A*.
    strategy: Option<String>,

    /// Same as the STRATEGY argument; useful with --batch or random boards.
    #[arg(short, long)]
    search: Option<String>,

    /// Side length of a random board.
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Seed for the random board.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep drawing random boards until one can reach the goal.
    #[arg(long, default_value_t = false)]
    solvable: bool,

    /// Solve every board in FILE, one comma separated board per line.
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,

    /// JSON search configuration; the flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    depth_limit: Option<u32>,

    #[arg(long)]
    max_expansions: Option<usize>,

    /// blank-first (0,1,2,...) or blank-last (1,2,...,0).
    #[arg(long)]
    goal: Option<GoalLayout>,

    /// Solvability check to run before searching: off, legacy or inversions.
    #[arg(long)]
    check: Option<SolvabilityCheck>,

    /// Replay the solution from the initial board before printing it.
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Print the result as JSON instead of drawing boards.
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// No progress spinner.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// More log output; repeat for more detail. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

impl Cli {
    /// Board and strategy positionals. With a single positional that parses as a
    /// strategy, there is no board.
    fn positionals(&self) -> (Option<&str>, Option<&str>) {
        match (self.tiles.as_deref(), self.strategy.as_deref()) {
            (Some(first), None) if first.parse::<Strategy>().is_ok() => (None, Some(first)),
            other => other,
        }
    }

    fn selected_strategy(&self) -> Result<Strategy> {
        let selector = self.search.as_deref().or(self.positionals().1).unwrap_or("bfs");
        Ok(selector.parse()?)
    }
}

/// Returns whether every board was solved.
fn run(cli: &Cli) -> Result<bool> {
    let config = build_config(cli)?;
    let strategy = cli.selected_strategy()?;
    let boards = load_boards(cli, &config)?;

    let mut all_solved = true;
    for (idx, root) in boards.into_iter().enumerate() {
        if cli.batch.is_some() && !cli.json {
            println!("{}", format!("=== board {} ===", idx + 1).as_str().bold());
        }
        all_solved &= solve_one(cli, root, strategy, &config)?;
    }

    Ok(all_solved)
}

fn build_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(depth_limit) = cli.depth_limit {
        config.depth_limit = depth_limit;
    }
    if let Some(max_expansions) = cli.max_expansions {
        config.max_expansions = Some(max_expansions);
    }
    if let Some(goal) = cli.goal {
        config.goal = goal;
    }
    if let Some(check) = cli.check {
        config.solvability = check;
    }

    info!("search configuration: {:?}", config);
    Ok(config)
}

fn load_boards(cli: &Cli, config: &SearchConfig) -> Result<Vec<Puzzle>> {
    let (tiles, _) = cli.positionals();

    if let Some(path) = &cli.batch {
        if tiles.is_some() {
            bail!("pass either a board or --batch, not both");
        }

        let boards = read_puzzles(path).with_context(|| format!("failed to read {}", path.display()))?;
        return boards
            .into_iter()
            .enumerate()
            .map(|(idx, values)| {
                Puzzle::with_goal(values, config.goal).with_context(|| format!("board {} in {}", idx + 1, path.display()))
            })
            .collect();
    }

    if let Some(tiles) = tiles {
        let values = parse_tiles(tiles)?;
        return Ok(vec![Puzzle::with_goal(values, config.goal)?]);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let puzzle = if cli.solvable {
        Puzzle::random_solvable(cli.size, config.goal, &mut rng)?
    } else {
        Puzzle::random(cli.size, config.goal, &mut rng)?
    };
    info!("generated random board {}", serialize_tiles(puzzle.tiles()));

    Ok(vec![puzzle])
}

fn spinner(cli: &Cli, strategy: Strategy) -> ProgressBar {
    if cli.quiet || cli.json {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(format!("searching with {}", strategy));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn solve_one(cli: &Cli, root: Puzzle, strategy: Strategy, config: &SearchConfig) -> Result<bool> {
    let spinner = spinner(cli, strategy);

    let tick = Utc::now();
    let outcome = search::solve(root.clone(), strategy, config);
    let tock = Utc::now();
    spinner.finish_and_clear();

    let outcome = outcome.with_context(|| format!("cannot search from {}", serialize_tiles(root.tiles())))?;
    let elapsed = (tock - tick).num_microseconds().unwrap_or(i64::MAX) as f64 / 1_000_000.0;

    if cli.verify {
        if let Some(solution) = outcome.solution() {
            solution.verify(&root).context("solution failed verification")?;
            info!("solution verified");
        }
    }

    if cli.json {
        let report = serde_json::json!({
            "initial": root,
            "strategy": strategy.to_string(),
            "running_time_secs": elapsed,
            "result": &outcome,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(outcome.is_solved());
    }

    match &outcome {
        SearchOutcome::Solved(solution) => {
            print_solution(solution, cli.no_color);
            println!("Running Time: {:.4} sec", elapsed);
            Ok(true)
        }
        SearchOutcome::Exhausted { reason, stats } => {
            eprintln!(
                "{} {} found no solution: {}",
                "unsolved:".yellow().bold(),
                strategy,
                reason
            );
            eprintln!("Nodes Expanded: {}", stats.expanded);
            eprintln!("Running Time: {:.4} sec", elapsed);
            Ok(false)
        }
    }
}

fn print_solution(solution: &Solution, no_color: bool) {
    let (progress, done) = if no_color {
        (Palette::Plain, Palette::Plain)
    } else {
        (Palette::Progress, Palette::Done)
    };

    let last = solution.states.len() - 1;
    for (idx, state) in solution.states.iter().enumerate() {
        state.print_board(if idx == last { done } else { progress });
        println!("DIRECTION: {}", state.direction());
    }

    let stars = "*".repeat(solution.goal().size());
    println!("{} DONE {}", stars, stars);
    println!();
    println!("Path Taken: {}", solution.path_taken());
    println!("Cost of that path: {}", solution.cost);
    println!("Nodes Expanded: {}", solution.nodes_expanded);
    println!("Search Depth: {}", solution.depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slide-puzzle").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn lone_strategy_positional_means_random_board() {
        let cli = parse(&["dfs"]);
        assert_eq!(cli.positionals(), (None, Some("dfs")));
        assert_eq!(cli.selected_strategy().unwrap(), Strategy::DepthLimited);

        let cli = parse(&["ast,euclidean", "--seed", "4"]);
        assert_eq!(cli.positionals(), (None, Some("ast,euclidean")));
    }

    #[test]
    fn board_positional_keeps_its_place() {
        let cli = parse(&["1,2,3,0"]);
        assert_eq!(cli.positionals(), (Some("1,2,3,0"), None));
        assert_eq!(cli.selected_strategy().unwrap(), Strategy::BreadthFirst);

        let cli = parse(&["1,2,3,0", "dfs", "--search", "ast,manhattan"]);
        assert_eq!(cli.positionals(), (Some("1,2,3,0"), Some("dfs")));
        assert!(matches!(cli.selected_strategy().unwrap(), Strategy::AStar(_)));
    }
}
