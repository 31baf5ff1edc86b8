use std::time::Instant;

use clap::{Parser, ValueEnum};

use npuzzle::heuristic::{self, Heuristic};
use npuzzle::puzzle::PuzzleState;
use npuzzle::search::{self, Strategy};

#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(about = "Solve sliding n-puzzles with blind and informed graph search")]
struct Cli {
    /// Board side length
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=16))]
    size: u8,

    /// Search strategy to run
    #[arg(long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,

    /// Heuristic for the informed strategies
    #[arg(long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Solve a random solvable configuration instead of the built-in demo grid
    #[arg(long)]
    scramble: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    Greedy,
    Astar,
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Bfs => vec![Strategy::BreadthFirst],
            StrategyArg::Dfs => vec![Strategy::DepthFirst],
            StrategyArg::Greedy => vec![Strategy::GreedyBestFirst],
            StrategyArg::Astar => vec![Strategy::AStar],
            StrategyArg::All => vec![
                Strategy::BreadthFirst,
                Strategy::DepthFirst,
                Strategy::GreedyBestFirst,
                Strategy::AStar,
            ],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Misplaced,
    Manhattan,
    LinearConflict,
}

impl HeuristicArg {
    fn function(self) -> Heuristic {
        match self {
            HeuristicArg::Misplaced => heuristic::misplaced_tiles,
            HeuristicArg::Manhattan => heuristic::manhattan_distance,
            HeuristicArg::LinearConflict => heuristic::linear_conflict,
        }
    }

    fn label(self) -> &'static str {
        match self {
            HeuristicArg::Misplaced => "Misplaced Tiles",
            HeuristicArg::Manhattan => "Manhattan Distance",
            HeuristicArg::LinearConflict => "Linear Conflict",
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let size = cli.size as usize;

    let start = if cli.scramble || size != 3 {
        let mut rng = rand::thread_rng();
        PuzzleState::scrambled(size, &mut rng)
    } else {
        // the classic easy 8-puzzle instance, 7 moves from the goal
        PuzzleState::from_rows(&[vec![1, 4, 2], vec![0, 5, 8], vec![3, 6, 7]])
            .expect("demo grid is well-formed")
    };

    println!("{}", start);

    for strategy in cli.strategy.strategies() {
        run_strategy(&start, strategy, cli.heuristic);
    }
}

fn run_strategy(start: &PuzzleState, strategy: Strategy, heuristic: HeuristicArg) {
    let informed = matches!(strategy, Strategy::GreedyBestFirst | Strategy::AStar);
    if informed {
        println!("==== {} ({}) ====", strategy, heuristic.label());
    } else {
        println!("==== {} ====", strategy);
    }

    let begin = Instant::now();
    let outcome = search::solve(start, strategy, heuristic.function());
    let elapsed = begin.elapsed();

    match &outcome.plan {
        None => println!("No solution found."),
        Some(plan) => {
            let actions: Vec<String> = plan.iter().map(|mv| mv.to_string()).collect();
            println!("Solution has {} actions.", plan.len());
            println!("[{}]", actions.join(", "));
        }
    }
    println!("Total states expanded: {}.", outcome.states_expanded);
    println!("Max fringe size: {}.", outcome.max_fringe);
    println!("Total time: {:.3}s", elapsed.as_secs_f64());
    println!();
}
