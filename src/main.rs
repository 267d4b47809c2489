mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tile_puzzle_solver::{
    Algorithm, Configuration, SolverOptions, Weighting,
    is_solvable,
    solver::{DEFAULT_WEIGHT, heuristic::estimate},
};

use std::io::{IsTerminal, Read, stdin};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board
    Solve {
        #[command(flatten)]
        source: BoardSource,
        #[command(flatten)]
        search: SearchArgs,
        /// Search algorithm
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Astar)]
        algorithm: AlgorithmArg,
        /// Print every state along the solution
        #[arg(long)]
        states: bool,
    },
    /// Tell whether a board can be solved
    Check {
        #[command(flatten)]
        source: BoardSource,
    },
    /// Print random boards, one per line, after the seed that produced them
    Generate {
        /// Board size N
        #[arg(short, long, default_value_t = 3, value_name = "N")]
        size: usize,
        /// Number of boards
        #[arg(short = 'n', long, default_value_t = 1, value_name = "NUM")]
        count: usize,
        /// Scramble the goal with this many slides instead of shuffling (always solvable)
        #[arg(long, value_name = "MOVES")]
        scramble: Option<usize>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run several algorithms side by side on the same board
    Compare {
        #[command(flatten)]
        source: BoardSource,
        #[command(flatten)]
        search: SearchArgs,
        /// Algorithms to run; all of them when omitted
        #[arg(short, long = "algorithm", value_enum, value_name = "ALGORITHM")]
        algorithms: Vec<AlgorithmArg>,
    },
}

#[derive(Args)]
struct BoardSource {
    /// Path to a board file; stdin is read when omitted and not a terminal
    file: Option<PathBuf>,
    /// Solve a random NxN board instead of reading one
    #[arg(short, long, value_name = "N", conflicts_with = "file")]
    random: Option<usize>,
    /// With --random, scramble the goal with this many slides instead of shuffling
    #[arg(long, value_name = "MOVES", requires = "random")]
    scramble: Option<usize>,
    /// Seed for board generation and neighbor ordering
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SearchArgs {
    /// Heuristic weight W for the weighted searches (h is scaled by 1 + W)
    #[arg(short, long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,
    /// Depth at which dynamic weighting decays to plain search
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Astar,
    Idastar,
    WastarStatic,
    WastarDynamic,
}

impl AlgorithmArg {
    fn to_algorithm(self, weight: f64) -> Algorithm {
        match self {
            AlgorithmArg::Astar => Algorithm::BestFirst,
            AlgorithmArg::Idastar => Algorithm::IterativeDeepening,
            AlgorithmArg::WastarStatic => Algorithm::Weighted {
                weight,
                mode: Weighting::Static,
            },
            AlgorithmArg::WastarDynamic => Algorithm::Weighted {
                weight,
                mode: Weighting::Dynamic,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Solve {
            source,
            search,
            algorithm,
            states,
        } => {
            let board = load_board(&source)?;
            let algorithm = algorithm.to_algorithm(search.weight);
            let options = search.options(&board, algorithm, source.seed);
            do_solve(board, options, states)?;
        }
        Commands::Check { source } => {
            let board = load_board(&source)?;
            println!("{}", board.pretty_print());
            if is_solvable(&board) {
                println!("✓ Solvable. Manhattan distance: {}", estimate(&board));
            } else {
                println!("✗ Not solvable.");
            }
        }
        Commands::Generate {
            size,
            count,
            scramble,
            seed,
        } => {
            let seed = seed.unwrap_or(rand::random());
            let mut rng = SmallRng::seed_from_u64(seed);
            println!("{seed}");
            for _ in 0..count {
                let board = match scramble {
                    Some(moves) => Configuration::scrambled(size, moves, &mut rng),
                    None => Configuration::random(size, &mut rng),
                }
                .context("Failed to generate board")?;
                println!("{board}");
            }
        }
        Commands::Compare {
            source,
            search,
            algorithms,
        } => {
            let board = load_board(&source)?;
            let algorithms = if algorithms.is_empty() {
                AlgorithmArg::value_variants().to_vec()
            } else {
                algorithms
            };
            let options: Vec<SolverOptions> = algorithms
                .iter()
                .map(|a| search.options(&board, a.to_algorithm(search.weight), source.seed))
                .collect();
            do_compare(board, options)?;
        }
    }

    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

impl SearchArgs {
    fn options(
        &self,
        board: &Configuration,
        algorithm: Algorithm,
        seed: Option<u64>,
    ) -> SolverOptions {
        SolverOptions {
            dimension: board.dimension(),
            algorithm,
            seed,
            max_depth: self.max_depth,
        }
    }
}

fn load_board(source: &BoardSource) -> Result<Configuration> {
    if let Some(file) = &source.file {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        Configuration::parse(&content).context("Failed to parse board")
    } else if let Some(size) = source.random {
        let mut rng = SmallRng::seed_from_u64(source.seed.unwrap_or(rand::random()));
        let board = match source.scramble {
            Some(moves) => Configuration::scrambled(size, moves, &mut rng),
            None => Configuration::random(size, &mut rng),
        };
        board.context("Failed to generate board")
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Configuration::parse(&content).context("Failed to parse board")
    } else {
        bail!("No board `file` or `--random` size provided.");
    }
}
