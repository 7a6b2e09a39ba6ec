use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flexi_logger::Logger;
use pathlab_demos::{GRAPH_ALGORITHMS, random_grid, render, replay, report_table};
use pathlab_search::heuristic::IdDistance;
use pathlab_search::{
    Algorithm, HeuristicKind, Network, Recorder, SearchConfig, TrackingAllocator, astar_with, compare, measure,
    measure_algorithm,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Random obstacle grid, rendered as text
    Grid,
    /// Random connected weighted graph
    Graph,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Choice {
    Bfs,
    Dfs,
    Dijkstra,
    AstarManhattan,
    AstarEuclidean,
}

impl From<Choice> for Algorithm {
    fn from(c: Choice) -> Self {
        match c {
            Choice::Bfs => Algorithm::Bfs,
            Choice::Dfs => Algorithm::Dfs,
            Choice::Dijkstra => Algorithm::Dijkstra,
            Choice::AstarManhattan => Algorithm::AStar(HeuristicKind::Manhattan),
            Choice::AstarEuclidean => Algorithm::AStar(HeuristicKind::Euclidean),
        }
    }
}

/// Run and compare path searches on random grids and graphs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Kind of search space to generate
    #[arg(short, long, value_enum, default_value_t = Mode::Grid)]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value_t = 30)]
    width: i32,

    /// Grid height
    #[arg(long, default_value_t = 15)]
    height: i32,

    /// Obstacle probability (grid) or edge probability (graph)
    #[arg(short, long, default_value_t = 0.25)]
    density: f64,

    /// Number of graph vertices
    #[arg(short, long, default_value_t = 200)]
    nodes: usize,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Algorithm whose exploration is drawn on the grid
    #[arg(short, long, value_enum, default_value_t = Choice::AstarManhattan)]
    algorithm: Choice,

    /// Stop the drawn search after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Color the rendered grid
    #[arg(long)]
    color: bool,

    /// Log specification, e.g. "debug" or "pathlab_search=trace"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_str(&args.log_level)?.start()?;
    log::info!("{args:?}");

    let mut rng = StdRng::seed_from_u64(args.seed);
    match args.mode {
        Mode::Grid => run_grid(&args, &mut rng),
        Mode::Graph => run_graph(&args, &mut rng),
    }
}

fn run_grid(args: &Args, rng: &mut StdRng) -> Result<()> {
    let mut grid = random_grid(args.width, args.height, args.density, rng);
    let start = grid.start().context("grid has no start")?;
    let goal = grid.goal().context("grid has no goal")?;

    let config = SearchConfig {
        max_expansions: args.max_expansions,
    };
    let mut rec = Recorder::new();
    let (result, report) = measure_algorithm(args.algorithm.into(), &grid, start, goal, &mut rec, &config, &ALLOC)?;
    replay(&mut grid, &rec.steps, &result.path);
    println!("{}", render(&grid, args.color));
    println!("{report}\n");

    grid.clear_search_marks();
    let reports = compare(&grid, start, goal, &Algorithm::GRID, &ALLOC)?;
    print!("{}", report_table(&reports));
    Ok(())
}

fn run_graph(args: &Args, rng: &mut StdRng) -> Result<()> {
    let net = Network::random_connected(args.nodes, args.density, rng);
    let (start, goal) = (0, args.nodes.saturating_sub(1) as u64);
    println!(
        "graph: {} vertices, {} edges, {start} -> {goal}\n",
        net.len(),
        net.edge_count() / 2
    );

    let mut reports = compare(&net, start, goal, &GRAPH_ALGORITHMS, &ALLOC)?;
    let (_, by_index) = measure("A* (index)", &ALLOC, |phases| {
        astar_with(&net, start, goal, IdDistance, (), &SearchConfig::default(), phases)
    })?;
    reports.push(by_index);
    print!("{}", report_table(&reports));
    Ok(())
}
