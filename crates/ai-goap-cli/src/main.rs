//! goap CLI - plan against an action catalog.
//!
//! - `goap --catalog FILE plan` - print the cheapest plan from `start` to `goal`
//! - `goap --catalog FILE plan --trace` - also print every node on the path
//! - `goap --catalog FILE describe` - dump the registered action templates

use std::path::{Path, PathBuf};

use ai_goap::{ActionCatalog, ActionPlanner, SearchNode};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "goap")]
#[command(about = "Goal-oriented action planner", version)]
struct Cli {
    /// Action catalog (.yaml, .yml or .json)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the cheapest plan
    Plan {
        /// Print every node on the winning path
        #[arg(long)]
        trace: bool,
    },

    /// Describe registered actions
    Describe,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let catalog = load_catalog(&cli.catalog)?;
    let (planner, _) = catalog
        .build_planner()
        .context("Failed to register catalog actions")?;

    match cli.command {
        Commands::Plan { trace } => run_plan(&catalog, planner, trace),
        Commands::Describe => {
            print!("{}", planner.describe());
            Ok(())
        }
    }
}

fn load_catalog(path: &Path) -> Result<ActionCatalog> {
    let catalog = ActionCatalog::load(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    tracing::info!(
        catalog = %path.display(),
        actions = catalog.actions.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

fn run_plan(catalog: &ActionCatalog, mut planner: ActionPlanner, trace: bool) -> Result<()> {
    let start = catalog.start_state(&planner)?;
    let goal = catalog.goal_state(&planner)?;

    let mut selected = Vec::new();
    let plan = planner
        .plan(start, goal, trace.then_some(&mut selected))
        .context("Planning failed")?;

    let Some(plan) = plan else {
        println!("no plan: goal unreachable from start");
        return Ok(());
    };

    println!("plan (cost {}):", plan.cost());
    for (step, name) in plan.names().iter().enumerate() {
        println!("  {}. {}", step + 1, name);
    }

    if trace {
        print_trace(&planner, &selected);
    }
    Ok(())
}

fn print_trace(planner: &ActionPlanner, nodes: &[SearchNode]) {
    println!();
    println!("path:");
    for node in nodes {
        let action = node
            .action
            .and_then(|id| planner.action(id).ok())
            .map_or("start", |action| action.name());
        println!(
            "  {:<15} g={:<3} {}",
            action,
            node.cost_so_far,
            node.state.describe(planner)
        );
    }
}
