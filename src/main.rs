//! Plan a store route from the command line.
//!
//! Usage: `aisle-router [--layout store.json] <aisle>...`
//!
//! Prints the planned route as JSON on stdout. Logs go to stderr; set
//! `RUST_LOG=debug` to see path cache activity.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aisle_router::graph::StoreGraph;
use aisle_router::solver::{PlanOptions, RoutePlanner};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

/// Plan the shortest walk through a store for a list of aisles.
#[derive(Parser, Debug)]
#[command(name = "aisle-router")]
#[command(about = "Plan a store route for a shopping list")]
struct Cli {
    /// Store layout JSON; the bundled demo store when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Aisle names to visit, e.g. `grocery "pet care"`.
    aisles: Vec<String>,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let graph = match &cli.layout {
        Some(path) => {
            info!(path = %path.display(), "loading store layout");
            StoreGraph::from_path(path)?
        }
        None => StoreGraph::bundled(),
    };

    let planner = RoutePlanner::new(&graph, PlanOptions::default());
    let route = planner.plan_aisles(cli.aisles.iter().map(String::as_str))?;
    if !route.unresolved_aisles.is_empty() {
        warn!(unresolved = ?route.unresolved_aisles, "skipping aisles not found in this store");
    }
    info!(
        cost = route.tour.cost,
        stops = route.tour.stops().len(),
        walking_m = route.geometry.walking_distance_m,
        "route planned"
    );

    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "route planning failed");
            ExitCode::FAILURE
        }
    }
}
