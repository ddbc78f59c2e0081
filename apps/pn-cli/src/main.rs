use clap::{Parser, Subcommand};
use pn_core::{Real, VertexId};
use pn_graph::RefineConfig;
use pn_project::{ProjectResult, StationNetwork};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "PolarNet CLI - base station range and path queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate station map syntax and structure
    Validate {
        /// Path to the station map (YAML, or JSON by extension)
        map_path: PathBuf,
    },
    /// List stations with their positions and link counts
    Stations {
        /// Path to the station map
        map_path: PathBuf,
    },
    /// Show breadth-first layers reachable from a station
    Layers {
        /// Path to the station map
        map_path: PathBuf,
        /// Station to start from
        start: String,
        /// Radio range; unlimited when omitted
        #[arg(short, long)]
        radius: Option<f64>,
    },
    /// Find a path whose stations all lie within range of the start
    Path {
        /// Path to the station map
        map_path: PathBuf,
        /// Station to start from
        from: String,
        /// Station to reach
        to: String,
        /// Radio range
        #[arg(short, long)]
        radius: f64,
    },
    /// Distance to the farthest station on the map
    Range {
        /// Path to the station map
        map_path: PathBuf,
        /// Station to measure from
        station: String,
    },
    /// Estimate the smallest radio range that gets from one station to another
    MinRange {
        /// Path to the station map
        map_path: PathBuf,
        /// Station to start from
        from: String,
        /// Station to reach
        to: String,
        /// Maximum number of refinement rounds
        #[arg(long, default_value_t = 10)]
        max_iterations: usize,
        /// Radius decrement between rounds
        #[arg(long, default_value_t = 0.01)]
        step: f64,
    },
}

fn main() -> ProjectResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { map_path } => cmd_validate(&map_path),
        Commands::Stations { map_path } => cmd_stations(&map_path),
        Commands::Layers {
            map_path,
            start,
            radius,
        } => cmd_layers(&map_path, &start, radius.unwrap_or(Real::INFINITY)),
        Commands::Path {
            map_path,
            from,
            to,
            radius,
        } => cmd_path(&map_path, &from, &to, radius),
        Commands::Range { map_path, station } => cmd_range(&map_path, &station),
        Commands::MinRange {
            map_path,
            from,
            to,
            max_iterations,
            step,
        } => {
            let config = RefineConfig::new()
                .with_max_iterations(max_iterations)
                .with_step(step);
            cmd_min_range(&map_path, &from, &to, &config)
        }
    }
}

fn load_network(map_path: &Path) -> ProjectResult<StationNetwork> {
    let map = pn_project::load_any(map_path)?;
    let network = StationNetwork::from_map(&map)?;
    info!(
        path = %map_path.display(),
        stations = network.graph().vertex_count(),
        links = network.graph().edge_count(),
        "loaded station map"
    );
    Ok(network)
}

fn format_path(network: &StationNetwork, path: &[VertexId]) -> String {
    path.iter()
        .map(|&v| network.display_label(v))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn cmd_validate(map_path: &Path) -> ProjectResult<()> {
    println!("Validating station map: {}", map_path.display());
    let network = load_network(map_path)?;
    network.graph().check_consistency()?;
    println!(
        "✓ Map is valid ({} stations, {} links)",
        network.graph().vertex_count(),
        network.graph().edge_count()
    );
    Ok(())
}

fn cmd_stations(map_path: &Path) -> ProjectResult<()> {
    let network = load_network(map_path)?;
    let graph = network.graph();

    if graph.is_empty() {
        println!("No stations found in map");
    } else {
        println!("Stations in '{}':", network.name());
        for vertex in graph.vertices() {
            println!(
                "  {} at {} ({} links)",
                network.display_label(vertex.id),
                vertex.position,
                vertex.degree()
            );
        }
    }
    Ok(())
}

fn cmd_layers(map_path: &Path, start: &str, radius: Real) -> ProjectResult<()> {
    let network = load_network(map_path)?;
    let start_id = network.id_of(start)?;
    let traversal = network.graph().bounded_bfs(start_id, radius)?;
    debug!(start, radius, reached = traversal.reached_count(), "layers computed");

    println!("Layers from {} (radius {}):", start, radius);
    for (hops, layer) in traversal.layers().iter().enumerate() {
        let names: Vec<String> = layer.iter().map(|&v| network.display_label(v)).collect();
        println!("  {}: {}", hops, names.join(", "));
    }
    println!("  Reached: {} stations", traversal.reached_count());
    Ok(())
}

fn cmd_path(map_path: &Path, from: &str, to: &str, radius: Real) -> ProjectResult<()> {
    let network = load_network(map_path)?;
    let start = network.id_of(from)?;
    let end = network.id_of(to)?;

    let path = network.graph().find_path(start, end, radius)?;
    debug!(from, to, radius, found = path.is_some(), "path search finished");
    match path {
        Some(path) => {
            println!("✓ Path found ({} hops)", path.len() - 1);
            println!("  {}", format_path(&network, &path));
        }
        None => println!("No path from {} to {} within radius {}", from, to, radius),
    }
    Ok(())
}

fn cmd_range(map_path: &Path, station: &str) -> ProjectResult<()> {
    let network = load_network(map_path)?;
    let id = network.id_of(station)?;
    let range = network.graph().max_eccentricity(id)?;
    debug!(station, range, "emergency range computed");
    println!("Emergency range from {}: {:.4}", station, range);
    Ok(())
}

fn cmd_min_range(
    map_path: &Path,
    from: &str,
    to: &str,
    config: &RefineConfig,
) -> ProjectResult<()> {
    let network = load_network(map_path)?;
    let start = network.id_of(from)?;
    let end = network.id_of(to)?;

    let estimate = network
        .graph()
        .minimum_sufficient_radius_detailed(start, end, config)?;
    debug!(
        from,
        to,
        radius = estimate.radius,
        iterations = estimate.iterations,
        "minimum range refined"
    );
    println!("Minimum range from {} to {}: {:.4}", from, to, estimate.radius);
    println!("  Path: {}", format_path(&network, &estimate.path));
    println!("  Refinement rounds: {}", estimate.iterations);
    Ok(())
}
