//! Cogwork CLI
//!
//! Inspect procedural gears and networks, and run the mechanical diagram
//! against the headless host.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cogwork_3d::factory::{create_gear, create_network, create_simple_gear, Bounds, GearOptions, LayoutPattern, NetworkOptions};
use cogwork_3d::scene::Scene;
use cogwork_diagram::{ColorScheme, DiagramConfig, DiagramState, Environment, HeadlessHost, MechanicalDiagram};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod report;

use report::{GearSummary, HostSummary, NetworkSummary, SimulationReport};

#[derive(Parser)]
#[command(name = "cogwork")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cogwork mechanical diagram tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one gear and report its geometry
    Gear {
        /// Root radius
        #[arg(long, default_value_t = 2.0)]
        radius: f32,

        /// Number of teeth (at least 3)
        #[arg(long, default_value_t = 24)]
        teeth: u32,

        /// Extrusion depth
        #[arg(long, default_value_t = 0.4)]
        thickness: f32,

        #[arg(long)]
        tooth_height: Option<f32>,

        #[arg(long)]
        tooth_width: Option<f32>,

        /// Use the cylinder-and-boxes variant
        #[arg(long)]
        simple: bool,
    },

    /// Lay out a node network and report positions and edges
    Network {
        #[arg(long, default_value_t = 10)]
        nodes: usize,

        /// Layout pattern (random, grid, circular, hierarchical)
        #[arg(short, long, default_value = "hierarchical")]
        pattern: String,

        /// Edge probability for pairs within reach
        #[arg(short, long, default_value_t = 0.25)]
        density: f32,

        /// Placement volume as x,y,z
        #[arg(long, value_delimiter = ',', default_value = "8,5,3")]
        bounds: Vec<f32>,

        /// Random seed for a reproducible layout
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Mount the diagram headlessly, run frames, then unmount
    Simulate {
        /// Number of display refreshes to fire
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Milliseconds between refreshes
        #[arg(long, default_value_t = 16.0)]
        interval: f64,

        /// TOML file overriding the default scene
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Start in the dark scheme
        #[arg(long)]
        dark: bool,

        /// Honor a reduced-motion preference
        #[arg(long)]
        reduced_motion: bool,

        /// Flip the scheme before this frame
        #[arg(long)]
        flip_theme_at: Option<usize>,

        /// Random seed for the network layout
        #[arg(short, long)]
        seed: Option<u64>,

        /// Container size as WIDTHxHEIGHT
        #[arg(long, default_value = "800x400")]
        size: String,

        /// Pretend WebGL is missing
        #[arg(long)]
        no_webgl: bool,
    },

    /// Print the default scene configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Gear {
            radius,
            teeth,
            thickness,
            tooth_height,
            tooth_width,
            simple,
        } => {
            let mut options = GearOptions::new(radius, teeth, thickness);
            options.tooth_height = tooth_height;
            options.tooth_width = tooth_width;
            print_json(&cmd_gear(&options, simple)?, cli.compact)
        }

        Commands::Network {
            nodes,
            pattern,
            density,
            bounds,
            seed,
        } => print_json(&cmd_network(nodes, &pattern, density, &bounds, seed)?, cli.compact),

        Commands::Simulate {
            frames,
            interval,
            config,
            dark,
            reduced_motion,
            flip_theme_at,
            seed,
            size,
            no_webgl,
        } => {
            let (width, height) = parse_size(&size)?;
            let mut config = load_config(config.as_ref())?;
            if seed.is_some() {
                config.seed = seed;
            }
            let scheme = if dark { ColorScheme::Dark } else { ColorScheme::Light };
            let env = Environment::new(scheme).with_reduced_motion(reduced_motion);
            let mut host = HeadlessHost::new(width, height);
            if no_webgl {
                host = host.without_webgl();
            }
            let report = cmd_simulate(config, env, &mut host, frames, interval, flip_theme_at);
            print_json(&report, cli.compact)
        }

        Commands::Config => {
            print!("{}", DiagramConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn cmd_gear(options: &GearOptions, simple: bool) -> Result<GearSummary> {
    let mut scene = Scene::new();
    let model = if simple {
        create_simple_gear(&mut scene, options)
    } else {
        create_gear(&mut scene, options)
    }
    .context("failed to build gear")?;

    let summary = GearSummary::new(&scene, &model, options);
    if summary.open_edges > 0 {
        warn!(open_edges = summary.open_edges, "gear surface is not closed");
    }
    info!(
        "Built {} gear: {} teeth, {} triangles",
        summary.style, summary.teeth_count, summary.triangles
    );
    Ok(summary)
}

fn cmd_network(nodes: usize, pattern: &str, density: f32, bounds: &[f32], seed: Option<u64>) -> Result<NetworkSummary> {
    let pattern = parse_pattern(pattern)?;
    let [x, y, z] = bounds else {
        anyhow::bail!("Bounds need exactly three values, got {}", bounds.len());
    };
    let options = NetworkOptions::new(nodes)
        .with_pattern(pattern)
        .with_bounds(Bounds::new(*x, *y, *z))
        .with_density(density);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut scene = Scene::new();
    let network = create_network(&mut scene, &options, &mut rng).context("failed to build network")?;
    info!(
        "Built {:?} network: {} nodes, {} connections",
        pattern,
        network.nodes.len(),
        network.connections.pairs.len()
    );
    Ok(NetworkSummary::new(&scene, &network))
}

fn cmd_simulate(
    config: DiagramConfig,
    env: Environment,
    host: &mut HeadlessHost,
    frames: usize,
    interval: f64,
    flip_theme_at: Option<usize>,
) -> SimulationReport {
    let mut diagram = MechanicalDiagram::new(config);
    diagram.mount(host, env);
    if diagram.state() == DiagramState::Error {
        warn!("Diagram failed to mount; nothing will be drawn");
    }

    let mut drawn = 0;
    for frame in 0..frames {
        if flip_theme_at == Some(frame) {
            let next = diagram.environment().scheme.toggled();
            info!("Switching to {} scheme", next);
            diagram.set_theme(next);
        }
        let Some(handle) = host.take_frame() else {
            break;
        };
        if diagram.on_animation_frame(host, handle, interval * frame as f64) {
            drawn += 1;
        }
    }

    let mut report = SimulationReport::running(&diagram, frames, drawn);
    report.disposed = diagram.unmount(host).into();
    report.host = HostSummary::from(&host.log());
    info!(
        "Simulated {} frames ({} drawn), released {} objects",
        frames, drawn, report.disposed.objects
    );
    report
}

fn load_config(path: Option<&PathBuf>) -> Result<DiagramConfig> {
    let Some(path) = path else {
        return Ok(DiagramConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config = DiagramConfig::from_toml_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn parse_pattern(pattern: &str) -> Result<LayoutPattern> {
    match pattern {
        "random" => Ok(LayoutPattern::Random),
        "grid" => Ok(LayoutPattern::Grid),
        "circular" => Ok(LayoutPattern::Circular),
        "hierarchical" => Ok(LayoutPattern::Hierarchical),
        _ => anyhow::bail!(
            "Invalid pattern '{}'. Valid patterns: {:?}",
            pattern,
            ["random", "grid", "circular", "hierarchical"]
        ),
    }
}

fn parse_size(size: &str) -> Result<(u32, u32)> {
    let (width, height) = size
        .split_once('x')
        .with_context(|| format!("Invalid size '{}', expected WIDTHxHEIGHT", size))?;
    Ok((
        width.trim().parse().context("Invalid width")?,
        height.trim().parse().context("Invalid height")?,
    ))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}
