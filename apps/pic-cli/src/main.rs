use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pic_bc::BoundaryFactory;
use pic_core::{Geometry, Slot};
use pic_fields::GridLayout;
use pic_params::SimParams;
use pic_sim::RunOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pic-cli")]
#[command(about = "Boundary conditions and moving window for PIC simulations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a parameter file
    Validate {
        /// Path to the parameter YAML or JSON file
        params_path: PathBuf,
    },
    /// Build and list the boundary conditions of a parameter file
    Boundaries {
        /// Path to the parameter YAML or JSON file
        params_path: PathBuf,
    },
    /// Run the lockstep step loop
    Run {
        /// Path to the parameter YAML or JSON file
        params_path: PathBuf,
        /// Number of workers (defaults to number_of_patches)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Stop after this many steps
        #[arg(long)]
        max_steps: Option<usize>,
        /// Write the run record as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Params(#[from] pic_params::ParamsError),

    #[error(transparent)]
    Boundary(#[from] pic_bc::BcError),

    #[error(transparent)]
    Core(#[from] pic_core::PicError),

    #[error(transparent)]
    Sim(#[from] pic_sim::SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { params_path } => cmd_validate(&params_path),
        Commands::Boundaries { params_path } => cmd_boundaries(&params_path),
        Commands::Run {
            params_path,
            workers,
            max_steps,
            output,
        } => cmd_run(
            &params_path,
            RunOptions { workers, max_steps },
            output.as_deref(),
        ),
    }
}

fn load(path: &Path) -> CliResult<SimParams> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let params = if is_json {
        pic_params::load_json(path)?
    } else {
        pic_params::load_yaml(path)?
    };
    Ok(params)
}

fn cmd_validate(params_path: &Path) -> CliResult<()> {
    println!("Validating parameters: {}", params_path.display());
    let params = load(params_path)?;
    println!("✓ Parameters are valid ({})", params.name);
    Ok(())
}

fn cmd_boundaries(params_path: &Path) -> CliResult<()> {
    let params = load(params_path)?;
    let geometry: Geometry = params.geometry.parse()?;
    let layout = Arc::new(
        GridLayout::new(
            geometry,
            &params.n_space,
            &params.cell_length,
            params.timestep,
            params.oversize,
        )?
        .with_modes(params.number_of_modes)?,
    );
    let set = BoundaryFactory::create(geometry, &params.em_boundary_conditions, &layout)?;

    println!("Boundary conditions for {} ({}):", params.name, geometry);
    for (index, kind) in set.kinds().into_iter().enumerate() {
        let slot = Slot::from_index(index);
        println!(
            "  slot {} - axis {} {} face: {}",
            index,
            geometry.axis_name(slot.axis()),
            slot.side(),
            kind
        );
    }
    Ok(())
}

fn cmd_run(params_path: &Path, opts: RunOptions, output: Option<&Path>) -> CliResult<()> {
    let params = load(params_path)?;
    println!("Running {} ({} steps)", params.name, params.n_steps());

    let record = pic_sim::run(&params, &opts)?;
    info!(
        name = %record.name,
        moves = record.shifts.len(),
        particles_lost = record.particles_lost,
        "run record ready"
    );

    println!("✓ Run completed");
    println!("  Workers: {}", record.workers);
    println!("  Steps: {}", record.steps);
    println!("  Window moves: {}", record.shifts.len());
    println!("  Moved distance: {:.6}", record.moved_distance);
    println!("  Particles: {} ({} lost)", record.particles, record.particles_lost);
    println!("  Field energy: {:.6e}", record.field_energy);

    if let Some(path) = output {
        let content = serde_json::to_string_pretty(&record)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), "run record written");
        println!("  Record written to {}", path.display());
    }
    Ok(())
}
