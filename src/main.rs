mod bounds;
mod config;
mod deposit;
mod error;
mod export;
mod grid;
mod growth;
mod random;
mod settings;
mod slices;
mod summary;

use clap::Parser;
use config::ModelConfig;
use deposit::DepositType;
use error::{ModelError, Result};
use grid::{Coordinate, Dimensions};
use settings::DecayRule;
use std::io::{self, Write};
use std::path::PathBuf;
use summary::ModelSummary;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "random-model")]
#[command(about = "Grow a random 3D block model deposit from a single seed")]
struct Args {
    // === Model Parameters ===
    /// Blocks along x
    #[arg(long)]
    nx: Option<usize>,

    /// Blocks along y
    #[arg(long)]
    ny: Option<usize>,

    /// Blocks along z
    #[arg(long)]
    nz: Option<usize>,

    /// Average block value
    #[arg(long, allow_negative_numbers = true)]
    avg: Option<f64>,

    /// Standard deviation of block values (>= 0)
    #[arg(long)]
    stdev: Option<f64>,

    /// Maximum number of coded blocks, seed included
    #[arg(long)]
    maxblocks: Option<usize>,

    /// Blocks accepted regardless of chance before growth turns random
    #[arg(long)]
    minblocks: Option<usize>,

    // === Growth Parameters ===
    /// RNG seed (random if omitted; recorded in the report)
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed 1-indexed seed location as x,y,z
    #[arg(long = "seed-location")]
    seed_location: Option<String>,

    /// Acceptance probability for the first wave
    #[arg(long = "code-chance")]
    code_chance: Option<f64>,

    /// Extra acceptance for offsets the deposit type favours
    #[arg(long = "direction-boost")]
    direction_boost: Option<f64>,

    /// Deposit type (axis, blob, tabular, tilted-tabular, vein)
    #[arg(long)]
    deposit: Option<String>,

    /// Chance decay rule (proportional, truncated)
    #[arg(long)]
    decay: Option<String>,

    // === Output ===
    /// Write uncoded blocks to the model file with value -1
    #[arg(long = "include-missing")]
    include_missing: bool,

    /// Decimal places for exported values
    #[arg(long)]
    precision: Option<usize>,

    /// Model CSV path
    #[arg(long = "model-file")]
    model_file: Option<PathBuf>,

    /// Report path
    #[arg(long = "report-file")]
    report_file: Option<PathBuf>,

    /// Print every z level to stdout
    #[arg(long)]
    print: bool,

    /// Directory for per-level PNG images
    #[arg(long = "slice-dir")]
    slice_dir: Option<PathBuf>,

    // === Config Files ===
    /// Load settings from a JSON config; other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the resolved settings (including the RNG seed) to a JSON config
    #[arg(long = "export-config")]
    export_config: Option<PathBuf>,
}

fn parse_decay(s: &str) -> DecayRule {
    match s.to_lowercase().as_str() {
        "truncated" | "truncate" | "integer" | "int" => DecayRule::Truncated,
        "proportional" | "fraction" => DecayRule::Proportional,
        other => {
            warn!(decay = other, "Unknown decay rule, using proportional");
            DecayRule::Proportional
        }
    }
}

fn parse_deposit(s: &str) -> DepositType {
    match s.to_lowercase().as_str() {
        "blob" => DepositType::Blob,
        "tabular" | "tab" => DepositType::Tabular,
        "tilted-tabular" | "tilted" | "tab(tilted)" => DepositType::TiltedTabular,
        "vein" => DepositType::Vein,
        "axis" => DepositType::Axis,
        other => {
            warn!(deposit = other, "Unknown deposit type, using axis");
            DepositType::Axis
        }
    }
}

/// Log filter from `RUST_LOG`-style directives, or info for this crate when unset or unparsable
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("random_model=info"))
}

/// Parse a 1-indexed `x,y,z` triple into a 0-indexed coordinate
fn parse_seed_location(s: &str) -> Result<Coordinate> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let invalid = || ModelError::InvalidConfig(format!("seed location must be x,y,z, got '{}'", s));
    if parts.len() != 3 {
        return Err(invalid());
    }
    let mut axes = [0usize; 3];
    for (axis, part) in axes.iter_mut().zip(&parts) {
        let v: usize = part.parse().map_err(|_| invalid())?;
        if v == 0 {
            return Err(ModelError::InvalidConfig(
                "seed location is 1-indexed; 0 is not a valid block".to_string(),
            ));
        }
        *axis = v - 1;
    }
    Ok(Coordinate::new(axes[0], axes[1], axes[2]))
}

/// Start from the config file (or defaults) and apply command-line overrides
fn build_config(args: &Args) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::load_from_file(path)?,
        None => ModelConfig::default(),
    };

    // Apply model parameters
    let params = &mut config.params;
    let dims = params.dims;
    params.dims = Dimensions::new(
        args.nx.unwrap_or(dims.x),
        args.ny.unwrap_or(dims.y),
        args.nz.unwrap_or(dims.z),
    );
    if let Some(avg) = args.avg {
        params.average = avg;
    }
    if let Some(stdev) = args.stdev {
        params.stdev = stdev;
    }
    if let Some(max_blocks) = args.maxblocks {
        params.max_blocks = max_blocks;
    }
    if let Some(min_blocks) = args.minblocks {
        params.min_blocks = Some(min_blocks);
    }

    // Apply growth settings
    if let Some(loc) = &args.seed_location {
        params.seed_location = Some(parse_seed_location(loc)?);
    }
    if let Some(chance) = args.code_chance {
        params.code_chance = chance;
    }
    if let Some(boost) = args.direction_boost {
        params.direction_boost = boost;
    }
    if let Some(decay) = &args.decay {
        params.decay = parse_decay(decay);
    }
    if let Some(deposit) = &args.deposit {
        params.deposit = parse_deposit(deposit);
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    // Apply output settings
    let output = &mut config.output;
    output.include_missing |= args.include_missing;
    output.print_slices |= args.print;
    if let Some(precision) = args.precision {
        output.precision = precision;
    }
    if let Some(path) = &args.model_file {
        output.model_path = path.clone();
    }
    if let Some(path) = &args.report_file {
        output.report_path = path.clone();
    }
    if let Some(dir) = &args.slice_dir {
        output.slice_dir = Some(dir.clone());
    }

    Ok(config)
}

/// Grow the model and write every requested output.
/// The config's RNG seed must already be resolved.
fn run(config: &ModelConfig, rng_seed: u64) -> Result<ModelSummary> {
    let dims = config.params.dims;
    info!(
        nx = dims.x,
        ny = dims.y,
        nz = dims.z,
        max_blocks = config.params.max_blocks,
        rng_seed,
        "Generating model"
    );

    let model = growth::generate(config.params.clone(), rng_seed)?;
    let coded_share = model.summary.blocks_coded as f64 / model.bounds.volume().max(1) as f64;
    info!(
        growable_cells = model.bounds.volume(),
        coded_share,
        "Model grown"
    );
    let output = &config.output;
    export::write_outputs(&model.grid, &config.params, &model.summary, output)?;

    if output.print_slices {
        let mut stdout = io::stdout().lock();
        export::write_slices(&model.grid, &mut stdout, output.precision)?;
        stdout.flush()?;
    }
    if let Some(dir) = &output.slice_dir {
        slices::export_slices(&model.grid, dir)?;
    }

    Ok(model.summary)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let args = Args::parse();
    let mut config = build_config(&args)?;

    // Resolve the seed up front so an exported config reproduces this run
    let rng_seed = *config.rng_seed.get_or_insert_with(rand::random);

    if let Some(path) = &args.export_config {
        config.save_to_file(path)?;
        info!(path = %path.display(), "Saved config");
    }

    let summary = run(&config, rng_seed)?;
    info!(
        seed = %summary.seed,
        blocks_coded = summary.blocks_coded,
        blocks_checked = summary.blocks_checked,
        "Done"
    );

    Ok(())
}
