use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mountains::config::Params;
use mountains::error::Result;
use mountains::rng::clock_seed;

/// Layered mountain landscape generator.
#[derive(Parser)]
#[command(name = "mountains")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Random seed; defaults to the current time in seconds.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// JSON file with generation parameters; missing fields use defaults.
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Canvas width override.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override.
    #[arg(long)]
    height: Option<u32>,
}

fn load_params(cli: &Cli) -> Result<Params> {
    let mut params = match &cli.params {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Params::default(),
    };
    if let Some(w) = cli.width {
        params.width = w;
    }
    if let Some(h) = cli.height {
        params.height = h;
    }
    Ok(params)
}

fn run(cli: Cli) -> Result<()> {
    let params = load_params(&cli)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);

    eprintln!(
        "Generating {}x{} landscape with seed={}, layers={}, variant={:?}",
        params.width, params.height, seed, params.num_layers, params.variant
    );

    let (land, timings) = mountains::generate(seed, &params)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "\n{} layers, {} trees, {} shapes",
        land.scene.layers.len(),
        land.scene.tree_count(),
        land.scene.shapes().count()
    );

    land.save_png(&cli.output)?;
    eprintln!("Saved {}", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
