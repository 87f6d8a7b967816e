use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::GridGenerator;
use tools::{inputs, logging, report::GridReport};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the layout JSON file (rows of optional partition cells)
    #[arg(short, long)]
    layout: PathBuf,
    /// Optional TOML file overriding generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
}

fn main() -> Result<()> {
    logging::init_tracing("info");
    let args = Args::parse();

    let layout = inputs::load_layout(&args.layout)?;
    let config = inputs::load_config(args.config.as_deref())?;
    info!(seed = args.seed, width = layout.width(), height = layout.height(), "loaded layout");

    let generated = GridGenerator::new(args.seed, config)
        .generate(&layout)
        .with_context(|| format!("Failed to generate grid from {}", args.layout.display()))?;

    match args.format {
        Format::Ascii => {
            print!("{}", generated.render_ascii());
            println!("Fingerprint: {:016x}", generated.fingerprint());
        }
        Format::Json => {
            let report = GridReport::new(args.seed, &generated);
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize grid report")?;
            println!("{json}");
        }
    }

    Ok(())
}
