//! Workout Track CLI
//!
//! Merges raw workout records into time-aligned tracks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use workout_track::{process_batch, Config, OutputFormat, RawRecord, Track, VERSION};

#[derive(Parser)]
#[command(name = "workout-track")]
#[command(version = VERSION)]
#[command(about = "Merge delta-encoded workout sensor streams into tracks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge raw workout records from a JSON file
    Merge {
        /// JSON file holding one raw record or an array of them
        #[arg(long, short)]
        input: PathBuf,

        /// Where to write the tracks (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured one)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Compact long idle gaps on the time axis
        #[arg(long)]
        compact_gaps: bool,

        /// Worker threads (defaults to the configured count)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Show current configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Input files may hold a single record or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Many(Vec<RawRecord>),
    One(Box<RawRecord>),
}

impl RecordInput {
    fn into_records(self) -> Vec<RawRecord> {
        match self {
            RecordInput::Many(records) => records,
            RecordInput::One(record) => vec![*record],
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            input,
            output,
            format,
            compact_gaps,
            workers,
        } => cmd_merge(input, output, format, compact_gaps, workers),
        Commands::Config { init } => cmd_config(init),
    }
}

fn cmd_merge(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    compact_gaps: bool,
    workers: Option<usize>,
) -> Result<()> {
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Could not load config, using defaults: {e}");
        Config::default()
    });
    if compact_gaps {
        config.merge.compact_gaps = true;
    }
    if config.merge.compact_gaps {
        warn!("Gap compaction enabled; its trim budget comes from a placeholder cost time");
    }
    let format = format.unwrap_or(config.output_format);
    let workers = workers.unwrap_or(config.workers);

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let records = serde_json::from_str::<RecordInput>(&content)
        .with_context(|| format!("parsing records from {}", input.display()))?
        .into_records();
    info!("Loaded {} record(s) from {}", records.len(), input.display());

    let mut tracks: Vec<Track> = Vec::with_capacity(records.len());
    let mut failures = 0usize;
    for (record, result) in records.iter().zip(process_batch(&records, &config.merge, workers)) {
        match result {
            Ok(track) if track.is_empty() => {
                info!("Workout {} has no position data; skipping", record.summary.trackid);
            }
            Ok(track) => tracks.push(track),
            Err(e) => {
                error!("Workout {} failed: {e}", record.summary.trackid);
                failures += 1;
            }
        }
    }

    let rendered = render(&tracks, format)?;
    match &output {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} track(s) to {}", tracks.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if failures > 0 {
        bail!("{failures} record(s) could not be merged");
    }
    Ok(())
}

fn render(tracks: &[Track], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(tracks)?,
        OutputFormat::Jsonl => tracks
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    })
}

fn cmd_config(init: bool) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path();
    if init {
        config.save_to(&path)?;
        info!("Wrote configuration to {:?}", path);
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", path);
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
