//! fe-inspect: offline viewer for a Foundation Emulator data directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fe_inspect::{hex, parse_scope, CommittedSnapshot};
use fe_telemetry::{init_tracing, TelemetryConfig};
use shared_types::{ScopeKey, Section};
use std::path::PathBuf;

/// Inspect the committed critical data snapshot of a data directory.
#[derive(Parser, Debug)]
#[command(name = "fe-inspect")]
#[command(about = "Print the committed critical data of a Foundation Emulator data directory")]
struct Args {
    /// Data directory holding critical.committed
    data_dir: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sequence number and per-scope usage
    Summary,
    /// Paths present in one scope
    Manifest { section: Section, scope: String },
    /// One value, printed as hex
    Get {
        section: Section,
        scope: String,
        path: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&TelemetryConfig::for_component("fe-inspect").with_log_level("warn"))
        .context("initializing logging")?;

    let snapshot = CommittedSnapshot::load(&args.data_dir)
        .with_context(|| format!("loading {}", args.data_dir.display()))?;

    match args.command {
        Command::Summary => {
            let summary = snapshot.summary();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("sequence:   {}", summary.sequence);
                println!("compressed: {}", summary.compressed);
                println!("payload:    {} bytes", summary.payload_bytes);
                println!("entries:    {}", summary.total_entries);
                for usage in &summary.scopes {
                    println!("  {:<32} {:>6} entries {:>10} bytes", usage.scope, usage.entries, usage.bytes);
                }
            }
        }
        Command::Manifest { section, scope } => {
            let key = ScopeKey::new(section, parse_scope(&scope)?);
            let paths = snapshot.manifest(key);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                for path in paths {
                    println!("{path}");
                }
            }
        }
        Command::Get { section, scope, path } => {
            let value = snapshot
                .get(section, parse_scope(&scope)?, &path)?
                .with_context(|| format!("{section}/{scope}/{path} is absent"))?;
            if args.json {
                println!("{}", serde_json::to_string(&hex(value))?);
            } else {
                println!("{}", hex(value));
            }
        }
    }
    Ok(())
}
