#![forbid(unsafe_code)]

mod table;
mod validate;

use clap::{Parser, Subcommand};
use fleetboard_engine::{
    derive_rows, elapsed_description, merge, refreshed_banner, CoveragePolicy, ExpandState,
    LinkBuilder,
};
use fleetboard_model::{DashboardSchema, FieldKind};
use fleetboard_store::{load_cycle, LocalFsBackend};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    Validation = 3,
    Internal = 10,
}

#[derive(Parser)]
#[command(name = "fleetboard")]
#[command(about = "Fleetboard dashboard operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full load-merge-derive cycle and print the dashboard.
    Render {
        #[arg(long)]
        snapshot_dir: PathBuf,
        #[arg(long, default_value_t = false)]
        expand_all: bool,
        #[arg(long)]
        coverage_threshold: Option<f64>,
    },
    /// Check the snapshot documents against the shape contracts.
    Validate {
        #[arg(long)]
        snapshot_dir: PathBuf,
    },
    /// Print dashboard metadata and the freshness banner.
    Meta {
        #[arg(long)]
        snapshot_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => ProcessExitCode::from(code as u8),
        Err(message) => {
            eprintln!("error: {message}");
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, String> {
    let schema = DashboardSchema::standard();
    match cli.command {
        Commands::Render {
            snapshot_dir,
            expand_all,
            coverage_threshold,
        } => {
            let backend = LocalFsBackend::new(snapshot_dir);
            let loaded = load_cycle(&backend, &schema).await;
            let table = match merge(&schema, &loaded.base, &loaded.supplements) {
                Ok(table) => table,
                Err(e) => {
                    eprintln!("snapshot shape defect: {e}");
                    return Ok(ExitCode::Validation);
                }
            };
            let policy = coverage_threshold
                .map(|healthy_min| CoveragePolicy { healthy_min })
                .unwrap_or_default();
            let links = LinkBuilder::new(&loaded.meta.console_domain);
            let rows = derive_rows(&schema, &table, &links, &policy);
            let now = unix_now();
            if cli.json {
                let payload = json!({
                    "freshness": elapsed_description(loaded.meta.last_updated, now),
                    "columns": schema.field_defs(),
                    "rows": rows,
                    "degraded_sources": loaded.report.degraded,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
                );
            } else {
                if !cli.quiet {
                    println!("{}", refreshed_banner(loaded.meta.last_updated, now));
                    for degraded in &loaded.report.degraded {
                        println!("warning: {} unavailable ({})", degraded.source, degraded.reason);
                    }
                    println!();
                }
                let mut expand = ExpandState::new();
                if expand_all {
                    for row in &rows {
                        for def in schema.field_defs() {
                            if matches!(
                                def.kind,
                                FieldKind::BranchList
                                    | FieldKind::PullRequestList
                                    | FieldKind::Pipeline
                            ) {
                                expand.set(&row.project, &def.id, true);
                            }
                        }
                    }
                }
                print!("{}", table::render_table(&schema, &rows, &expand));
            }
            Ok(ExitCode::Success)
        }
        Commands::Validate { snapshot_dir } => {
            let backend = LocalFsBackend::new(snapshot_dir);
            let violations = validate::validate_snapshots(&backend, &schema).await;
            if cli.json {
                let status = if violations.is_empty() { "ok" } else { "invalid" };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "status": status,
                        "violations": violations,
                    }))
                    .map_err(|e| e.to_string())?
                );
            } else if violations.is_empty() {
                if !cli.quiet {
                    println!("ok: all snapshot documents satisfy the shape contracts");
                }
            } else {
                for violation in &violations {
                    eprintln!("violation: {violation}");
                }
            }
            if violations.is_empty() {
                Ok(ExitCode::Success)
            } else {
                Ok(ExitCode::Validation)
            }
        }
        Commands::Meta { snapshot_dir } => {
            let backend = LocalFsBackend::new(snapshot_dir);
            let loaded = load_cycle(&backend, &schema).await;
            let now = unix_now();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "last_updated": loaded.meta.last_updated,
                        "console_domain": loaded.meta.console_domain,
                        "freshness": elapsed_description(loaded.meta.last_updated, now),
                        "degraded_sources": loaded.report.degraded,
                    }))
                    .map_err(|e| e.to_string())?
                );
            } else {
                println!("{}", refreshed_banner(loaded.meta.last_updated, now));
                if !loaded.meta.console_domain.is_empty() {
                    println!("console domain: {}", loaded.meta.console_domain);
                }
                for degraded in &loaded.report.degraded {
                    println!("warning: {} unavailable ({})", degraded.source, degraded.reason);
                }
            }
            Ok(ExitCode::Success)
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
