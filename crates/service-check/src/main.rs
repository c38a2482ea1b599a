//! CLI entry point: parse flags, connect, run one evaluation pass, print the
//! status line on stdout and exit with the matching monitoring code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::debug;

use service_check::{run_check, CheckStatus, ClusterConfig, FilterRules, KubeCluster, RunOutcome};

/// Point-in-time availability check for cluster services
#[derive(Parser)]
#[command(name = "service-check")]
#[command(about = "Checks that every in-scope service has an available backing pod")]
#[command(version)]
struct Cli {
    /// Only check services with this name (repeatable)
    #[arg(long = "service", value_name = "NAME")]
    services: Vec<String>,

    /// Only check services in this namespace (repeatable; default: all)
    #[arg(long = "include-namespace", value_name = "NAMESPACE")]
    include_namespaces: Vec<String>,

    /// Skip services in this namespace (repeatable; wins over includes)
    #[arg(long = "exclude-namespace", value_name = "NAMESPACE")]
    exclude_namespaces: Vec<String>,

    /// Seconds a Pending pod is still counted as available
    #[arg(long, default_value = "0", value_name = "SECONDS")]
    pending_grace_seconds: i64,

    /// Path to an explicit kubeconfig file (default: standard inference)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, value_name = "NAME")]
    context: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    let cluster_config = ClusterConfig {
        kubeconfig: cli.kubeconfig,
        context: cli.context,
    };
    let cluster = KubeCluster::connect(&cluster_config)
        .await
        .context("failed to build cluster client")?;

    let rules = FilterRules {
        names: cli.services,
        include_namespaces: cli.include_namespaces,
        exclude_namespaces: cli.exclude_namespaces,
    };

    debug!(
        names = rules.names.len(),
        include = rules.include_namespaces.len(),
        exclude = rules.exclude_namespaces.len(),
        grace = cli.pending_grace_seconds,
        "Starting evaluation pass"
    );

    run_check(&cluster, &rules, cli.pending_grace_seconds, Utc::now())
        .await
        .context("service listing failed")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging goes to stderr so the status line owns stdout.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()))
        .with_writer(std::io::stderr)
        .init();

    let code = match run(cli).await {
        Ok(outcome) => {
            println!("{}", outcome.render());
            outcome.status().exit_code()
        }
        Err(e) => {
            println!("UNKNOWN: {e:#}");
            CheckStatus::Unknown.exit_code()
        }
    };
    ExitCode::from(code)
}
