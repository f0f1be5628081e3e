/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use listsched::config::RunConfig;
use listsched::report::write_report;
use listsched::scheduler::{ListScheduler, SchedulingPolicy};
use listsched::task::TaskSet;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Greedy list scheduler.
///
/// Example:
///   listsched tasks.txt 3
///   listsched --config run.yaml --policy longest-first
#[derive(Debug, Parser)]
#[command(
    name = "listsched",
    about = "Greedy longest-first / shortest-first list scheduler",
    long_about = None,
)]
struct Cli {
    /// Task file: one `name duration` pair per line.
    input: Option<PathBuf>,

    /// Number of identical processors.
    processors: Option<usize>,

    /// Path to a YAML run configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Directory the reports are written to.
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Policy to run (repeatable).  Defaults to both.
    #[arg(short = 'p', long = "policy", value_enum)]
    policies: Vec<PolicyArg>,

    /// Header prefix for each processor block.
    #[arg(long = "label")]
    label: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    LongestFirst,
    ShortestFirst,
}

impl From<PolicyArg> for SchedulingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LongestFirst => SchedulingPolicy::LongestFirst,
            PolicyArg::ShortestFirst => SchedulingPolicy::ShortestFirst,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // ── Resolve configuration: CLI > file > defaults ─────────────────────────
    let mut config = match &cli.config {
        Some(path) => RunConfig::load_from_file(path)?,
        None => RunConfig::default(),
    };
    if cli.input.is_some() {
        config.input = cli.input;
    }
    if cli.processors.is_some() {
        config.processors = cli.processors;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(label) = cli.label {
        config.processor_label = label;
    }
    if !cli.policies.is_empty() {
        config.policies = cli.policies.into_iter().map(SchedulingPolicy::from).collect();
    }
    config.validate()?;

    info!(
        input      = ?config.input,
        processors = ?config.processors,
        output_dir = %config.output_dir.display(),
        policies   = ?config.policies,
        "Configuration"
    );

    // ── Load tasks and schedule ──────────────────────────────────────────────
    let input = config.input.as_deref().context("task file not set")?;
    let tasks = TaskSet::load_from_file(input)?;

    let processors = config.processors.context("processor count not set")?;
    let scheduler = ListScheduler::new(processors)?;

    for &policy in &config.policies {
        let result = scheduler.schedule(&tasks, policy);
        write_report(&config.output_path(policy), &result, &config.processor_label)
            .with_context(|| format!("Failed to write {policy} report"))?;
    }

    Ok(())
}
