// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Drive a set of scaling runs for one FiPy script.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(
    group(
        ArgGroup::new("scaling")
            .multiple(false)
            .args(&["strong", "weak"])
    )
)]
pub struct Cli {
    /// FiPy script to perform the scaling study on.
    pub script: String,

    /// Request a specific partition for the resource allocation.
    /// Required here or in the config file.
    #[arg(long)]
    pub partition: Option<String>,

    /// Perform strong scaling (fixed problem size). This is the default.
    #[arg(long)]
    pub strong: bool,

    /// Perform weak scaling (problem size grows with task count).
    #[arg(long)]
    pub weak: bool,

    /// Number of cells in the x direction.
    #[arg(long, default_value_t = 100)]
    pub nx: u32,

    /// Number of cells in the y direction.
    #[arg(long, default_value_t = 100)]
    pub ny: u32,

    /// Maximum power of 2 for the number of tasks.
    #[arg(long = "log2-tasks", default_value_t = 6)]
    pub log2_tasks: u32,

    /// Time limit for a serial run, as a Slurm time string
    /// (e.g. "90", "2:03", "1:02:03", "2-8:05:20"). Omit for no limit.
    #[arg(long = "serial-time")]
    pub serial_time: Option<String>,

    /// Lower threshold for any derived time limit, as a Slurm time string.
    #[arg(long = "min-time")]
    pub min_time: Option<String>,

    /// Assumed parallel efficiency, in (0, 1].
    #[arg(long = "parallel-efficiency", default_value_t = 0.9)]
    pub parallel_efficiency: f64,

    /// Path to the conda installation on the compute nodes.
    #[arg(long = "conda-path")]
    pub conda_path: Option<String>,

    /// Conda environment to run in.
    #[arg(long = "conda-env")]
    pub conda_env: Option<String>,

    /// Use this config file instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print each sbatch command without submitting anything.
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the plan as JSON instead of command lines.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    #[arg(long, short)]
    pub verbose: bool,
}
