// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use scalex::args::Cli;
use scalex::model::ScalingMode;
use scalex::plan::ScalingStudy;
use scalex::sbatch::SubmitSite;
use scalex::submit::{DryRunSubmitter, JobSubmitter, ProcessSubmitter};
use scalex::{config, driver, logging, slurmtime};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let file_config = config::load(cli.config.clone())?;

    let partition = cli
        .partition
        .or(file_config.partition)
        .context("no partition given; pass --partition or set it in the config file")?;
    let conda_path = cli
        .conda_path
        .or(file_config.conda_path)
        .unwrap_or_else(|| config::DEFAULT_CONDA_PATH.to_string());
    let conda_env = cli
        .conda_env
        .or(file_config.conda_env)
        .unwrap_or_else(|| config::DEFAULT_CONDA_ENV.to_string());
    let results_root = match file_config.results_root {
        Some(root) => root,
        None => std::env::current_dir()
            .context("failed to resolve working directory")?
            .join("results"),
    };

    let mode = if cli.weak {
        ScalingMode::Weak
    } else {
        ScalingMode::Strong
    };
    let serial_time = parse_optional_time(cli.serial_time.as_deref())?;
    let min_time = parse_optional_time(cli.min_time.as_deref())?;

    let study = ScalingStudy::new(
        cli.script,
        mode,
        cli.parallel_efficiency,
        serial_time,
        min_time,
        cli.log2_tasks,
        cli.nx,
        cli.ny,
    )?;
    let site = SubmitSite {
        partition,
        results_root,
        conda_path,
        conda_env,
    };

    if cli.dry_run && cli.json {
        let requests = driver::collect_requests(&study, &site)?;
        println!("{}", serde_json::to_string_pretty(&requests)?);
        return Ok(());
    }

    let mut submitter: Box<dyn JobSubmitter> = if cli.dry_run {
        Box::new(DryRunSubmitter)
    } else {
        Box::new(ProcessSubmitter)
    };
    driver::run_study(&study, &site, submitter.as_mut())
}

// Absent means the zero "no limit" sentinel.
fn parse_optional_time(text: Option<&str>) -> Result<Duration> {
    match text {
        Some(text) => Ok(slurmtime::parse(text)?),
        None => Ok(Duration::ZERO),
    }
}
