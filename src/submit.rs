// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Submission boundary. The driver hands each request over and moves on; it
//! never interprets scheduler exit codes or retries.

use std::process::Command;

use anyhow::{Context, Result};

/// Sink for fully built allocation requests.
/// Keeps the driver testable without a scheduler on the box.
pub trait JobSubmitter {
    fn submit(&mut self, request: &crate::sbatch::SbatchRequest) -> Result<()>;
}

/// Spawns `sbatch` as a child process and waits for it to finish.
pub struct ProcessSubmitter;

impl JobSubmitter for ProcessSubmitter {
    fn submit(&mut self, request: &crate::sbatch::SbatchRequest) -> Result<()> {
        println!("{}", request.command_line());
        let argv = request.to_argv();
        let status = Command::new(&argv[0])
            .args(&argv[1..])
            .status()
            .with_context(|| format!("failed to run {}", argv[0]))?;
        if !status.success() {
            // Fire and forget: a rejected submission is the scheduler's
            // story to tell, the study keeps going.
            tracing::warn!(job_name = %request.job_name, %status, "sbatch exited unsuccessfully");
        }
        Ok(())
    }
}

/// Prints each command instead of running it.
pub struct DryRunSubmitter;

impl JobSubmitter for DryRunSubmitter {
    fn submit(&mut self, request: &crate::sbatch::SbatchRequest) -> Result<()> {
        println!("{}", request.command_line());
        Ok(())
    }
}
