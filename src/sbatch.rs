// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Construction of the `sbatch` allocation request for one job descriptor.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::ScalingMode;
use crate::plan::{JobDescriptor, ScalingStudy};
use crate::slurmtime;

/// Site-specific submission parameters, resolved from config and CLI before
/// the study starts.
#[derive(Debug, Clone)]
pub struct SubmitSite {
    pub partition: String,
    /// Per-partition job logs land under `<results_root>/<partition>/`.
    pub results_root: PathBuf,
    pub conda_path: String,
    pub conda_env: String,
}

/// One fully resolved `sbatch` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SbatchRequest {
    pub partition: String,
    pub job_name: String,
    pub ntasks: u64,
    /// Canonical Slurm time string, absent for unlimited jobs.
    pub time_limit: Option<String>,
    pub output_path: PathBuf,
    pub script: String,
    pub nx: u64,
    pub ny: u64,
    pub conda_path: String,
    pub conda_env: String,
}

/// Resolve a job descriptor against the study and site into an `sbatch`
/// request.
///
/// Weak scaling grows the second grid dimension with the task count; the
/// multiplication always starts from the study's base `ny` so descriptors
/// stay independent of each other.
pub fn build_request(study: &ScalingStudy, job: &JobDescriptor, site: &SubmitSite) -> SbatchRequest {
    let ny = match study.mode {
        ScalingMode::Strong => u64::from(study.ny),
        ScalingMode::Weak => u64::from(study.ny) * job.ntasks,
    };

    SbatchRequest {
        partition: site.partition.clone(),
        job_name: job.job_name.clone(),
        ntasks: job.ntasks,
        time_limit: job.time_limit.map(slurmtime::format),
        output_path: output_path(&site.results_root, &site.partition, &job.job_name),
        script: study.script.clone(),
        nx: u64::from(study.nx),
        ny,
        conda_path: site.conda_path.clone(),
        conda_env: site.conda_env.clone(),
    }
}

fn output_path(results_root: &Path, partition: &str, job_name: &str) -> PathBuf {
    results_root
        .join(partition)
        .join(format!("{job_name}.slurmout"))
}

impl SbatchRequest {
    /// The ordered token list handed to the submission collaborator.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![
            "sbatch".to_string(),
            format!("--partition={}", self.partition),
            "--exclusive".to_string(),
            format!("--job-name={}", self.job_name),
            format!("--ntasks={}", self.ntasks),
            "--ntasks-per-core=2".to_string(),
        ];
        if let Some(ref limit) = self.time_limit {
            argv.push(format!("--time={limit}"));
        }
        argv.push(format!("--output={}", self.output_path.display()));
        argv.push("jobscript".to_string());
        argv.push(self.script.clone());
        argv.push(self.nx.to_string());
        argv.push(self.ny.to_string());
        argv.push(self.conda_path.clone());
        argv.push(self.conda_env.clone());
        argv
    }

    /// Human-readable command line, echoed before submission.
    pub fn command_line(&self) -> String {
        self.to_argv().join(" ")
    }
}
