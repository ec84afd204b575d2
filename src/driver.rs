// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Runs one study end to end: enumerate the plan, build each allocation
//! request, hand it to the submitter.

use anyhow::Result;

use crate::plan::ScalingStudy;
use crate::sbatch::{self, SbatchRequest, SubmitSite};
use crate::submit::JobSubmitter;

/// Submit every job of the study in ascending task-count order.
///
/// The first error aborts the whole study; a partially submitted study is
/// easier to reason about than one with silent holes in the middle.
pub fn run_study(
    study: &ScalingStudy,
    site: &SubmitSite,
    submitter: &mut dyn JobSubmitter,
) -> Result<()> {
    for job in study.plan() {
        let job = job?;
        let request = sbatch::build_request(study, &job, site);
        tracing::info!(
            job_name = %request.job_name,
            ntasks = request.ntasks,
            time_limit = request.time_limit.as_deref().unwrap_or("unlimited"),
            "submitting job"
        );
        submitter.submit(&request)?;
    }
    Ok(())
}

/// Materialize the whole plan as resolved requests, for JSON rendering.
pub fn collect_requests(study: &ScalingStudy, site: &SubmitSite) -> Result<Vec<SbatchRequest>> {
    study
        .plan()
        .map(|job| Ok(sbatch::build_request(study, &job?, site)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalingMode;
    use crate::submit::testing::RecordingSubmitter;
    use std::path::PathBuf;
    use std::time::Duration;

    fn study() -> ScalingStudy {
        ScalingStudy::new(
            "diffusion".to_string(),
            ScalingMode::Strong,
            0.9,
            Duration::from_secs(3_600),
            Duration::ZERO,
            4,
            100,
            100,
        )
        .unwrap()
    }

    fn site() -> SubmitSite {
        SubmitSite {
            partition: "rack2".to_string(),
            results_root: PathBuf::from("results"),
            conda_path: "/opt/conda/bin/conda".to_string(),
            conda_env: "fipy3k".to_string(),
        }
    }

    #[test]
    fn submits_every_task_count_in_ascending_order() {
        let mut submitter = RecordingSubmitter::default();
        run_study(&study(), &site(), &mut submitter).unwrap();

        let counts: Vec<u64> = submitter.requests.iter().map(|r| r.ntasks).collect();
        assert_eq!(counts, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn halts_before_submitting_anything_on_a_plan_error() {
        // Bypassing `ScalingStudy::new` is the only way to reach an invalid
        // efficiency inside the loop.
        let mut broken = study();
        broken.efficiency = 0.0;

        let mut submitter = RecordingSubmitter::default();
        let err = run_study(&broken, &site(), &mut submitter).unwrap_err();
        assert!(err.to_string().contains("parallel efficiency"));
        assert!(submitter.requests.is_empty());
    }

    #[test]
    fn halts_on_the_first_submission_failure() {
        struct FailingSubmitter {
            seen: usize,
        }
        impl JobSubmitter for FailingSubmitter {
            fn submit(&mut self, _request: &SbatchRequest) -> Result<()> {
                self.seen += 1;
                if self.seen == 3 {
                    anyhow::bail!("spawn failed");
                }
                Ok(())
            }
        }

        let mut submitter = FailingSubmitter { seen: 0 };
        let err = run_study(&study(), &site(), &mut submitter).unwrap_err();
        assert!(err.to_string().contains("spawn failed"));
        assert_eq!(submitter.seen, 3);
    }

    #[test]
    fn collects_the_same_requests_the_run_submits() {
        let study = study();
        let site = site();
        let mut submitter = RecordingSubmitter::default();
        run_study(&study, &site, &mut submitter).unwrap();

        let collected = collect_requests(&study, &site).unwrap();
        assert_eq!(collected, submitter.requests);
    }
}
