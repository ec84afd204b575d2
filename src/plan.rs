// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Study configuration and lazy enumeration of per-task-count job
//! descriptors.

use std::time::Duration;

use crate::errors::PlanError;
use crate::model::{self, ScalingMode};

/// Immutable configuration of one scaling study. Constructed once at the
/// boundary; everything the plan produces is derived from it.
#[derive(Debug, Clone)]
pub struct ScalingStudy {
    pub script: String,
    pub mode: ScalingMode,
    pub efficiency: f64,
    /// Measured or assumed run time at one task; zero means "no limit".
    pub serial_time: Duration,
    /// Lower threshold for any derived time limit.
    pub min_time: Duration,
    /// Task counts run from 2^0 through 2^max_exponent inclusive.
    pub max_exponent: u32,
    pub nx: u32,
    pub ny: u32,
}

impl ScalingStudy {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        script: String,
        mode: ScalingMode,
        efficiency: f64,
        serial_time: Duration,
        min_time: Duration,
        max_exponent: u32,
        nx: u32,
        ny: u32,
    ) -> Result<Self, PlanError> {
        if !(efficiency > 0.0 && efficiency <= 1.0) {
            return Err(PlanError::InvalidEfficiency(efficiency));
        }
        Ok(Self {
            script,
            mode,
            efficiency,
            serial_time,
            min_time,
            max_exponent,
            nx,
            ny,
        })
    }

    /// Lazily enumerate job descriptors in ascending task-count order.
    ///
    /// The order matters: queues tend to start smaller allocations sooner,
    /// and downstream tooling relies on a deterministic sequence. The plan
    /// borrows only the study, so it can be re-created and re-run at will.
    pub fn plan(&self) -> Plan<'_> {
        Plan {
            study: self,
            next_exponent: 0,
        }
    }

    fn descriptor(&self, exponent: u32) -> Result<JobDescriptor, PlanError> {
        // 2^64 tasks wraps to zero; report it as the invalid count it is.
        let ntasks = 1u64
            .checked_shl(exponent)
            .ok_or(PlanError::InvalidTaskCount(0))?;
        let time_limit = model::estimate(
            self.serial_time,
            ntasks,
            self.mode,
            self.efficiency,
            self.min_time,
        )?;
        Ok(JobDescriptor {
            ntasks,
            job_name: self.job_name(ntasks),
            time_limit,
        })
    }

    fn job_name(&self, ntasks: u64) -> String {
        // The width appears twice; downstream log parsing expects this exact
        // shape, so it is kept even though the height looks like the natural
        // second field.
        format!(
            "{}-{}-{}-{}-{}",
            self.mode.tag(),
            self.script,
            self.nx,
            self.nx,
            ntasks
        )
    }
}

/// One fully specified resource-allocation request for one task count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub ntasks: u64,
    pub job_name: String,
    /// `None` means the job runs without a scheduler time limit.
    pub time_limit: Option<Duration>,
}

pub struct Plan<'a> {
    study: &'a ScalingStudy,
    next_exponent: u32,
}

impl Iterator for Plan<'_> {
    type Item = Result<JobDescriptor, PlanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_exponent > self.study.max_exponent {
            return None;
        }
        let exponent = self.next_exponent;
        self.next_exponent += 1;
        Some(self.study.descriptor(exponent))
    }
}
