// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Analytic run-time model for scaling studies.

use std::time::Duration;

use crate::errors::PlanError;
use crate::slurmtime;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScalingMode {
    /// Fixed total problem size; task count only increases parallelism.
    #[default]
    Strong,
    /// Problem size grows proportionally with task count.
    Weak,
}

impl ScalingMode {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }
}

/// Expected run time at `task_count` tasks, given the measured serial time
/// and an assumed parallel efficiency in (0, 1].
///
/// Strong scaling follows Amdahl: a fraction `efficiency` of the work speeds
/// up linearly, the rest is serial overhead that never shrinks, so the
/// estimate decreases towards `serial × (1 − efficiency)`. Weak scaling
/// follows Gustafson: the work grows with the task count while the ideal time
/// stays flat, and the estimate rises towards `serial / efficiency`.
///
/// Returns `None` when `serial` is the zero "no limit" sentinel; the caller
/// must then skip the time limit entirely instead of submitting a tiny one.
/// The result is floored at `min_time` and rounded to whole seconds.
pub fn estimate(
    serial: Duration,
    task_count: u64,
    mode: ScalingMode,
    efficiency: f64,
    min_time: Duration,
) -> Result<Option<Duration>, PlanError> {
    if !(efficiency > 0.0 && efficiency <= 1.0) {
        return Err(PlanError::InvalidEfficiency(efficiency));
    }
    if task_count == 0 || !task_count.is_power_of_two() {
        return Err(PlanError::InvalidTaskCount(task_count));
    }
    if serial.is_zero() {
        return Ok(None);
    }

    let t1 = serial.as_secs_f64();
    let n = task_count as f64;
    let estimated = match mode {
        ScalingMode::Strong => t1 * (1.0 - efficiency + efficiency / n),
        ScalingMode::Weak => t1 * n / (1.0 - efficiency + efficiency * n),
    };

    let floored = Duration::from_secs_f64(estimated).max(min_time);
    Ok(Some(slurmtime::round_to_second(floored)))
}
