// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

/// Errors produced while planning a scaling study.
///
/// All of these are fatal to the enclosing call: the driver halts the whole
/// study on the first error instead of skipping a task count, since the runs
/// are only meaningful when compared against each other.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlanError {
    /// The time string matched neither accepted grammar. Never substitute a
    /// default here: a typo must not turn into an unlimited-duration job.
    #[error(
        "could not parse any time information from '{0}'; \
         examples of valid strings: '2', '2:03', '1:02:03', '2-8', '2-8:05', '2-8:05:20'"
    )]
    MalformedDuration(String),

    #[error("parallel efficiency must be in (0, 1], got {0}")]
    InvalidEfficiency(f64),

    /// Only reachable when a caller requests an estimate directly instead of
    /// going through the exponent-based plan enumeration.
    #[error("task count must be a positive power of two, got {0}")]
    InvalidTaskCount(u64),
}
