// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod args;
pub mod config;
pub mod driver;
pub mod errors;
pub mod logging;
pub mod model;
pub mod plan;
pub mod sbatch;
pub mod slurmtime;
pub mod submit;
