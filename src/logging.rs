// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::env;

use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
enum LogFormat {
    Json,
    Compact,
}

pub fn init(verbose: bool) {
    let filter = build_filter(verbose);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match parse_format() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    match env::var("SCALEX_LOG") {
        Ok(value) => EnvFilter::new(value),
        Err(_) => {
            if verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        }
    }
}

fn parse_format() -> LogFormat {
    match env::var("SCALEX_LOG_FORMAT")
        .ok()
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_ascii_lowercase())
    {
        Some(value) if value == "json" => LogFormat::Json,
        _ => LogFormat::Compact,
    }
}
