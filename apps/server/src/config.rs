// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::str::FromStr;
use wallplan_vision::PipelineConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Maximum upload size in MB.
    pub max_file_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of worker threads for parallel contour processing.
    pub worker_threads: usize,
    /// Allowed CORS origins (comma-separated, or "*" for all).
    pub cors_origins: Vec<String>,
    /// Extraction constants, read-only after startup.
    pub pipeline: PipelineConfig,
}

/// Read an environment variable, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable value");
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", 8001),
            max_file_size_mb: env_or("MAX_FILE_SIZE_MB", 25),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 60),
            worker_threads: env_or("WORKER_THREADS", num_cpus::get()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            pipeline: pipeline_from_env(),
        }
    }

    /// Upload limit in bytes.
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// True when any origin may call the API.
    pub fn cors_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Pipeline constants, each overridable through a `WALLS_*` variable.
fn pipeline_from_env() -> PipelineConfig {
    let defaults = PipelineConfig::default();
    PipelineConfig {
        min_contour_area: env_or("WALLS_MIN_AREA", defaults.min_contour_area),
        simplify_epsilon_factor: env_or("WALLS_EPSILON_FACTOR", defaults.simplify_epsilon_factor),
        rectify_threshold_factor: env_or("WALLS_RECTIFY_FACTOR", defaults.rectify_threshold_factor),
        world_scale_divisor: env_or("WALLS_SCALE_DIVISOR", defaults.world_scale_divisor),
        grid_resolution: env_or("WALLS_GRID", defaults.grid_resolution),
        binary_threshold: env_or("WALLS_THRESHOLD", defaults.binary_threshold),
        ..defaults
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8001,
            max_file_size_mb: 25,
            request_timeout_secs: 60,
            worker_threads: num_cpus::get(),
            cors_origins: vec!["*".into()],
            pipeline: PipelineConfig::default(),
        }
    }
}
