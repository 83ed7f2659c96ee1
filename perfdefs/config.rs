use std::path::PathBuf;

use crate::common::PERF_EVENT_PARANOID_PATH;
use crate::counters::{parse_counter_sets, CounterSet};
use crate::error::Result;

pub const COUNTERS_ENV: &str = "PERFDEFS_COUNTERS";
pub const PARANOID_PATH_ENV: &str = "PERFDEFS_PARANOID_PATH";

#[derive(Debug, Clone)]
pub struct PerfConfig {
    /// Counter sets used when none are given, each a comma-separated list
    pub default_counters: Vec<String>,
    pub paranoid_path: PathBuf,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            default_counters: Vec::new(),
            paranoid_path: PathBuf::from(PERF_EVENT_PARANOID_PATH),
        }
    }
}

impl PerfConfig {
    pub fn new(default_counters: Vec<String>, paranoid_path: PathBuf) -> Self {
        Self {
            default_counters,
            paranoid_path,
        }
    }

    /// Build the configuration from `PERFDEFS_COUNTERS` and `PERFDEFS_PARANOID_PATH`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(COUNTERS_ENV).ok(),
            std::env::var(PARANOID_PATH_ENV).ok(),
        )
    }

    fn from_vars(counters: Option<String>, paranoid_path: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(spec) = counters {
            let sets = Self::split_sets(&spec);
            match parse_counter_sets(&sets) {
                Ok(parsed) => {
                    tracing::info!("Using {} default counter set(s) from {}", parsed.len(), COUNTERS_ENV);
                    config.default_counters = sets;
                }
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", COUNTERS_ENV, e);
                }
            }
        }

        if let Some(path) = paranoid_path.filter(|p| !p.trim().is_empty()) {
            config.paranoid_path = PathBuf::from(path.trim());
        }

        config
    }

    /// Split `cycles,instructions;page-faults` into one entry per set
    fn split_sets(spec: &str) -> Vec<String> {
        spec.split(';')
            .map(str::trim)
            .filter(|set| !set.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn default_counter_sets(&self) -> Result<Vec<CounterSet>> {
        parse_counter_sets(&self.default_counters)
    }
}
