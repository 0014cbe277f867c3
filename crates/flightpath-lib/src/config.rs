//! Process-wide routing configuration.
//!
//! # Environment Variables
//!
//! - `FLIGHTPATH_MAX_LAYOVERS`: cap on flight legs per route (default: 4)
//! - `FLIGHTPATH_GROUND_HOP_KM`: ground-hop threshold in km (default: 100)
//! - `FLIGHTPATH_SEARCH_BUDGET`: maximum expanded states per query
//!   (default: 250000, `0` or `none` disables the budget)

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{GraphBuildOptions, DEFAULT_GROUND_HOP_THRESHOLD_KM};
use crate::path::{SearchLimits, DEFAULT_MAX_LAYOVERS};

pub const MAX_LAYOVERS_ENV: &str = "FLIGHTPATH_MAX_LAYOVERS";
pub const GROUND_HOP_KM_ENV: &str = "FLIGHTPATH_GROUND_HOP_KM";
pub const SEARCH_BUDGET_ENV: &str = "FLIGHTPATH_SEARCH_BUDGET";

/// Default per-query expansion budget.
pub const DEFAULT_SEARCH_BUDGET: usize = 250_000;

/// Routing settings fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutingConfig {
    pub max_layovers: u32,
    pub ground_hop_threshold_km: f64,
    pub max_expansions: Option<usize>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_layovers: DEFAULT_MAX_LAYOVERS,
            ground_hop_threshold_km: DEFAULT_GROUND_HOP_THRESHOLD_KM,
            max_expansions: Some(DEFAULT_SEARCH_BUDGET),
        }
    }
}

impl RoutingConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_empty(lookup(MAX_LAYOVERS_ENV)) {
            config.max_layovers = value
                .parse()
                .map_err(|_| invalid(MAX_LAYOVERS_ENV, &value, "expected a positive integer"))?;
        }

        if let Some(value) = non_empty(lookup(GROUND_HOP_KM_ENV)) {
            config.ground_hop_threshold_km = value
                .parse()
                .map_err(|_| invalid(GROUND_HOP_KM_ENV, &value, "expected a number"))?;
        }

        if let Some(value) = non_empty(lookup(SEARCH_BUDGET_ENV)) {
            config.max_expansions = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                match value.parse::<usize>() {
                    Ok(0) => None,
                    Ok(budget) => Some(budget),
                    Err(_) => {
                        return Err(invalid(
                            SEARCH_BUDGET_ENV,
                            &value,
                            "expected a non-negative integer or 'none'",
                        ))
                    }
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_layovers == 0 {
            return Err(invalid(
                MAX_LAYOVERS_ENV,
                &self.max_layovers.to_string(),
                "must be at least 1",
            ));
        }
        if !self.ground_hop_threshold_km.is_finite() || self.ground_hop_threshold_km <= 0.0 {
            return Err(Error::InvalidGroundHopThreshold {
                value: self.ground_hop_threshold_km,
            });
        }
        Ok(())
    }

    pub fn with_max_layovers(mut self, max_layovers: u32) -> Self {
        self.max_layovers = max_layovers;
        self
    }

    pub fn with_ground_hop_threshold_km(mut self, threshold_km: f64) -> Self {
        self.ground_hop_threshold_km = threshold_km;
        self
    }

    pub fn graph_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            ground_hop_threshold_km: self.ground_hop_threshold_km,
        }
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_layovers: self.max_layovers,
            max_expansions: self.max_expansions,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(key: &str, value: &str, message: &str) -> Error {
    Error::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
