// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Solver configuration
//!
//! `SolverConfig` gathers everything that shapes a run: the bound strategy
//! and optional limits. It is built through `SolverConfigBuilder`, which
//! validates raw selectors once in `build()` so a constructed config is
//! always usable.
//!
//! ```rust
//! use std::time::Duration;
//! use tourbound_bnb::{config::SolverConfig, BoundStrategy};
//!
//! let config = SolverConfig::builder()
//!     .bound_version(3)
//!     .time_limit(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.bound_strategy(), Some(BoundStrategy::EndpointVisit));
//! ```

use crate::{error::ConfigurationError, eval::strategy::BoundStrategy};
use std::time::Duration;

/// Validated solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    bound_strategy: Option<BoundStrategy>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    progress_log_interval: Option<Duration>,
}

impl SolverConfig {
    /// Returns a builder with nothing set.
    #[inline]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::new()
    }

    /// Returns a config that only selects `strategy`.
    #[inline]
    pub fn with_strategy(strategy: BoundStrategy) -> Self {
        Self {
            bound_strategy: Some(strategy),
            ..Self::default()
        }
    }

    /// Returns the selected bound strategy, if any.
    #[inline]
    pub fn bound_strategy(&self) -> Option<BoundStrategy> {
        self.bound_strategy
    }

    /// Returns the wall-clock limit of a run, if any.
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns the limit on generated nodes of a run, if any.
    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    /// Returns the interval between progress log lines, if progress logging
    /// is enabled.
    #[inline]
    pub fn progress_log_interval(&self) -> Option<Duration> {
        self.progress_log_interval
    }

    /// Replaces the bound strategy.
    #[inline]
    pub fn set_bound_strategy(&mut self, strategy: BoundStrategy) {
        self.bound_strategy = Some(strategy);
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolverConfig(bound: ")?;
        match self.bound_strategy {
            Some(strategy) => write!(f, "{}", strategy)?,
            None => write!(f, "unset")?,
        }
        if let Some(limit) = self.time_limit {
            write!(f, ", time limit: {:?}", limit)?;
        }
        if let Some(limit) = self.node_limit {
            write!(f, ", node limit: {}", limit)?;
        }
        write!(f, ")")
    }
}

/// Builder for `SolverConfig`.
#[derive(Debug, Clone, Default)]
pub struct SolverConfigBuilder {
    bound_strategy: Option<BoundStrategy>,
    bound_version: Option<u32>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    progress_log_interval: Option<Duration>,
}

impl SolverConfigBuilder {
    /// Creates a builder with nothing set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the bound strategy. Overrides an earlier `bound_version`.
    #[inline]
    pub fn bound_strategy(mut self, strategy: BoundStrategy) -> Self {
        self.bound_strategy = Some(strategy);
        self.bound_version = None;
        self
    }

    /// Selects the bound strategy by its numeric version. The version is
    /// validated by `build()`. Overrides an earlier `bound_strategy`.
    #[inline]
    pub fn bound_version(mut self, version: u32) -> Self {
        self.bound_version = Some(version);
        self.bound_strategy = None;
        self
    }

    /// Aborts runs that take longer than `limit`.
    #[inline]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Aborts runs once `limit` nodes have been generated.
    #[inline]
    pub fn node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Enables progress logging with one line at most every `interval`.
    #[inline]
    pub fn progress_log_interval(mut self, interval: Duration) -> Self {
        self.progress_log_interval = Some(interval);
        self
    }

    /// Validates the collected settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBoundVersion` if a numeric
    /// version outside `1..=4` was given.
    pub fn build(self) -> Result<SolverConfig, ConfigurationError> {
        let bound_strategy = match self.bound_version {
            Some(version) => Some(BoundStrategy::try_from(version)?),
            None => self.bound_strategy,
        };

        Ok(SolverConfig {
            bound_strategy,
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            progress_log_interval: self.progress_log_interval,
        })
    }
}
