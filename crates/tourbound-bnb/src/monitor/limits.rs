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

//! Limit monitors for tree search
//!
//! Each monitor stays silent until its limit is hit and then answers
//! `search_command` with `Terminate`, which makes the solver return its
//! incumbent as an aborted (not proven optimal) result.
//!
//! - `TimeLimitMonitor`: wall-clock budget, checked every `check_interval`
//!   commands to keep clock reads off the hot path.
//! - `NodeLimitMonitor`: budget on generated nodes.
//! - `SolutionLimitMonitor`: stops after a number of improving tours.

use crate::{
    eval::strategy::BoundStrategy,
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::BnbStatistics,
};
use std::marker::PhantomData;
use std::time::{Duration, Instant};
use tourbound_core::num::CostNumeric;
use tourbound_model::index::CityIndex;

/// Generates the event callbacks a limit monitor ignores.
macro_rules! ignore_search_events {
    () => {
        fn on_lower_bound_computed(
            &mut self,
            _state: &SearchState<T>,
            _candidate: CityIndex,
            _lower_bound: T,
            _statistics: &BnbStatistics,
        ) {
        }

        fn on_prune(
            &mut self,
            _state: &SearchState<T>,
            _candidate: CityIndex,
            _lower_bound: T,
            _statistics: &BnbStatistics,
        ) {
        }

        fn on_descend(&mut self, _state: &SearchState<T>, _statistics: &BnbStatistics) {}

        fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbStatistics) {}

        fn on_solution_found(
            &mut self,
            _order: &[CityIndex],
            _cost: T,
            _statistics: &BnbStatistics,
        ) {
        }
    };
}

/// A monitor that terminates the search after a specified duration.
///
/// Checks the clock only every `check_interval` commands to minimize overhead.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    ops_since_last_check: u64,
    _marker: PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Creates a new `TimeLimitMonitor` with the specified duration and check interval.
    /// `check_interval` specifies how many commands to answer between time checks.
    /// A higher value reduces overhead but may lead to slightly exceeding the time limit.
    pub fn new(duration: Duration, check_interval: u64) -> Self {
        Self {
            time_limit: duration,
            start_time: None,
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a new `TimeLimitMonitor` with the specified duration and a default check interval of 10,000.
    pub fn with_default_check_interval(duration: Duration) -> Self {
        Self::new(duration, 10_000)
    }

    /// Returns the configured time limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(
        &mut self,
        _num_cities: usize,
        _strategy: BoundStrategy,
        _statistics: &BnbStatistics,
    ) {
        self.start_time = Some(Instant::now());
        self.ops_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbStatistics) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbStatistics,
    ) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add(1);

        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() > self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "Time limit of {:?} exceeded",
                    self.time_limit
                ));
            }
        }

        SearchCommand::Continue
    }

    ignore_search_events!();
}

/// A monitor that terminates the search once a number of nodes has been
/// generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor<T> {
    node_limit: u64,
    _marker: PhantomData<T>,
}

impl<T> NodeLimitMonitor<T> {
    /// Creates a new `NodeLimitMonitor` with the specified node limit.
    pub fn new(node_limit: u64) -> Self {
        Self {
            node_limit,
            _marker: PhantomData,
        }
    }

    /// Returns the configured node limit.
    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl<T> TreeSearchMonitor<T> for NodeLimitMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(
        &mut self,
        _num_cities: usize,
        _strategy: BoundStrategy,
        _statistics: &BnbStatistics,
    ) {
    }

    fn on_exit_search(&mut self, _statistics: &BnbStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        statistics: &BnbStatistics,
    ) -> SearchCommand {
        if statistics.nodes_generated >= self.node_limit {
            SearchCommand::Terminate(format!("Node limit of {} reached", self.node_limit))
        } else {
            SearchCommand::Continue
        }
    }

    ignore_search_events!();
}

/// A monitor that terminates the search once a number of improving tours
/// has been found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLimitMonitor<T> {
    solution_limit: u64,
    _marker: PhantomData<T>,
}

impl<T> SolutionLimitMonitor<T> {
    /// Creates a new `SolutionLimitMonitor` with the specified solution limit.
    pub fn new(solution_limit: u64) -> Self {
        Self {
            solution_limit,
            _marker: PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for SolutionLimitMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(
        &mut self,
        _num_cities: usize,
        _strategy: BoundStrategy,
        _statistics: &BnbStatistics,
    ) {
    }

    fn on_exit_search(&mut self, _statistics: &BnbStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        statistics: &BnbStatistics,
    ) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            SearchCommand::Terminate("Solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }

    ignore_search_events!();
}
