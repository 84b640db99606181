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

//! Progress reporting through the `log` facade
//!
//! `LogTreeSearchMonitor` writes a start banner and a final summary at `info`
//! level, a progress line at most once per `log_interval`, and every
//! incumbent improvement at `debug` level. Nothing is printed directly; the
//! embedding application decides where records go.

use crate::{
    eval::strategy::BoundStrategy,
    monitor::tree_search_monitor::TreeSearchMonitor,
    state::SearchState,
    stats::BnbStatistics,
};
use tourbound_core::num::CostNumeric;
use tourbound_model::index::CityIndex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
    lines_logged: u64,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    /// Creates a monitor that logs progress at most once per `log_interval`,
    /// reading the clock only when the generated node count has none of the
    /// bits of `clock_check_mask` set.
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
            lines_logged: 0,
        }
    }

    /// Returns the best cost seen during the current run.
    #[inline]
    pub fn best_cost(&self) -> Option<T> {
        self.best_cost
    }

    /// Returns the number of progress lines emitted during the current run.
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }

    #[inline(always)]
    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<14} | {:<14} | {:<7} | {:<16} | {:<16}",
            "Elapsed",
            "Generated",
            "Pruned",
            "Depth",
            "Best Tour",
            "Current Path"
        );
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState<T>, stats: &BnbStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_str = match self.best_cost {
            Some(cost) => format!("{}", cost),
            None => "Inf".to_string(),
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        log::info!(
            "{:<9} | {:<14} | {:<14} | {:<7} | {:<16} | {:<16}",
            elapsed_field,
            stats.nodes_generated,
            stats.nodes_pruned,
            state.len(),
            best_str,
            state.current_cost()
        );

        self.last_log_time = now;
        self.lines_logged = self.lines_logged.saturating_add(1);
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(
        &mut self,
        num_cities: usize,
        strategy: BoundStrategy,
        _statistics: &BnbStatistics,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        self.lines_logged = 0;

        log::info!(
            "Branch-and-bound over {} cities with bound {}",
            num_cities,
            strategy
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbStatistics) {
        log::info!(
            "Search finished in {:.2?}: {} generated, {} pruned, {} improving tours",
            self.start_time.elapsed(),
            statistics.nodes_generated,
            statistics.nodes_pruned,
            statistics.solutions_found
        );
    }

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

    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbStatistics) {
        if (statistics.nodes_generated & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbStatistics) {}

    fn on_solution_found(&mut self, _order: &[CityIndex], cost: T, statistics: &BnbStatistics) {
        self.best_cost = Some(cost);
        log::debug!(
            "Improved tour with cost {} after {} generated nodes",
            cost,
            statistics.nodes_generated
        );
    }
}
