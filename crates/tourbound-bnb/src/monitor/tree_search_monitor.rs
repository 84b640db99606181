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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `SearchCommand` for observing
//! and controlling branch-and-bound. Callbacks track the solver lifecycle,
//! and a monitor can stop the run early by answering `search_command` with
//! `Terminate`. The solver then returns its incumbent with an `Aborted`
//! termination reason.
//!
//! Lifecycle
//! - enter -> {command -> lower bound -> prune | descend -> solution} / backtrack -> exit
//! - `BnbStatistics` is provided to every callback for telemetry.

use crate::{eval::strategy::BoundStrategy, state::SearchState, stats::BnbStatistics};
use tourbound_core::num::CostNumeric;
use tourbound_model::index::CityIndex;

/// The answer of a monitor to "should the search go on?".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search, giving a human-readable reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate({})", reason),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: CostNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(
        &mut self,
        num_cities: usize,
        strategy: BoundStrategy,
        statistics: &BnbStatistics,
    );
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbStatistics);
    /// Called before every candidate is examined.
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a lower bound is computed for extending `state` with
    /// `candidate`.
    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        candidate: CityIndex,
        lower_bound: T,
        statistics: &BnbStatistics,
    );
    /// Called when `candidate` is discarded because `lower_bound` does not
    /// beat the incumbent.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        candidate: CityIndex,
        lower_bound: T,
        statistics: &BnbStatistics,
    );
    /// Called after descending; `state` already contains the new city.
    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbStatistics);
    /// Called after backtracking; `state` no longer contains the removed city.
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbStatistics);
    /// Called when a complete tour improves the incumbent.
    fn on_solution_found(&mut self, order: &[CityIndex], cost: T, statistics: &BnbStatistics);
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: CostNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        num_cities: usize,
        strategy: BoundStrategy,
        statistics: &BnbStatistics,
    ) {
        (**self).on_enter_search(num_cities, strategy, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: &SearchState<T>,
        statistics: &BnbStatistics,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        candidate: CityIndex,
        lower_bound: T,
        statistics: &BnbStatistics,
    ) {
        (**self).on_lower_bound_computed(state, candidate, lower_bound, statistics);
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        candidate: CityIndex,
        lower_bound: T,
        statistics: &BnbStatistics,
    ) {
        (**self).on_prune(state, candidate, lower_bound, statistics);
    }

    #[inline(always)]
    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbStatistics) {
        (**self).on_descend(state, statistics);
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbStatistics) {
        (**self).on_backtrack(state, statistics);
    }

    #[inline(always)]
    fn on_solution_found(&mut self, order: &[CityIndex], cost: T, statistics: &BnbStatistics) {
        (**self).on_solution_found(order, cost, statistics);
    }
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
