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

//! Branch-and-Bound solver for the symmetric Travelling Salesman Problem.
//!
//! This module implements a stateful search engine that enumerates the tours
//! rooted at city 0 in depth-first order while pruning every extension whose
//! lower bound cannot beat the incumbent. The `BnbSolver` owns the reusable
//! path state and candidate stack, so repeated solves do not reallocate once
//! warmed up; `preallocated` sizes both up front.
//!
//! The recursion of a textbook branch-and-bound is unrolled onto an explicit
//! frame stack: one frame per city on the track, each holding a cursor over
//! the candidates for the next position. A search session object encapsulates
//! per-run state, statistics and timing. Every city pushed onto the track is
//! popped again on every exit path, including an abort requested by a
//! monitor, so the solver is back at the root after each run.

use crate::{
    eval::{engine::BoundEngine, strategy::BoundStrategy},
    incumbent::Incumbent,
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    result::{BnbSolverOutcome, TerminationReason},
    stack::SearchStack,
    state::SearchState,
    stats::BnbStatistics,
};
use tourbound_core::num::CostNumeric;
use tourbound_model::{city::City, index::CityIndex, model::TspModel, model::ROOT};

/// An exact branch-and-bound solver over the tours of a `TspModel`.
///
/// This is just the execution engine: the incumbent to improve is supplied
/// by the caller, and bounds are computed by a `BoundEngine` for the
/// selected `BoundStrategy`.
#[derive(Clone, Debug)]
pub struct BnbSolver<T>
where
    T: CostNumeric,
{
    state: SearchState<T>,
    stack: SearchStack,
}

impl<T> Default for BnbSolver<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: CostNumeric,
{
    /// Creates a new solver with empty internal structures.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: SearchState::new(0),
            stack: SearchStack::new(),
        }
    }

    /// Creates a solver whose structures can hold instances of up to
    /// `num_cities` cities without reallocating.
    #[inline]
    pub fn preallocated(num_cities: usize) -> Self {
        Self {
            state: SearchState::new(num_cities),
            stack: SearchStack::preallocated(num_cities),
        }
    }

    /// Returns the path state. Between runs it is the root state.
    #[inline]
    pub fn state(&self) -> &SearchState<T> {
        &self.state
    }

    /// Returns the current number of frames on the candidate stack.
    /// Between runs it is zero.
    #[inline]
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Searches `model` for a tour cheaper than `incumbent`, installing every
    /// improvement into it.
    ///
    /// When the run is not aborted by `monitor`, the incumbent afterwards is
    /// an optimal tour and the outcome reports `OptimalityProven`.
    pub fn solve<C, S>(
        &mut self,
        model: &TspModel<C>,
        strategy: BoundStrategy,
        incumbent: &mut Incumbent<T>,
        mut monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        C: City<Cost = T>,
        S: TreeSearchMonitor<T>,
    {
        self.reset(model.num_cities());

        let session =
            BnbSolverSearchSession::new(self, model, strategy, incumbent, &mut monitor);
        session.run()
    }

    /// Rewinds the solver to the root of an instance with `num_cities`
    /// cities, keeping capacities.
    #[inline]
    fn reset(&mut self, num_cities: usize) {
        self.state.reset(num_cities);
        self.stack.clear();
        self.stack.ensure_capacity(num_cities);
    }
}

impl<T> std::fmt::Display for BnbSolver<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BnbSolver({}, {})", self.state, self.stack)
    }
}

/// A single run of the solver.
struct BnbSolverSearchSession<'a, T, C, S>
where
    T: CostNumeric,
    C: City<Cost = T>,
    S: TreeSearchMonitor<T>,
{
    solver: &'a mut BnbSolver<T>,
    model: &'a TspModel<C>,
    strategy: BoundStrategy,
    engine: BoundEngine<T>,
    incumbent: &'a mut Incumbent<T>,
    monitor: &'a mut S,
    stats: BnbStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, C, S> BnbSolverSearchSession<'a, T, C, S>
where
    T: CostNumeric,
    C: City<Cost = T>,
    S: TreeSearchMonitor<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        model: &'a TspModel<C>,
        strategy: BoundStrategy,
        incumbent: &'a mut Incumbent<T>,
        monitor: &'a mut S,
    ) -> Self {
        Self {
            solver,
            model,
            strategy,
            engine: BoundEngine::new(model),
            incumbent,
            monitor,
            stats: BnbStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor
            .on_enter_search(self.model.num_cities(), self.strategy, &self.stats);

        self.initialize();

        let termination_reason = loop {
            if self.solver.stack.is_empty() {
                break TerminationReason::OptimalityProven;
            }

            if let SearchCommand::Terminate(msg) =
                self.monitor.search_command(&self.solver.state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            match self.solver.stack.next_candidate(self.solver.state.visited()) {
                Some(candidate) => self.expand(candidate),
                None => self.backtrack_step(),
            }
        };

        self.unwind();
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Pushes the root frame, or settles the trivial instances that have no
    /// candidates at all.
    #[inline]
    fn initialize(&mut self) {
        if self.solver.state.is_empty() {
            return;
        }
        self.stats.on_depth_update(self.solver.state.len() as u64);

        if self.solver.state.is_complete() {
            self.handle_complete_solution();
            return;
        }

        self.solver.stack.push_frame();
    }

    /// Prices `candidate` as the next city and either prunes it or descends.
    ///
    /// While only the root is on the track the bound is not evaluated and
    /// every candidate is expanded.
    #[inline(always)]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn expand(&mut self, candidate: CityIndex) {
        debug_assert_eq!(
            self.solver.stack.depth(),
            self.solver.state.len(),
            "called `BnbSolverSearchSession::expand` with {} frames for a track of {} cities",
            self.solver.stack.depth(),
            self.solver.state.len()
        );

        if self.solver.state.len() >= 2 {
            let lower_bound =
                self.engine
                    .lower_bound(self.model, &self.solver.state, candidate, self.strategy);
            self.stats.on_bound_evaluated();
            self.monitor.on_lower_bound_computed(
                &self.solver.state,
                candidate,
                lower_bound,
                &self.stats,
            );

            // NaN bounds fail the comparison and are pruned.
            if !(lower_bound < self.incumbent.upper_bound()) {
                self.stats.on_node_pruned();
                self.monitor
                    .on_prune(&self.solver.state, candidate, lower_bound, &self.stats);
                return;
            }
        }

        self.descend(candidate);
    }

    /// Moves to `candidate`. A complete tour is evaluated and retracted
    /// right away; otherwise a new frame is opened for the next position.
    #[inline(always)]
    fn descend(&mut self, candidate: CityIndex) {
        let edge = self.model.cost(self.solver.state.tail(), candidate);
        self.solver.state.push_city(candidate, edge);

        self.stats.on_node_generated();
        self.stats.on_depth_update(self.solver.state.len() as u64);
        self.monitor.on_descend(&self.solver.state, &self.stats);

        if self.solver.state.is_complete() {
            self.handle_complete_solution();
            self.retract();
        } else {
            self.solver.stack.push_frame();
        }
    }

    /// Leaves an exhausted frame. The root frame owns no city, so popping it
    /// leaves the track untouched.
    #[inline]
    fn backtrack_step(&mut self) {
        self.solver.stack.pop_frame();
        if !self.solver.stack.is_empty() {
            self.retract();
        }
    }

    #[inline]
    fn retract(&mut self) {
        self.solver.state.pop_city();
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.solver.state, &self.stats);
    }

    /// Closes the current track into a cycle and offers it to the incumbent.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the track is not complete.
    #[inline(always)]
    fn handle_complete_solution(&mut self) {
        debug_assert!(
            self.solver.state.is_complete(),
            "called `BnbSolverSearchSession::handle_complete_solution` with an incomplete track of {} out of {} cities",
            self.solver.state.len(),
            self.solver.state.num_cities()
        );

        let cycle_cost =
            self.solver.state.current_cost() + self.model.cost(self.solver.state.tail(), ROOT);

        if self
            .incumbent
            .try_install(self.solver.state.track(), cycle_cost)
        {
            self.stats.on_solution_found();
            self.monitor
                .on_solution_found(self.solver.state.track(), cycle_cost, &self.stats);
        }
    }

    /// Pops every open frame and every city above the root. After an
    /// exhausted search this is a no-op; after an abort it restores the root
    /// state without reporting the pops as search backtracks.
    #[inline]
    fn unwind(&mut self) {
        while self.solver.stack.pop_frame().is_some() {
            if !self.solver.stack.is_empty() {
                self.solver.state.pop_city();
            }
        }
        while self.solver.state.pop_city().is_some() {}
    }

    /// Package the incumbent and statistics into an outcome.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        let tour = self.incumbent.to_tour();
        match reason {
            TerminationReason::OptimalityProven => BnbSolverOutcome::optimal(tour, self.stats),
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(tour, msg, self.stats),
        }
    }
}
