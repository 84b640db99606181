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

//! User-facing TSP solution object
//!
//! `TspSolution` owns a city list and the best tour known for it. Building
//! one runs the nearest-neighbour heuristic, so the readers return a valid
//! tour (the greedy seed) even before `solve` is called. `solve` then runs
//! the exact search with the configured bound strategy and leaves the proven
//! optimum behind.
//!
//! ```rust
//! use tourbound_bnb::{BoundStrategy, TspSolution};
//! use tourbound_model::city::LineCity;
//!
//! let cities: Vec<LineCity<f64>> = [0.0, 10.0, 15.0, 20.0].map(LineCity::new).to_vec();
//! let mut solution = TspSolution::new(cities);
//! solution.set_bound_strategy(BoundStrategy::EndpointVisit);
//! solution.solve().unwrap();
//!
//! assert_eq!(solution.cost(), 40.0);
//! assert!(solution.is_optimal());
//! ```

use crate::{
    bnb::BnbSolver,
    config::SolverConfig,
    error::ConfigurationError,
    eval::strategy::BoundStrategy,
    greedy::nearest_neighbor_tour,
    incumbent::Incumbent,
    monitor::{
        composite::CompositeTreeSearchMonitor,
        limits::{NodeLimitMonitor, TimeLimitMonitor},
        log::LogTreeSearchMonitor,
        no_op::NoOperationMonitor,
        tree_search_monitor::TreeSearchMonitor,
    },
    result::{BnbSolverOutcome, TerminationReason},
    stats::BnbStatistics,
};
use tourbound_core::combinatorics::search_tree_size;
use tourbound_model::{city::City, index::CityIndex, model::TspModel, tour::Tour};

/// How many search commands a configured time limit lets pass between clock
/// reads.
const TIME_LIMIT_CHECK_INTERVAL: u64 = 1024;

/// Progress lines are considered only when the generated node count is a
/// multiple of this mask plus one.
const PROGRESS_CLOCK_CHECK_MASK: u64 = 1023;

/// A TSP instance together with the best tour known for it.
pub struct TspSolution<C>
where
    C: City,
{
    model: TspModel<C>,
    config: SolverConfig,
    incumbent: Incumbent<C::Cost>,
    statistics: BnbStatistics,
    termination_reason: Option<TerminationReason>,
    solver: BnbSolver<C::Cost>,
}

impl<C> TspSolution<C>
where
    C: City,
{
    /// Creates a solution for `cities` seeded with the nearest-neighbour
    /// tour. City 0 is the fixed start of every tour.
    pub fn new(cities: Vec<C>) -> Self {
        Self::from_model(TspModel::new(cities))
    }

    /// Creates a solution for `cities` with the given configuration.
    pub fn with_config(cities: Vec<C>, config: SolverConfig) -> Self {
        let mut solution = Self::new(cities);
        solution.config = config;
        solution
    }

    /// Creates a solution for an already built model.
    pub fn from_model(model: TspModel<C>) -> Self {
        let seed = nearest_neighbor_tour(&model);
        log::debug!(
            "Greedy seed over {} cities costs {}",
            model.num_cities(),
            seed.cost()
        );

        let solver = BnbSolver::preallocated(model.num_cities());
        Self {
            model,
            config: SolverConfig::default(),
            incumbent: Incumbent::from(seed),
            statistics: BnbStatistics::default(),
            termination_reason: None,
            solver,
        }
    }

    /// Selects the bound strategy by its numeric version.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBoundVersion` if `version` is not
    /// in `1..=4`; the previous selection is kept in that case.
    pub fn set_bound_version(&mut self, version: u32) -> Result<(), ConfigurationError> {
        let strategy = BoundStrategy::try_from(version)?;
        self.config.set_bound_strategy(strategy);
        Ok(())
    }

    /// Selects the bound strategy.
    #[inline]
    pub fn set_bound_strategy(&mut self, strategy: BoundStrategy) {
        self.config.set_bound_strategy(strategy);
    }

    /// Returns the selected bound strategy, if any.
    #[inline]
    pub fn bound_strategy(&self) -> Option<BoundStrategy> {
        self.config.bound_strategy()
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replaces the configuration.
    #[inline]
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Runs the exact search with the configured strategy and limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::BoundStrategyNotSet` if no strategy has
    /// been selected. Nothing is searched in that case.
    pub fn solve(&mut self) -> Result<BnbSolverOutcome<C::Cost>, ConfigurationError> {
        self.solve_with_monitor(NoOperationMonitor::new())
    }

    /// Like `solve`, additionally reporting every search event to `monitor`.
    ///
    /// Limits from the configuration are checked before `monitor` is asked
    /// whether to continue.
    pub fn solve_with_monitor<S>(
        &mut self,
        monitor: S,
    ) -> Result<BnbSolverOutcome<C::Cost>, ConfigurationError>
    where
        S: TreeSearchMonitor<C::Cost>,
    {
        let strategy = self
            .config
            .bound_strategy()
            .ok_or(ConfigurationError::BoundStrategyNotSet)?;

        let mut monitors = CompositeTreeSearchMonitor::with_capacity(4);
        if let Some(limit) = self.config.time_limit() {
            monitors.add_monitor(TimeLimitMonitor::new(limit, TIME_LIMIT_CHECK_INTERVAL));
        }
        if let Some(limit) = self.config.node_limit() {
            monitors.add_monitor(NodeLimitMonitor::new(limit));
        }
        if let Some(interval) = self.config.progress_log_interval() {
            monitors.add_monitor(LogTreeSearchMonitor::new(
                interval,
                PROGRESS_CLOCK_CHECK_MASK,
            ));
        }
        monitors.add_monitor(monitor);

        let outcome = self
            .solver
            .solve(&self.model, strategy, &mut self.incumbent, monitors);

        log::debug!(
            "Solved {} cities with bound {}: cost {}, {} generated, {} pruned of {} possible ({})",
            self.model.num_cities(),
            strategy,
            outcome.tour().cost(),
            outcome.statistics().nodes_generated,
            outcome.statistics().nodes_pruned,
            self.possible_nodes(),
            outcome.termination_reason()
        );

        self.statistics = outcome.statistics().clone();
        self.termination_reason = Some(outcome.termination_reason().clone());
        Ok(outcome)
    }

    /// Returns the cycle cost of the best tour known.
    #[inline]
    pub fn cost(&self) -> C::Cost {
        self.incumbent.upper_bound()
    }

    /// Returns the visiting order of the best tour known, starting at city 0.
    #[inline]
    pub fn solution(&self) -> &[CityIndex] {
        self.incumbent.order()
    }

    /// Returns the cities of the best tour known, in visiting order.
    pub fn solution_cities(&self) -> impl Iterator<Item = &C> + '_ {
        self.incumbent
            .order()
            .iter()
            .map(move |&index| self.model.city(index))
    }

    /// Returns the best tour known.
    #[inline]
    pub fn tour(&self) -> Tour<C::Cost> {
        self.incumbent.to_tour()
    }

    /// Returns the number of candidates pruned during the last run.
    #[inline]
    pub fn pruned_count(&self) -> u64 {
        self.statistics.nodes_pruned
    }

    /// Returns the number of nodes generated during the last run.
    #[inline]
    pub fn generated_count(&self) -> u64 {
        self.statistics.nodes_generated
    }

    /// Returns the number of nodes of the full, unpruned search tree.
    #[inline]
    pub fn possible_nodes(&self) -> u64 {
        search_tree_size(self.model.num_cities())
    }

    /// Returns the statistics of the last run.
    #[inline]
    pub fn statistics(&self) -> &BnbStatistics {
        &self.statistics
    }

    /// Returns why the last run stopped, or `None` before the first run.
    #[inline]
    pub fn termination_reason(&self) -> Option<&TerminationReason> {
        self.termination_reason.as_ref()
    }

    /// Returns `true` if the last run proved the current tour optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(
            self.termination_reason,
            Some(TerminationReason::OptimalityProven)
        )
    }

    /// Returns the cities.
    #[inline]
    pub fn cities(&self) -> &[C] {
        self.model.cities()
    }

    /// Returns the model.
    #[inline]
    pub fn model(&self) -> &TspModel<C> {
        &self.model
    }
}

impl<C> std::fmt::Debug for TspSolution<C>
where
    C: City,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TspSolution")
            .field("num_cities", &self.model.num_cities())
            .field("config", &self.config)
            .field("incumbent", &self.incumbent)
            .field("termination_reason", &self.termination_reason)
            .finish()
    }
}

impl<C> std::fmt::Display for TspSolution<C>
where
    C: City,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tour())?;
        writeln!(f, "   Generated: {}", self.generated_count())?;
        writeln!(f, "   Pruned: {}", self.pruned_count())?;
        write!(f, "   Possible: {}", self.possible_nodes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;
    use tourbound_model::city::{LineCity, PlanarCity};

    fn line_cities(positions: &[f64]) -> Vec<LineCity<f64>> {
        positions.iter().copied().map(LineCity::new).collect()
    }

    fn indices(order: &[CityIndex]) -> Vec<usize> {
        order.iter().map(|c| c.get()).collect()
    }

    #[test]
    fn test_readers_return_greedy_seed_before_solve() {
        let solution = TspSolution::new(line_cities(&[3.0, 1.0, 2.0]));
        assert_eq!(solution.cost(), 4.0);
        assert_eq!(indices(solution.solution()), vec![0, 2, 1]);
        assert_eq!(solution.generated_count(), 0);
        assert_eq!(solution.pruned_count(), 0);
        assert_eq!(solution.termination_reason(), None);
        assert!(!solution.is_optimal());
    }

    #[rstest]
    #[case(1, 13, 1)]
    #[case(2, 15, 0)]
    #[case(3, 4, 6)]
    #[case(4, 11, 3)]
    fn test_four_cities_on_a_line(
        #[case] version: u32,
        #[case] generated: u64,
        #[case] pruned: u64,
    ) {
        let mut solution = TspSolution::new(line_cities(&[0.0, 10.0, 15.0, 20.0]));
        solution.set_bound_version(version).unwrap();
        solution.solve().unwrap();

        assert_eq!(solution.cost(), 40.0);
        assert_eq!(indices(solution.solution()), vec![0, 1, 2, 3]);
        assert_eq!(solution.generated_count(), generated);
        assert_eq!(solution.pruned_count(), pruned);
        assert_eq!(solution.possible_nodes(), 16);
        assert!(solution.is_optimal());
    }

    #[test]
    fn test_endpoint_visit_generates_fewest_nodes() {
        let positions = [8.0, 3.0, 17.0, 11.0, 0.0, 6.0, 14.0];
        let mut generated = Vec::new();
        for strategy in BoundStrategy::ALL {
            let mut solution = TspSolution::new(line_cities(&positions));
            solution.set_bound_strategy(strategy);
            solution.solve().unwrap();
            assert_eq!(solution.cost(), 34.0);
            generated.push(solution.generated_count());
        }
        assert_eq!(generated, vec![410, 375, 87, 343]);
    }

    #[test]
    fn test_single_city() {
        let mut solution = TspSolution::new(line_cities(&[7.0]));
        solution.set_bound_strategy(BoundStrategy::GlobalMinEdge);
        solution.solve().unwrap();

        assert_eq!(solution.cost(), 0.0);
        assert_eq!(indices(solution.solution()), vec![0]);
        assert_eq!(solution.generated_count(), 0);
        assert_eq!(solution.pruned_count(), 0);
        assert_eq!(solution.possible_nodes(), 1);
    }

    #[test]
    fn test_empty_instance() {
        let mut solution = TspSolution::<LineCity<f64>>::new(Vec::new());
        solution.set_bound_strategy(BoundStrategy::MinIncoming);
        solution.solve().unwrap();

        assert_eq!(solution.cost(), 0.0);
        assert!(solution.solution().is_empty());
        assert_eq!(solution.possible_nodes(), 0);
        assert!(solution.is_optimal());
    }

    #[test]
    fn test_invalid_version_is_rejected_before_search() {
        let mut solution = TspSolution::new(line_cities(&[0.0, 10.0, 15.0, 20.0]));
        assert_eq!(
            solution.set_bound_version(5),
            Err(ConfigurationError::InvalidBoundVersion(5))
        );
        assert_eq!(solution.bound_strategy(), None);
        assert_eq!(
            solution.solve().unwrap_err(),
            ConfigurationError::BoundStrategyNotSet
        );
        assert_eq!(solution.generated_count(), 0);
        assert_eq!(solution.termination_reason(), None);
    }

    #[test]
    fn test_invalid_version_keeps_previous_selection() {
        let mut solution = TspSolution::new(line_cities(&[0.0, 1.0]));
        solution.set_bound_version(2).unwrap();
        assert!(solution.set_bound_version(0).is_err());
        assert_eq!(solution.bound_strategy(), Some(BoundStrategy::MinIncoming));
    }

    #[test]
    fn test_solve_is_idempotent_and_counters_reset() {
        let mut solution = TspSolution::new(vec![
            PlanarCity::<f64>::new(0.0, 0.0),
            PlanarCity::new(10.0, 0.0),
            PlanarCity::new(5.0, 1.0),
            PlanarCity::new(2.0, 7.0),
            PlanarCity::new(8.0, 6.0),
            PlanarCity::new(4.0, 4.0),
        ]);
        solution.set_bound_strategy(BoundStrategy::EndpointVisit);

        solution.solve().unwrap();
        let first_order = solution.solution().to_vec();
        let first_cost = solution.cost();
        assert!((first_cost - 31.867762402776915).abs() < 1e-9);
        assert_eq!(solution.generated_count(), 22);
        assert_eq!(solution.statistics().solutions_found, 1);

        solution.solve().unwrap();
        assert_eq!(solution.solution(), first_order.as_slice());
        assert_eq!(solution.cost(), first_cost);
        assert_eq!(solution.statistics().solutions_found, 0);
        assert!(solution.generated_count() <= 22);
    }

    #[test]
    fn test_node_limit_aborts_with_best_effort_tour() {
        let config = SolverConfig::builder()
            .bound_strategy(BoundStrategy::GlobalMinEdge)
            .node_limit(5)
            .build()
            .unwrap();
        let mut solution =
            TspSolution::with_config(line_cities(&[8.0, 3.0, 17.0, 11.0, 0.0, 6.0, 14.0]), config);

        let outcome = solution.solve().unwrap();

        assert!(!outcome.is_optimal());
        assert!(!solution.is_optimal());
        assert_eq!(solution.generated_count(), 5);
        assert!(matches!(
            solution.termination_reason(),
            Some(TerminationReason::Aborted(_))
        ));
        assert!(solution.tour().is_hamiltonian_cycle(7));
    }

    #[test]
    fn test_generous_limits_still_prove_optimality() {
        let config = SolverConfig::builder()
            .bound_version(3)
            .time_limit(Duration::from_secs(60))
            .node_limit(1_000_000)
            .progress_log_interval(Duration::from_secs(60))
            .build()
            .unwrap();
        let mut solution = TspSolution::with_config(line_cities(&[0.0, 7.0, 3.0, 9.0, 1.0]), config);

        solution.solve().unwrap();
        assert!(solution.is_optimal());
        assert_eq!(solution.cost(), 18.0);
        assert_eq!(indices(solution.solution()), vec![0, 4, 2, 1, 3]);
    }

    #[test]
    fn test_solution_cities_follow_the_order() {
        let mut solution = TspSolution::new(line_cities(&[3.0, 1.0, 2.0]));
        solution.set_bound_strategy(BoundStrategy::TrackMinEdge);
        solution.solve().unwrap();

        let positions: Vec<f64> = solution.solution_cities().map(LineCity::position).collect();
        assert_eq!(positions, vec![3.0, 2.0, 1.0]);
        assert_eq!(solution.cities().len(), 3);
    }

    #[test]
    fn test_display_summarises_tour_and_counters() {
        let mut solution = TspSolution::new(line_cities(&[0.0, 10.0, 15.0, 20.0]));
        solution.set_bound_strategy(BoundStrategy::EndpointVisit);
        solution.solve().unwrap();

        assert_eq!(
            solution.to_string(),
            "Tour Summary\n   Cost: 40\n   Cycle: 0 -> 1 -> 2 -> 3 -> 0\n   Generated: 4\n   Pruned: 6\n   Possible: 16"
        );
    }
}
