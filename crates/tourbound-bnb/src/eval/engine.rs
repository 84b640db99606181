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

//! Lower-bound engine
//!
//! `BoundEngine` prices a candidate extension `track -> candidate` of the
//! current path. The bound of a candidate is
//!
//! `current path cost + cost(tail, candidate) + completion estimate`
//!
//! where the completion estimate depends on the selected `BoundStrategy`.
//! With `remaining = num_cities - track.len()` (which counts the candidate):
//!
//! - `GlobalMinEdge`: `remaining * min edge of the instance`.
//! - `MinIncoming`: the cheapest incident cost of every unvisited city other
//!   than the candidate, plus that of the root.
//! - `EndpointVisit`: half the cheapest incident cost of the root and of the
//!   candidate, plus the cheapest two-edge visit of every unvisited city other
//!   than the candidate and of the root.
//! - `TrackMinEdge`: `remaining * min edge still usable by the completion`.
//!
//! Every estimate is admissible: it never exceeds the cost of the cheapest
//! way to finish the tour from the candidate.

use crate::{
    eval::{incident::IncidentCosts, strategy::BoundStrategy},
    state::SearchState,
};
use num_traits::{Float, Zero};
use tourbound_core::num::CostNumeric;
use tourbound_model::{city::City, index::CityIndex, model::TspModel, model::ROOT};

/// Returns the cheapest edge between two distinct cities of the instance,
/// or zero when there are fewer than two cities.
pub fn global_min_edge<C>(model: &TspModel<C>) -> C::Cost
where
    C: City,
{
    let n = model.num_cities();
    if n < 2 {
        return Zero::zero();
    }

    let mut best: C::Cost = Float::infinity();
    for i in 0..n {
        for j in (i + 1)..n {
            best = best.min(model.cost(CityIndex::new(i), CityIndex::new(j)));
        }
    }
    best
}

/// Returns the cheapest edge a completion of `state` can still use.
///
/// That is the edge `root - tail`, any edge from the root or the tail into an
/// unvisited city, and any edge between two unvisited cities.
pub fn min_edge_among_remaining<C>(model: &TspModel<C>, state: &SearchState<C::Cost>) -> C::Cost
where
    C: City,
{
    let tail = state.tail();
    let mut best = model.cost(ROOT, tail);

    for i in state.unvisited() {
        best = best
            .min(model.cost(ROOT, i))
            .min(model.cost(tail, i));
        for j in state.unvisited().skip_while(|&j| j <= i) {
            best = best.min(model.cost(i, j));
        }
    }
    best
}

/// Computes admissible lower bounds for candidate extensions.
///
/// The engine caches the instance-wide minimum edge and owns the scratch
/// buffer for incident costs, so pricing a candidate does not allocate.
#[derive(Clone, Debug)]
pub struct BoundEngine<T> {
    global_min_edge: T,
    incident: IncidentCosts<T>,
}

impl<T> BoundEngine<T>
where
    T: CostNumeric,
{
    /// Creates an engine for `model`.
    pub fn new<C>(model: &TspModel<C>) -> Self
    where
        C: City<Cost = T>,
    {
        Self {
            global_min_edge: global_min_edge(model),
            incident: IncidentCosts::preallocated(model.num_cities()),
        }
    }

    /// Returns the cached instance-wide minimum edge.
    #[inline]
    pub fn global_min_edge(&self) -> T {
        self.global_min_edge
    }

    /// Returns the lower bound on every complete tour that extends the track
    /// of `state` with `candidate`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `candidate` is already on the track.
    #[inline]
    pub fn lower_bound<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        candidate: CityIndex,
        strategy: BoundStrategy,
    ) -> T
    where
        C: City<Cost = T>,
    {
        debug_assert!(
            !state.is_visited(candidate),
            "called `BoundEngine::lower_bound` with visited candidate {}",
            candidate
        );

        state.current_cost()
            + model.cost(state.tail(), candidate)
            + self.completion_estimate(model, state, candidate, strategy)
    }

    /// Returns the strategy-specific estimate of the cost still to be paid
    /// after moving to `candidate`.
    pub fn completion_estimate<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        candidate: CityIndex,
        strategy: BoundStrategy,
    ) -> T
    where
        C: City<Cost = T>,
    {
        let remaining = T::from_count(state.num_unvisited());

        match strategy {
            BoundStrategy::GlobalMinEdge => remaining * self.global_min_edge,
            BoundStrategy::MinIncoming => {
                let mut estimate = self.min_incoming_cost(model, state, ROOT);
                for city in state.unvisited() {
                    if city != candidate {
                        estimate = estimate + self.min_incoming_cost(model, state, city);
                    }
                }
                estimate
            }
            BoundStrategy::EndpointVisit => {
                let endpoints = T::half_sum(
                    self.min_incoming_cost(model, state, ROOT),
                    self.min_incoming_cost(model, state, candidate),
                );
                let mut estimate = endpoints + self.min_visit_cost(model, state, ROOT);
                for city in state.unvisited() {
                    if city != candidate {
                        estimate = estimate + self.min_visit_cost(model, state, city);
                    }
                }
                estimate
            }
            BoundStrategy::TrackMinEdge => remaining * min_edge_among_remaining(model, state),
        }
    }

    /// Returns the incident costs of `node`, sorted ascending.
    #[inline]
    pub fn ordered_incident_costs<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        node: CityIndex,
    ) -> &[T]
    where
        C: City<Cost = T>,
    {
        self.incident.collect(model, state.visited(), node)
    }

    /// Returns the cheapest incident cost of `node`.
    #[inline]
    pub fn min_incoming_cost<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        node: CityIndex,
    ) -> T
    where
        C: City<Cost = T>,
    {
        self.incident.collect(model, state.visited(), node);
        self.incident.smallest().unwrap_or_else(T::zero)
    }

    /// Returns the second cheapest incident cost of `node`, or the cheapest
    /// one if `node` has only a single incident edge left.
    #[inline]
    pub fn min_outgoing_cost<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        node: CityIndex,
    ) -> T
    where
        C: City<Cost = T>,
    {
        self.incident.collect(model, state.visited(), node);
        let smallest = self.incident.smallest().unwrap_or_else(T::zero);
        self.incident.second_smallest().unwrap_or(smallest)
    }

    /// Returns half the cost of entering and leaving `node` through its two
    /// cheapest incident edges. With a single incident edge left, that edge
    /// is used for both directions.
    #[inline]
    pub fn min_visit_cost<C>(
        &mut self,
        model: &TspModel<C>,
        state: &SearchState<T>,
        node: CityIndex,
    ) -> T
    where
        C: City<Cost = T>,
    {
        self.incident.collect(model, state.visited(), node);
        let smallest = self.incident.smallest().unwrap_or_else(T::zero);
        let second = self.incident.second_smallest().unwrap_or(smallest);
        T::half_sum(smallest, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tourbound_model::city::{LineCity, PlanarCity};

    fn line_model(positions: &[f64]) -> TspModel<LineCity<f64>> {
        TspModel::new(positions.iter().copied().map(LineCity::new).collect())
    }

    fn state_with_track(num_cities: usize, model: &TspModel<LineCity<f64>>, track: &[usize]) -> SearchState<f64> {
        let mut state = SearchState::new(num_cities);
        for &city in track.iter().skip(1) {
            let edge = model.cost(state.tail(), CityIndex::new(city));
            state.push_city(CityIndex::new(city), edge);
        }
        state
    }

    #[test]
    fn test_global_min_edge() {
        assert_eq!(global_min_edge(&line_model(&[0.0, 10.0, 15.0, 20.0])), 5.0);
        assert_eq!(global_min_edge(&line_model(&[3.0, 1.0, 2.0])), 1.0);
        assert_eq!(global_min_edge(&line_model(&[4.0])), 0.0);
        assert_eq!(global_min_edge(&line_model(&[])), 0.0);
    }

    #[test]
    fn test_global_min_edge_planar() {
        let model = TspModel::new(vec![
            PlanarCity::new(0.0, 0.0),
            PlanarCity::new(3.0, 4.0),
            PlanarCity::new(6.0, 8.0),
        ]);
        assert_eq!(global_min_edge(&model), 5.0);
    }

    #[test]
    fn test_min_edge_among_remaining_ignores_inner_track_edges() {
        // Track 0 -> 1 -> 2 leaves only city 3, whose cheapest usable edge is
        // the one from the tail.
        let model = line_model(&[0.0, 1.0, 11.0, 14.0]);
        let state = state_with_track(4, &model, &[0, 1, 2]);
        assert_eq!(min_edge_among_remaining(&model, &state), 3.0);

        let state = state_with_track(4, &model, &[0, 3, 2]);
        // Root-tail edge 11, root-1 edge 1.
        assert_eq!(min_edge_among_remaining(&model, &state), 1.0);
    }

    #[test]
    fn test_min_edge_among_remaining_at_root() {
        let model = line_model(&[0.0, 10.0, 15.0, 20.0]);
        let state = state_with_track(4, &model, &[0]);
        assert_eq!(min_edge_among_remaining(&model, &state), 0.0);
    }

    #[test]
    fn test_incident_primitives() {
        let model = line_model(&[0.0, 10.0, 15.0, 20.0]);
        let state = state_with_track(4, &model, &[0, 1]);
        let mut engine = BoundEngine::new(&model);

        assert_eq!(
            engine.ordered_incident_costs(&model, &state, CityIndex::new(3)),
            &[5.0, 20.0]
        );
        assert_eq!(engine.min_incoming_cost(&model, &state, CityIndex::new(3)), 5.0);
        assert_eq!(engine.min_outgoing_cost(&model, &state, CityIndex::new(3)), 20.0);
        assert_eq!(engine.min_visit_cost(&model, &state, CityIndex::new(3)), 12.5);

        assert_eq!(engine.min_incoming_cost(&model, &state, ROOT), 0.0);
        assert_eq!(engine.min_visit_cost(&model, &state, ROOT), 7.5);
    }

    #[test]
    fn test_min_visit_cost_with_single_edge_uses_it_twice() {
        let model = line_model(&[0.0, 10.0, 15.0, 20.0]);
        let state = state_with_track(4, &model, &[0, 1, 2]);
        let mut engine = BoundEngine::new(&model);

        assert_eq!(engine.min_outgoing_cost(&model, &state, CityIndex::new(3)), 20.0);
        assert_eq!(engine.min_visit_cost(&model, &state, CityIndex::new(3)), 20.0);
    }

    #[rstest]
    #[case(BoundStrategy::GlobalMinEdge, 2, 25.0)]
    #[case(BoundStrategy::GlobalMinEdge, 3, 30.0)]
    #[case(BoundStrategy::MinIncoming, 2, 20.0)]
    #[case(BoundStrategy::MinIncoming, 3, 25.0)]
    #[case(BoundStrategy::EndpointVisit, 2, 37.5)]
    #[case(BoundStrategy::EndpointVisit, 3, 40.0)]
    #[case(BoundStrategy::TrackMinEdge, 2, 25.0)]
    #[case(BoundStrategy::TrackMinEdge, 3, 30.0)]
    fn test_lower_bounds_after_first_step(
        #[case] strategy: BoundStrategy,
        #[case] candidate: usize,
        #[case] expected: f64,
    ) {
        let model = line_model(&[0.0, 10.0, 15.0, 20.0]);
        let state = state_with_track(4, &model, &[0, 1]);
        let mut engine = BoundEngine::new(&model);

        let bound = engine.lower_bound(&model, &state, CityIndex::new(candidate), strategy);
        assert!(
            (bound - expected).abs() < 1e-9,
            "{} bound for candidate {} was {}, expected {}",
            strategy,
            candidate,
            bound,
            expected
        );
    }

    #[rstest]
    fn test_bounds_never_exceed_best_completion(
        #[values(
            BoundStrategy::GlobalMinEdge,
            BoundStrategy::MinIncoming,
            BoundStrategy::EndpointVisit,
            BoundStrategy::TrackMinEdge
        )]
        strategy: BoundStrategy,
    ) {
        // The optimal tour 0 -> 4 -> 2 -> 1 -> 3 costs 18; every bound along
        // it must stay at or below that.
        let model = line_model(&[0.0, 7.0, 3.0, 9.0, 1.0]);
        let tour = [0, 4, 2, 1, 3];
        let mut engine = BoundEngine::new(&model);

        for depth in 1..tour.len() {
            let state = state_with_track(5, &model, &tour[..depth]);
            let bound = engine.lower_bound(&model, &state, CityIndex::new(tour[depth]), strategy);
            assert!(bound <= 18.0 + 1e-9, "{} overestimated at depth {}: {}", strategy, depth, bound);
        }
    }
}
