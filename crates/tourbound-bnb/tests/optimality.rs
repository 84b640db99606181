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

//! End-to-end checks of the solver against exhaustive enumeration.
//!
//! Every bound strategy must return the cost of the cheapest Hamiltonian
//! cycle, agree with the other strategies, and never generate more nodes than
//! the full search tree holds.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use tourbound_bnb::{
    eval::engine::{global_min_edge, min_edge_among_remaining},
    greedy::nearest_neighbor_tour,
    monitor::tree_search_monitor::TreeSearchMonitor,
    state::SearchState,
    stats::BnbStatistics,
    BoundStrategy, TspSolution,
};
use tourbound_model::{
    city::{City, LineCity, PlanarCity},
    index::CityIndex,
    loading::CityLoader,
    model::TspModel,
};

const EPSILON: f64 = 1e-9;

/// Returns the cheapest cycle cost over all tours that begin with `prefix`.
fn cheapest_completion<C>(model: &TspModel<C>, prefix: &[CityIndex]) -> f64
where
    C: City<Cost = f64>,
{
    fn permute<C>(model: &TspModel<C>, order: &mut Vec<CityIndex>, used: &mut [bool], best: &mut f64)
    where
        C: City<Cost = f64>,
    {
        if order.len() == used.len() {
            *best = best.min(model.cycle_cost(order));
            return;
        }
        for city in 1..used.len() {
            if !used[city] {
                used[city] = true;
                order.push(CityIndex::new(city));
                permute(model, order, used, best);
                order.pop();
                used[city] = false;
            }
        }
    }

    let mut used = vec![false; model.num_cities()];
    for city in prefix {
        used[city.get()] = true;
    }
    let mut order = prefix.to_vec();
    let mut best = f64::INFINITY;
    permute(model, &mut order, &mut used, &mut best);
    best
}

/// Returns the cheapest cycle cost over all permutations that start at city 0.
fn brute_force_optimum<C>(model: &TspModel<C>) -> f64
where
    C: City<Cost = f64>,
{
    if model.num_cities() < 2 {
        return 0.0;
    }
    cheapest_completion(model, &[CityIndex::new(0)])
}

/// Keeps every bound the search computes, with the prefix it priced, and
/// every bound that led to a prune.
#[derive(Default)]
struct BoundRecorder {
    bounds: Vec<(Vec<CityIndex>, f64)>,
    prunes: Vec<f64>,
}

impl TreeSearchMonitor<f64> for BoundRecorder {
    fn name(&self) -> &str {
        "BoundRecorder"
    }

    fn on_enter_search(&mut self, _: usize, _: BoundStrategy, _: &BnbStatistics) {}

    fn on_exit_search(&mut self, _: &BnbStatistics) {}

    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<f64>,
        candidate: CityIndex,
        lower_bound: f64,
        _: &BnbStatistics,
    ) {
        let mut prefix = state.track().to_vec();
        prefix.push(candidate);
        self.bounds.push((prefix, lower_bound));
    }

    fn on_prune(&mut self, _: &SearchState<f64>, _: CityIndex, lower_bound: f64, _: &BnbStatistics) {
        self.prunes.push(lower_bound);
    }

    fn on_descend(&mut self, _: &SearchState<f64>, _: &BnbStatistics) {}

    fn on_backtrack(&mut self, _: &SearchState<f64>, _: &BnbStatistics) {}

    fn on_solution_found(&mut self, _: &[CityIndex], _: f64, _: &BnbStatistics) {}
}

fn random_planar_cities(seed: u64, num_cities: usize) -> Vec<PlanarCity<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..num_cities)
        .map(|_| PlanarCity::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect()
}

fn solve_with<C>(cities: Vec<C>, strategy: BoundStrategy) -> TspSolution<C>
where
    C: City<Cost = f64>,
{
    let mut solution = TspSolution::new(cities);
    solution.set_bound_strategy(strategy);
    solution.solve().expect("strategy is configured");
    solution
}

#[rstest]
fn test_random_planar_instances_match_brute_force(
    #[values(
        BoundStrategy::GlobalMinEdge,
        BoundStrategy::MinIncoming,
        BoundStrategy::EndpointVisit,
        BoundStrategy::TrackMinEdge
    )]
    strategy: BoundStrategy,
    #[values(2, 3, 5, 7, 8)] num_cities: usize,
) {
    for seed in 0..6 {
        let cities = random_planar_cities(seed, num_cities);
        let optimum = brute_force_optimum(&TspModel::new(cities.clone()));
        let solution = solve_with(cities, strategy);

        assert!(
            (solution.cost() - optimum).abs() < EPSILON,
            "{} on seed {} with {} cities returned {}, optimum is {}",
            strategy,
            seed,
            num_cities,
            solution.cost(),
            optimum
        );
        assert!(solution.is_optimal());
        assert!(solution.tour().is_hamiltonian_cycle(num_cities));
        assert!((solution.model().cycle_cost(solution.solution()) - solution.cost()).abs() < EPSILON);
        assert!(solution.generated_count() <= solution.possible_nodes());
    }
}

#[test]
fn test_strategies_agree_on_the_optimum() {
    for seed in 10..16 {
        let cities = random_planar_cities(seed, 8);
        let solutions: Vec<_> = BoundStrategy::ALL
            .into_iter()
            .map(|strategy| solve_with(cities.clone(), strategy))
            .collect();

        let reference = solutions[0].cost();
        for solution in &solutions {
            assert!(
                (solution.cost() - reference).abs() < EPSILON,
                "seed {}: {:?} disagrees with {}",
                seed,
                solution.bound_strategy(),
                reference
            );
            assert!(solution.generated_count() + solution.pruned_count() > 0);
        }
    }
}

#[rstest]
fn test_pruned_bounds_never_cut_off_the_optimum(
    #[values(
        BoundStrategy::GlobalMinEdge,
        BoundStrategy::MinIncoming,
        BoundStrategy::EndpointVisit,
        BoundStrategy::TrackMinEdge
    )]
    strategy: BoundStrategy,
    #[values(6, 7)] num_cities: usize,
) {
    for seed in 100..105 {
        let cities = random_planar_cities(seed, num_cities);
        let model = TspModel::new(cities.clone());
        let optimum = brute_force_optimum(&model);

        let mut solution = TspSolution::new(cities);
        solution.set_bound_strategy(strategy);
        let mut recorder = BoundRecorder::default();
        solution
            .solve_with_monitor(&mut recorder)
            .expect("strategy is configured");

        assert!((solution.cost() - optimum).abs() < EPSILON);
        assert_eq!(recorder.prunes.len() as u64, solution.pruned_count());
        for &lower_bound in &recorder.prunes {
            assert!(
                lower_bound >= optimum - EPSILON,
                "{strategy} pruned with bound {lower_bound} below the optimum {optimum} (seed {seed})"
            );
        }

        // Every bound underestimates the cheapest tour through its prefix.
        for (prefix, lower_bound) in &recorder.bounds {
            let completion = cheapest_completion(&model, prefix);
            assert!(
                *lower_bound <= completion + EPSILON,
                "{strategy} bound {lower_bound} exceeds {completion} for prefix {prefix:?} (seed {seed})"
            );
        }
    }
}

#[test]
fn test_greedy_seed_is_an_upper_bound() {
    for seed in 20..30 {
        let cities = random_planar_cities(seed, 7);
        let model = TspModel::new(cities.clone());
        let seed_tour = nearest_neighbor_tour(&model);
        assert!(seed_tour.is_hamiltonian_cycle(7));

        let solution = solve_with(cities, BoundStrategy::EndpointVisit);
        assert!(solution.cost() <= seed_tour.cost() + EPSILON);
    }
}

#[test]
fn test_track_min_edge_never_below_global_min_edge() {
    let model = TspModel::new(random_planar_cities(42, 7));
    let global = global_min_edge(&model);

    let mut state = SearchState::new(model.num_cities());
    for city in [3, 5, 1, 6] {
        let city = CityIndex::new(city);
        let edge = model.cost(state.tail(), city);
        state.push_city(city, edge);
        assert!(min_edge_among_remaining(&model, &state) >= global);
    }
}

#[test]
fn test_loaded_instance_is_solved() {
    let input = "\
# five cities on a line
5
0 7 3
9 1
";
    let cities = CityLoader::new()
        .load_line_str::<f64>(input)
        .expect("instance is well formed");
    let solution = solve_with(cities, BoundStrategy::MinIncoming);

    assert_eq!(solution.cost(), 18.0);
    let order: Vec<usize> = solution.solution().iter().map(|c| c.get()).collect();
    assert_eq!(order, vec![0, 4, 2, 1, 3]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every strategy returns the brute-force optimum on small line instances.
    #[test]
    fn line_instances_are_solved_optimally(
        positions in prop::collection::vec(-50i32..50, 1..=8),
        version in 1u32..=4,
    ) {
        let cities: Vec<LineCity<f64>> =
            positions.iter().map(|&p| LineCity::new(f64::from(p))).collect();
        let optimum = brute_force_optimum(&TspModel::new(cities.clone()));

        let mut solution = TspSolution::new(cities);
        solution.set_bound_version(version).expect("version is in range");
        solution.solve().expect("strategy is configured");

        prop_assert!((solution.cost() - optimum).abs() < EPSILON);
        prop_assert!(solution.tour().is_hamiltonian_cycle(positions.len()));
        prop_assert!(solution.generated_count() <= solution.possible_nodes());
    }

    /// Solving twice yields the same tour.
    #[test]
    fn solve_is_idempotent(
        positions in prop::collection::vec(-50i32..50, 2..=7),
        version in 1u32..=4,
    ) {
        let cities: Vec<LineCity<f64>> =
            positions.iter().map(|&p| LineCity::new(f64::from(p))).collect();
        let mut solution = TspSolution::new(cities);
        solution.set_bound_version(version).expect("version is in range");

        solution.solve().expect("strategy is configured");
        let first = solution.tour();
        solution.solve().expect("strategy is configured");

        prop_assert_eq!(first, solution.tour());
    }
}
