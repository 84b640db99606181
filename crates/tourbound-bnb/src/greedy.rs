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

//! Nearest-neighbour seed tour
//!
//! Starting at the root, repeatedly move to the cheapest unvisited city.
//! Ties go to the lowest city index. The resulting tour is a valid upper
//! bound for the search and, on small or well-structured instances, is often
//! already optimal.

use fixedbitset::FixedBitSet;
use num_traits::Float;
use tourbound_model::{city::City, index::CityIndex, model::TspModel, model::ROOT, tour::Tour};

/// Returns the nearest-neighbour visiting order of `model`, starting at the
/// root. An empty model yields an empty order.
pub fn nearest_neighbor_order<C>(model: &TspModel<C>) -> Vec<CityIndex>
where
    C: City,
{
    let n = model.num_cities();
    let mut order = Vec::with_capacity(n);
    if n == 0 {
        return order;
    }

    let mut visited = FixedBitSet::with_capacity(n);
    visited.insert(ROOT.get());
    order.push(ROOT);

    let mut current = ROOT;
    while order.len() < n {
        let mut nearest: Option<CityIndex> = None;
        let mut nearest_cost = C::Cost::infinity();

        for candidate in visited.zeroes().map(CityIndex::new) {
            let cost = model.cost(current, candidate);
            if nearest.is_none() || cost < nearest_cost {
                nearest = Some(candidate);
                nearest_cost = cost;
            }
        }

        match nearest {
            Some(next) => {
                visited.insert(next.get());
                order.push(next);
                current = next;
            }
            None => break,
        }
    }

    order
}

/// Returns the nearest-neighbour tour of `model` together with its cycle cost.
pub fn nearest_neighbor_tour<C>(model: &TspModel<C>) -> Tour<C::Cost>
where
    C: City,
{
    let order = nearest_neighbor_order(model);
    let cost = model.cycle_cost(&order);
    Tour::new(order, cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourbound_model::city::{LineCity, PlanarCity};

    fn line_model(positions: &[f64]) -> TspModel<LineCity<f64>> {
        TspModel::new(positions.iter().copied().map(LineCity::new).collect())
    }

    fn indices(order: &[CityIndex]) -> Vec<usize> {
        order.iter().map(|c| c.get()).collect()
    }

    #[test]
    fn test_empty_model_has_empty_order() {
        let tour = nearest_neighbor_tour(&line_model(&[]));
        assert!(tour.is_empty());
        assert_eq!(tour.cost(), 0.0);
    }

    #[test]
    fn test_single_city_is_just_the_root() {
        let tour = nearest_neighbor_tour(&line_model(&[42.0]));
        assert_eq!(indices(tour.order()), vec![0]);
        assert_eq!(tour.cost(), 0.0);
    }

    #[test]
    fn test_follows_nearest_city() {
        let tour = nearest_neighbor_tour(&line_model(&[0.0, 10.0, 15.0, 20.0]));
        assert_eq!(indices(tour.order()), vec![0, 1, 2, 3]);
        assert_eq!(tour.cost(), 40.0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // Cities 1 and 2 are both 5 away from the root.
        let order = nearest_neighbor_order(&line_model(&[10.0, 5.0, 15.0]));
        assert_eq!(indices(&order), vec![0, 1, 2]);
    }

    #[test]
    fn test_greedy_can_be_suboptimal() {
        let model = TspModel::new(vec![
            PlanarCity::new(0.0, 0.0),
            PlanarCity::new(10.0, 0.0),
            PlanarCity::new(5.0, 1.0),
            PlanarCity::new(2.0, 7.0),
            PlanarCity::new(8.0, 6.0),
            PlanarCity::new(4.0, 4.0),
        ]);
        let tour = nearest_neighbor_tour(&model);
        assert_eq!(indices(tour.order()), vec![0, 2, 5, 3, 4, 1]);
        assert!((tour.cost() - 34.274166299860134).abs() < 1e-9);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let model = line_model(&[12.0, 4.0, 9.0, 1.0, 15.0, 7.0]);
        let tour = nearest_neighbor_tour(&model);
        assert!(tour.is_hamiltonian_cycle(model.num_cities()));
    }
}
