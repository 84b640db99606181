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

//! Immutable TSP instance.
//!
//! `TspModel` owns the city list and a dense, row-major cost matrix computed
//! once from `City::cost_to`. The search asks for edge costs millions of
//! times, so they are looked up rather than recomputed.

use crate::{city::City, index::CityIndex};
use num_traits::Zero;

/// The root city every tour starts from and returns to.
pub const ROOT: CityIndex = CityIndex::new(0);

/// A TSP instance: cities plus their pairwise costs.
#[derive(Clone, Debug)]
pub struct TspModel<C>
where
    C: City,
{
    cities: Vec<C>,
    // costs[from * n + to]
    costs: Vec<C::Cost>,
}

impl<C> TspModel<C>
where
    C: City,
{
    /// Builds a model from the given cities.
    /// The order of `cities` fixes the indices; the first city is the root.
    pub fn new(cities: Vec<C>) -> Self {
        let n = cities.len();
        let mut costs = Vec::with_capacity(n * n);
        for from in &cities {
            for to in &cities {
                costs.push(from.cost_to(to));
            }
        }

        Self { cities, costs }
    }

    /// Returns the number of cities.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the model has no cities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns all cities in index order.
    #[inline]
    pub fn cities(&self) -> &[C] {
        &self.cities
    }

    /// Returns the city at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not within `0..num_cities()`.
    #[inline]
    pub fn city(&self, index: CityIndex) -> &C {
        let i = index.get();
        assert!(
            i < self.num_cities(),
            "called `TspModel::city` with city index out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            i
        );

        &self.cities[i]
    }

    /// Returns the cost of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not within `0..num_cities()`.
    #[inline]
    pub fn cost(&self, from: CityIndex, to: CityIndex) -> C::Cost {
        let n = self.num_cities();
        debug_assert!(
            from.get() < n,
            "called `TspModel::cost` with `from` out of bounds: the len is {} but the index is {}",
            n,
            from.get()
        );
        debug_assert!(
            to.get() < n,
            "called `TspModel::cost` with `to` out of bounds: the len is {} but the index is {}",
            n,
            to.get()
        );

        self.costs[from.get() * n + to.get()]
    }

    /// Returns the sum of the consecutive edges of `path`, without closing it.
    pub fn path_cost(&self, path: &[CityIndex]) -> C::Cost {
        path.windows(2)
            .fold(C::Cost::zero(), |acc, edge| acc + self.cost(edge[0], edge[1]))
    }

    /// Returns the cost of `order` as a closed cycle: its path cost plus the
    /// edge from the last city back to the first.
    ///
    /// Orders with fewer than two cities cost nothing.
    pub fn cycle_cost(&self, order: &[CityIndex]) -> C::Cost {
        match (order.first(), order.last()) {
            (Some(&first), Some(&last)) if order.len() >= 2 => {
                self.path_cost(order) + self.cost(last, first)
            }
            _ => C::Cost::zero(),
        }
    }
}

impl<C> From<Vec<C>> for TspModel<C>
where
    C: City,
{
    fn from(cities: Vec<C>) -> Self {
        Self::new(cities)
    }
}

impl<C> std::fmt::Display for TspModel<C>
where
    C: City,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TspModel(cities: {})", self.num_cities())
    }
}
