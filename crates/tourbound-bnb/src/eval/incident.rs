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

//! Sorted incident costs of a city with respect to the open part of a tour.
//!
//! For a city `v` the incident costs are the costs from `v` to every city that
//! is not yet on the track (other than `v` itself) followed by the cost of the
//! edge back to the root. The root edge is always present, even when `v` is
//! the root, where it becomes the zero-cost self edge. The list is a multiset:
//! equal costs to different neighbours are kept apart, so the two smallest
//! entries always belong to two distinct edges.

use fixedbitset::FixedBitSet;
use tourbound_core::num::{cost_ordering, CostNumeric};
use tourbound_model::{city::City, index::CityIndex, model::TspModel, model::ROOT};

/// A reusable buffer of ascending incident costs.
#[derive(Clone, Debug, Default)]
pub struct IncidentCosts<T> {
    costs: Vec<T>,
}

impl<T> IncidentCosts<T>
where
    T: CostNumeric,
{
    /// Creates an empty buffer.
    #[inline]
    pub fn new() -> Self {
        Self { costs: Vec::new() }
    }

    /// Creates an empty buffer able to hold the incident costs of any city
    /// of an instance with `num_cities` cities without reallocating.
    #[inline]
    pub fn preallocated(num_cities: usize) -> Self {
        Self {
            costs: Vec::with_capacity(num_cities.saturating_add(1)),
        }
    }

    /// Fills the buffer with the incident costs of `node` given the visited
    /// set, sorted ascending, and returns them.
    pub fn collect<C>(
        &mut self,
        model: &TspModel<C>,
        visited: &FixedBitSet,
        node: CityIndex,
    ) -> &[T]
    where
        C: City<Cost = T>,
    {
        self.costs.clear();
        for other in visited.zeroes() {
            if other != node.get() {
                self.costs.push(model.cost(node, CityIndex::new(other)));
            }
        }
        self.costs.push(model.cost(node, ROOT));
        self.costs.sort_unstable_by(cost_ordering);
        &self.costs
    }

    /// Returns the costs gathered by the last `collect`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.costs
    }

    /// Returns the smallest gathered cost.
    #[inline]
    pub fn smallest(&self) -> Option<T> {
        self.costs.first().copied()
    }

    /// Returns the second smallest gathered cost.
    #[inline]
    pub fn second_smallest(&self) -> Option<T> {
        self.costs.get(1).copied()
    }
}
