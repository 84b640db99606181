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

//! Incumbent tour for branch-and-bound
//!
//! The incumbent is the best complete tour known so far. Its cost is the
//! upper bound every candidate's lower bound is compared against. A new tour
//! replaces it only when strictly cheaper, so among equally priced tours the
//! first one found (the greedy seed, then ascending enumeration order) wins.

use tourbound_core::num::CostNumeric;
use tourbound_model::{index::CityIndex, tour::Tour};

/// The best complete tour known so far.
#[derive(Clone, Debug, PartialEq)]
pub struct Incumbent<T> {
    order: Vec<CityIndex>,
    cost: T,
}

impl<T> Incumbent<T>
where
    T: CostNumeric,
{
    /// Creates an incumbent from a visiting order and its cycle cost.
    #[inline]
    pub fn new(order: Vec<CityIndex>, cost: T) -> Self {
        Self { order, cost }
    }

    /// Returns the cost of the incumbent, the current upper bound.
    #[inline]
    pub fn upper_bound(&self) -> T {
        self.cost
    }

    /// Returns the visiting order of the incumbent.
    #[inline]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Replaces the incumbent with `order` if `cost` is strictly lower.
    /// Returns `true` if it was installed.
    #[inline]
    pub fn try_install(&mut self, order: &[CityIndex], cost: T) -> bool {
        if cost < self.cost {
            self.order.clear();
            self.order.extend_from_slice(order);
            self.cost = cost;
            true
        } else {
            false
        }
    }

    /// Returns a copy of the incumbent as a `Tour`.
    #[inline]
    pub fn to_tour(&self) -> Tour<T> {
        Tour::new(self.order.clone(), self.cost)
    }
}

impl<T> From<Tour<T>> for Incumbent<T>
where
    T: CostNumeric,
{
    #[inline]
    fn from(tour: Tour<T>) -> Self {
        let cost = tour.cost();
        Self::new(tour.into_order(), cost)
    }
}

impl<T> std::fmt::Display for Incumbent<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(cost: {}, cities: {})", self.cost, self.order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(indices: &[usize]) -> Vec<CityIndex> {
        indices.iter().copied().map(CityIndex::new).collect()
    }

    #[test]
    fn test_strictly_better_tour_is_installed() {
        let mut incumbent = Incumbent::new(order(&[0, 1, 2]), 10.0);
        assert!(incumbent.try_install(&order(&[0, 2, 1]), 8.0));
        assert_eq!(incumbent.upper_bound(), 8.0);
        assert_eq!(incumbent.order(), order(&[0, 2, 1]).as_slice());
    }

    #[test]
    fn test_equal_or_worse_tour_is_rejected() {
        let mut incumbent = Incumbent::new(order(&[0, 1, 2]), 10.0);
        assert!(!incumbent.try_install(&order(&[0, 2, 1]), 10.0));
        assert!(!incumbent.try_install(&order(&[0, 2, 1]), 12.0));
        assert_eq!(incumbent.order(), order(&[0, 1, 2]).as_slice());
        assert_eq!(incumbent.upper_bound(), 10.0);
    }

    #[test]
    fn test_round_trips_through_tour() {
        let tour = Tour::new(order(&[0, 3, 1, 2]), 7.5);
        let incumbent = Incumbent::from(tour.clone());
        assert_eq!(incumbent.to_tour(), tour);
        assert_eq!(incumbent.to_string(), "Incumbent(cost: 7.5, cities: 4)");
    }
}
