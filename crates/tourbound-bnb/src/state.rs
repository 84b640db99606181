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

//! Mutable path state of the search
//!
//! `SearchState` is the partial tour the solver is currently extending: the
//! ordered track starting at the root, a visited bit per city and the cost of
//! the open path. Extending and retracting the path are exact inverses, so a
//! state that has been pushed and popped back is indistinguishable from one
//! that never moved. The path cost before each push is kept on a trail, which
//! restores the cost on pop without re-subtracting floats.

use fixedbitset::FixedBitSet;
use tourbound_core::num::CostNumeric;
use tourbound_model::{index::CityIndex, model::ROOT};

/// The partial tour currently being extended.
#[derive(Clone, Debug)]
pub struct SearchState<T> {
    visited: FixedBitSet,
    track: Vec<CityIndex>,
    cost_trail: Vec<T>,
    current_cost: T,
}

impl<T> SearchState<T>
where
    T: CostNumeric,
{
    /// Creates the root state for an instance of `num_cities` cities:
    /// the track holds only the root and nothing has been paid yet.
    #[inline]
    pub fn new(num_cities: usize) -> Self {
        let mut state = Self {
            visited: FixedBitSet::with_capacity(num_cities),
            track: Vec::with_capacity(num_cities),
            cost_trail: Vec::with_capacity(num_cities),
            current_cost: T::zero(),
        };
        state.reset(num_cities);
        state
    }

    /// Rewinds to the root state for an instance of `num_cities` cities,
    /// keeping the allocations where possible.
    pub fn reset(&mut self, num_cities: usize) {
        if self.visited.len() == num_cities {
            self.visited.clear();
        } else {
            self.visited = FixedBitSet::with_capacity(num_cities);
        }
        self.track.clear();
        self.cost_trail.clear();
        self.current_cost = T::zero();

        if num_cities > 0 {
            self.visited.insert(ROOT.get());
            self.track.push(ROOT);
        }
    }

    /// Returns the number of cities of the instance.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.visited.len()
    }

    /// Returns the length of the track, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.track.len()
    }

    /// Returns `true` if the track is empty, which only happens for an
    /// instance without cities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }

    /// Returns `true` if every city is on the track.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.track.is_empty() && self.track.len() == self.num_cities()
    }

    /// Returns the number of cities not yet on the track.
    #[inline]
    pub fn num_unvisited(&self) -> usize {
        self.num_cities() - self.track.len()
    }

    /// Returns `true` if `city` is on the track.
    #[inline]
    pub fn is_visited(&self, city: CityIndex) -> bool {
        self.visited.contains(city.get())
    }

    /// Returns the visited set as a bit set indexed by city.
    #[inline]
    pub fn visited(&self) -> &FixedBitSet {
        &self.visited
    }

    /// Returns the ordered track, starting at the root.
    #[inline]
    pub fn track(&self) -> &[CityIndex] {
        &self.track
    }

    /// Returns the last city of the track. For an empty instance this is
    /// the root index.
    #[inline]
    pub fn tail(&self) -> CityIndex {
        self.track.last().copied().unwrap_or(ROOT)
    }

    /// Returns the cost of the open path along the track.
    #[inline]
    pub fn current_cost(&self) -> T {
        self.current_cost
    }

    /// Iterates over the cities not yet on the track, in ascending order.
    #[inline]
    pub fn unvisited(&self) -> impl Iterator<Item = CityIndex> + '_ {
        self.visited.zeroes().map(CityIndex::new)
    }

    /// Appends `city` to the track, paying `edge_cost` for the edge from the
    /// current tail.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `city` is out of bounds or already visited.
    #[inline]
    pub fn push_city(&mut self, city: CityIndex, edge_cost: T) {
        debug_assert!(
            city.get() < self.num_cities(),
            "called `SearchState::push_city` with city index out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            city.get()
        );
        debug_assert!(
            !self.visited.contains(city.get()),
            "called `SearchState::push_city` with already visited city {}",
            city
        );

        self.visited.insert(city.get());
        self.track.push(city);
        self.cost_trail.push(self.current_cost);
        self.current_cost = self.current_cost + edge_cost;
    }

    /// Removes the tail of the track and restores the path cost it had
    /// before that city was pushed. The root is never removed.
    ///
    /// Returns the removed city, or `None` if only the root is left.
    #[inline]
    pub fn pop_city(&mut self) -> Option<CityIndex> {
        if self.track.len() <= 1 {
            return None;
        }

        let city = self.track.pop()?;
        self.visited.set(city.get(), false);
        if let Some(previous) = self.cost_trail.pop() {
            self.current_cost = previous;
        }
        Some(city)
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchState(track: [")?;
        for (position, city) in self.track.iter().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(
            f,
            "], cost: {}, unvisited: {})",
            self.current_cost,
            self.num_unvisited()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    #[test]
    fn test_new_state_holds_only_the_root() {
        let state = SearchState::<f64>::new(4);
        assert_eq!(state.track(), &[ROOT]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.num_unvisited(), 3);
        assert_eq!(state.current_cost(), 0.0);
        assert!(state.is_visited(ROOT));
        assert!(!state.is_complete());
        assert_eq!(state.tail(), ROOT);
    }

    #[test]
    fn test_empty_instance_has_an_empty_track() {
        let state = SearchState::<f64>::new(0);
        assert!(state.is_empty());
        assert!(!state.is_complete());
        assert_eq!(state.num_unvisited(), 0);
        assert_eq!(state.unvisited().count(), 0);
    }

    #[test]
    fn test_single_city_instance_is_complete_at_the_root() {
        let state = SearchState::<f64>::new(1);
        assert!(state.is_complete());
    }

    #[test]
    fn test_push_and_pop_are_inverse() {
        let mut state = SearchState::<f64>::new(4);
        state.push_city(idx(2), 0.1);
        state.push_city(idx(1), 0.2);
        assert_eq!(state.track(), &[ROOT, idx(2), idx(1)]);
        assert_eq!(state.tail(), idx(1));
        assert!(state.is_visited(idx(2)));

        assert_eq!(state.pop_city(), Some(idx(1)));
        assert_eq!(state.current_cost(), 0.1);
        assert!(!state.is_visited(idx(1)));

        assert_eq!(state.pop_city(), Some(idx(2)));
        assert_eq!(state.current_cost(), 0.0);
        assert_eq!(state.track(), &[ROOT]);
    }

    #[test]
    fn test_pop_never_removes_the_root() {
        let mut state = SearchState::<f64>::new(3);
        assert_eq!(state.pop_city(), None);
        assert_eq!(state.track(), &[ROOT]);
    }

    #[test]
    fn test_unvisited_iterates_in_ascending_order() {
        let mut state = SearchState::<f64>::new(5);
        state.push_city(idx(3), 1.0);
        let unvisited: Vec<usize> = state.unvisited().map(CityIndex::get).collect();
        assert_eq!(unvisited, vec![1, 2, 4]);
    }

    #[test]
    fn test_complete_after_all_cities_pushed() {
        let mut state = SearchState::<f64>::new(3);
        state.push_city(idx(1), 1.0);
        state.push_city(idx(2), 2.0);
        assert!(state.is_complete());
        assert_eq!(state.num_unvisited(), 0);
        assert_eq!(state.current_cost(), 3.0);
    }

    #[test]
    fn test_reset_returns_to_root_and_resizes() {
        let mut state = SearchState::<f64>::new(3);
        state.push_city(idx(1), 4.0);

        state.reset(3);
        assert_eq!(state.track(), &[ROOT]);
        assert_eq!(state.current_cost(), 0.0);
        assert!(!state.is_visited(idx(1)));

        state.reset(6);
        assert_eq!(state.num_cities(), 6);
        assert_eq!(state.num_unvisited(), 5);
    }

    #[test]
    fn test_display_lists_track_and_cost() {
        let mut state = SearchState::<f64>::new(4);
        state.push_city(idx(1), 10.0);
        assert_eq!(
            state.to_string(),
            "SearchState(track: [0 -> 1], cost: 10, unvisited: 2)"
        );
    }
}
