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

//! Candidate frames of the depth-first search
//!
//! The explicit stack replaces recursion: frame `k` enumerates the cities
//! that may follow the `k`-th city of the track.

use fixedbitset::FixedBitSet;
use tourbound_model::index::CityIndex;

/// A stack of candidate cursors, one frame per city on the track.
///
/// Each frame remembers the next city index to try as an extension of the
/// track prefix it belongs to. Candidates are handed out in ascending index
/// order, skipping cities that are already visited, so a frame never needs to
/// materialize its candidate list.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    cursors: Vec<usize>,
}

impl SearchStack {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            cursors: Vec::new(),
        }
    }

    /// Creates a `SearchStack` that can hold a full track of `num_cities`
    /// frames without reallocating.
    #[inline]
    pub fn preallocated(num_cities: usize) -> Self {
        Self {
            cursors: Vec::with_capacity(num_cities),
        }
    }

    /// Ensures the stack has capacity for a full track of `num_cities`.
    #[inline]
    pub fn ensure_capacity(&mut self, num_cities: usize) {
        if self.cursors.capacity() < num_cities {
            self.cursors.reserve(num_cities - self.cursors.len());
        }
    }

    /// Returns the number of frames on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.cursors.len()
    }

    /// Returns `true` if there are no frames left (search exhausted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Pushes a fresh frame whose cursor starts at city 0.
    #[inline]
    pub fn push_frame(&mut self) {
        self.cursors.push(0);
    }

    /// Pops the top frame. Returns `None` if the stack was empty.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        self.cursors.pop().map(|_| ())
    }

    /// Advances the top frame to its next unvisited candidate and returns it,
    /// or `None` once the frame is exhausted (or no frame exists).
    #[inline]
    pub fn next_candidate(&mut self, visited: &FixedBitSet) -> Option<CityIndex> {
        let cursor = self.cursors.last_mut()?;
        let num_cities = visited.len();

        while *cursor < num_cities {
            let city = *cursor;
            *cursor += 1;
            if !visited.contains(city) {
                return Some(CityIndex::new(city));
            }
        }
        None
    }

    /// Removes all frames, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.cursors.clear();
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchStack(depth: {})", self.depth())
    }
}
