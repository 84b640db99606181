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

//! Size of the exhaustive permutation search tree.
//!
//! With city 0 fixed as the root, a depth-first enumeration of all tours over
//! `n` cities has `(n - 1)! / (n - 1 - d)!` nodes at depth `d`. The total is
//! reported next to the number of nodes a pruned search actually generated.

/// Returns the number of nodes (root included) of the unpruned search tree
/// over `num_cities` cities.
///
/// An empty instance has no root city, so its tree is empty and the result
/// is `0` rather than a lone root. Saturates at `u64::MAX`.
///
/// # Examples
///
/// ```rust
/// # use tourbound_core::combinatorics::search_tree_size;
/// // 1 root + 3 + 3·2 + 3·2·1
/// assert_eq!(search_tree_size(4), 16);
/// ```
pub fn search_tree_size(num_cities: usize) -> u64 {
    if num_cities == 0 {
        return 0;
    }

    let branching = (num_cities - 1) as u64;
    let mut total: u64 = 1;
    let mut level: u64 = 1;
    for depth in 1..=branching {
        level = level.saturating_mul(branching - depth + 1);
        total = total.saturating_add(level);
    }
    total
}
