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

//! # Tourbound Core
//!
//! Foundational building blocks shared by the tourbound crates: the numeric
//! trait that every cost type must satisfy, phantom-tagged indices that keep
//! city positions from being mixed up with other counters, and the
//! combinatorics used to report how large an exhaustive search tree would be.
//!
//! ## Modules
//!
//! - `num`: `CostNumeric`, the trait alias for edge and tour costs, plus a
//!   NaN-tolerant ordering helper for sorting costs.
//! - `index`: `TypedIndex<T>` and the `TypedIndexTag` naming trait.
//! - `combinatorics`: node counts of the full permutation search tree.

pub mod combinatorics;
pub mod index;
pub mod num;
