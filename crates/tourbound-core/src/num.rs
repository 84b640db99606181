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

//! # Cost Numerics
//!
//! Tour costs are sums of edge costs, and several lower bounds average two
//! edge costs, so costs need fractional arithmetic. `CostNumeric` collects the
//! required bounds into a single alias that `f32` and `f64` satisfy.

use num_traits::{Float, FromPrimitive};
use std::cmp::Ordering;

/// A trait alias for numeric types that can be used as edge and tour costs.
///
/// Any `Float` that is also `FromPrimitive`, printable and thread-safe
/// implements this trait automatically.
pub trait CostNumeric:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Converts a count of cities (or edges) into a cost multiplier.
    ///
    /// Counts that are not representable become `+inf`, which keeps any
    /// bound computed from them on the pessimistic side of a comparison.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tourbound_core::num::CostNumeric;
    /// assert_eq!(f64::from_count(3), 3.0);
    /// ```
    #[inline]
    fn from_count(count: usize) -> Self {
        Self::from_usize(count).unwrap_or_else(Self::infinity)
    }

    /// Returns `(a + b) / 2`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tourbound_core::num::CostNumeric;
    /// assert_eq!(<f64 as CostNumeric>::half_sum(5.0, 20.0), 12.5);
    /// ```
    #[inline]
    fn half_sum(a: Self, b: Self) -> Self {
        (a + b) / (Self::one() + Self::one())
    }
}

impl<T> CostNumeric for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

/// Orders two costs for sorting.
///
/// Costs are never NaN in a well-formed instance; should one appear it
/// compares equal to everything instead of poisoning the sort.
#[inline]
pub fn cost_ordering<T>(a: &T, b: &T) -> Ordering
where
    T: CostNumeric,
{
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
