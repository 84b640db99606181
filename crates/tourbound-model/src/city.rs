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

//! Cost model for cities.
//!
//! The solver needs exactly one thing from a city: the cost of travelling to
//! another city. `City::cost_to` provides it. The two point types shipped here
//! cover the common cases: positions on a line (cost is the absolute
//! difference) and points in the plane (cost is the Euclidean distance). Both
//! give a symmetric, non-negative metric, which the lower bounds rely on.

use tourbound_core::num::CostNumeric;

/// A location that can be visited by a tour.
pub trait City: Clone + std::fmt::Debug {
    /// The numeric type of edge and tour costs.
    type Cost: CostNumeric;

    /// Returns the cost of the edge from `self` to `other`.
    ///
    /// Must be total over all pairs. The cost of a city to itself is
    /// expected to be zero.
    fn cost_to(&self, other: &Self) -> Self::Cost;
}

/// A city positioned on a line.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct LineCity<T> {
    position: T,
}

impl<T> LineCity<T>
where
    T: CostNumeric,
{
    /// Creates a city at the given position.
    #[inline]
    pub fn new(position: T) -> Self {
        Self { position }
    }

    /// Returns the position of the city on the line.
    #[inline]
    pub fn position(&self) -> T {
        self.position
    }
}

impl<T> From<T> for LineCity<T>
where
    T: CostNumeric,
{
    #[inline]
    fn from(position: T) -> Self {
        Self::new(position)
    }
}

impl<T> City for LineCity<T>
where
    T: CostNumeric,
{
    type Cost = T;

    #[inline]
    fn cost_to(&self, other: &Self) -> T {
        (self.position - other.position).abs()
    }
}

impl<T> std::fmt::Display for LineCity<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LineCity({})", self.position)
    }
}

/// A city positioned in the plane.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct PlanarCity<T> {
    x: T,
    y: T,
}

impl<T> PlanarCity<T>
where
    T: CostNumeric,
{
    /// Creates a city at `(x, y)`.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    /// Returns the y coordinate.
    #[inline]
    pub fn y(&self) -> T {
        self.y
    }
}

impl<T> From<(T, T)> for PlanarCity<T>
where
    T: CostNumeric,
{
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T> City for PlanarCity<T>
where
    T: CostNumeric,
{
    type Cost = T;

    #[inline]
    fn cost_to(&self, other: &Self) -> T {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl<T> std::fmt::Display for PlanarCity<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlanarCity({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_cost_is_absolute_difference() {
        let a = LineCity::new(10.0);
        let b = LineCity::new(15.0);
        assert_eq!(a.cost_to(&b), 5.0);
        assert_eq!(b.cost_to(&a), 5.0);
        assert_eq!(a.cost_to(&a), 0.0);
    }

    #[test]
    fn test_line_cost_handles_negative_positions() {
        let a = LineCity::new(-4.0f32);
        let b = LineCity::new(3.0f32);
        assert_eq!(a.cost_to(&b), 7.0);
    }

    #[test]
    fn test_planar_cost_is_euclidean() {
        let a = PlanarCity::new(0.0, 0.0);
        let b = PlanarCity::new(3.0, 4.0);
        assert_eq!(a.cost_to(&b), 5.0);
        assert_eq!(b.cost_to(&a), 5.0);
        assert_eq!(b.cost_to(&b), 0.0);
    }

    #[test]
    fn test_conversions_and_accessors() {
        let line: LineCity<f64> = 2.5.into();
        assert_eq!(line.position(), 2.5);

        let planar: PlanarCity<f64> = (1.0, -2.0).into();
        assert_eq!(planar.x(), 1.0);
        assert_eq!(planar.y(), -2.0);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format!("{}", LineCity::new(3.0)), "LineCity(3)");
        assert_eq!(format!("{}", PlanarCity::new(1.5, 2.0)), "PlanarCity(1.5, 2)");
    }
}
