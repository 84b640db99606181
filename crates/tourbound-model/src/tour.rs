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

use crate::{index::CityIndex, model::ROOT};

/// A closed tour over city indices together with its cycle cost.
///
/// The order is implicitly closed: the last city connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour<T> {
    order: Vec<CityIndex>,
    cost: T,
}

impl<T> Tour<T>
where
    T: Copy,
{
    /// Creates a tour from a visiting order and its cycle cost.
    #[inline]
    pub fn new(order: Vec<CityIndex>, cost: T) -> Self {
        Self { order, cost }
    }

    /// Returns the visiting order.
    #[inline]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Returns the cycle cost.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no city.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the tour and returns its visiting order.
    #[inline]
    pub fn into_order(self) -> Vec<CityIndex> {
        self.order
    }

    /// Returns `true` if the order starts at the root and visits each of the
    /// `num_cities` cities exactly once.
    pub fn is_hamiltonian_cycle(&self, num_cities: usize) -> bool {
        if self.order.len() != num_cities {
            return false;
        }
        if num_cities == 0 {
            return true;
        }
        if self.order[0] != ROOT {
            return false;
        }

        let mut seen = vec![false; num_cities];
        for city in &self.order {
            match seen.get_mut(city.get()) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour Summary")?;
        writeln!(f, "   Cost: {}", self.cost)?;

        let Some(first) = self.order.first() else {
            return writeln!(f, "   (No cities)");
        };

        write!(f, "   Cycle: ")?;
        for city in &self.order {
            write!(f, "{} -> ", city.get())?;
        }
        writeln!(f, "{}", first.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(raw: &[usize]) -> Vec<CityIndex> {
        raw.iter().copied().map(CityIndex::new).collect()
    }

    #[test]
    fn test_accessors() {
        let tour = Tour::new(order(&[0, 2, 1]), 4.0);
        assert_eq!(tour.len(), 3);
        assert!(!tour.is_empty());
        assert_eq!(tour.cost(), 4.0);
        assert_eq!(tour.order(), &order(&[0, 2, 1])[..]);
        assert_eq!(tour.into_order(), order(&[0, 2, 1]));
    }

    #[test]
    fn test_hamiltonian_cycle_accepts_permutations_rooted_at_zero() {
        assert!(Tour::new(order(&[0, 3, 1, 2]), 0.0).is_hamiltonian_cycle(4));
        assert!(Tour::new(order(&[0]), 0.0).is_hamiltonian_cycle(1));
        assert!(Tour::new(Vec::new(), 0.0).is_hamiltonian_cycle(0));
    }

    #[test]
    fn test_hamiltonian_cycle_rejects_malformed_orders() {
        // wrong root
        assert!(!Tour::new(order(&[1, 0, 2]), 0.0).is_hamiltonian_cycle(3));
        // duplicate
        assert!(!Tour::new(order(&[0, 1, 1]), 0.0).is_hamiltonian_cycle(3));
        // out of range
        assert!(!Tour::new(order(&[0, 1, 5]), 0.0).is_hamiltonian_cycle(3));
        // wrong length
        assert!(!Tour::new(order(&[0, 1]), 0.0).is_hamiltonian_cycle(3));
    }

    #[test]
    fn test_display_renders_closed_cycle() {
        let tour = Tour::new(order(&[0, 1, 2, 3]), 40.0);
        let rendered = format!("{}", tour);
        assert!(rendered.contains("Cost: 40"));
        assert!(rendered.contains("Cycle: 0 -> 1 -> 2 -> 3 -> 0"));
    }

    #[test]
    fn test_display_empty_tour() {
        let tour: Tour<f64> = Tour::new(Vec::new(), 0.0);
        assert!(format!("{}", tour).contains("(No cities)"));
    }
}
