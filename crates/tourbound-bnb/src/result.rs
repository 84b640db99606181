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

use crate::stats::BnbStatistics;
use tourbound_core::num::CostNumeric;
use tourbound_model::tour::Tour;

/// Why a search run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The whole tree was explored or pruned; the returned tour is optimal.
    OptimalityProven,
    /// A monitor stopped the run early; the returned tour is the best found.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
///
/// A tour is always present: the search starts from a seeded incumbent, so
/// even an aborted run has a feasible answer.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    tour: Tour<T>,
    termination_reason: TerminationReason,
    statistics: BnbStatistics,
}

impl<T> BnbSolverOutcome<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn optimal(tour: Tour<T>, statistics: BnbStatistics) -> Self {
        Self {
            tour,
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(tour: Tour<T>, reason: R, statistics: BnbStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            tour,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the best tour found.
    #[inline]
    pub fn tour(&self) -> &Tour<T> {
        &self.tour
    }

    /// Consumes the outcome and returns the best tour found.
    #[inline]
    pub fn into_tour(self) -> Tour<T> {
        self.tour
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbStatistics {
        &self.statistics
    }

    /// Returns `true` if the tour is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.termination_reason == TerminationReason::OptimalityProven
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.tour)?;
        write!(f, "{}", self.statistics)
    }
}
