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

use std::time::Duration;

/// Statistics collected during one branch-and-bound run.
///
/// All counters saturate instead of wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbStatistics {
    /// Children whose lower bound beat the incumbent and were descended into.
    pub nodes_generated: u64,
    /// Candidates discarded because their lower bound did not beat the
    /// incumbent.
    pub nodes_pruned: u64,
    /// Lower bounds computed.
    pub bound_evaluations: u64,
    /// Frames left after all their candidates were tried.
    pub backtracks: u64,
    /// Complete tours that improved the incumbent.
    pub solutions_found: u64,
    /// Longest track reached, root included.
    pub max_depth: u64,
    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub fn on_node_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_node_pruned(&mut self) {
        self.nodes_pruned = self.nodes_pruned.saturating_add(1);
    }

    #[inline]
    pub fn on_bound_evaluated(&mut self) {
        self.bound_evaluations = self.bound_evaluations.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Returns the fraction of `possible_nodes` that was generated, in
    /// percent, or `None` if the tree is empty.
    pub fn coverage(&self, possible_nodes: u64) -> Option<f64> {
        if possible_nodes == 0 {
            return None;
        }
        Some(self.nodes_generated as f64 / possible_nodes as f64 * 100.0)
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tourbound-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes generated:      {}", self.nodes_generated)?;
        writeln!(f, "  Nodes pruned:         {}", self.nodes_pruned)?;
        writeln!(f, "  Bound evaluations:    {}", self.bound_evaluations)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
