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

//! Tourbound-BnB: exact branch-and-bound for the symmetric TSP
//!
//! Finds a minimum-cost Hamiltonian cycle over a list of cities by depth-first
//! enumeration of the tours rooted at city 0. A greedy nearest-neighbour tour
//! seeds the incumbent, and every candidate extension is priced with an
//! admissible lower bound before it is expanded. Four interchangeable bounds
//! are provided so their pruning power can be compared on the same instance.
//!
//! Core flow
//! - Load or build a list of cities (`tourbound_model::city`).
//! - Wrap them in a `solution::TspSolution` and select a `BoundStrategy`.
//! - Call `solve` (optionally with a monitor) and read back the tour and the
//!   generated / pruned counters.
//!
//! Assumptions and guarantees
//! - Costs are symmetric, non-negative and finite.
//! - Every bound is admissible, so a completed run proves optimality.
//! - Runs are deterministic: the candidate order is ascending city index.
//!
//! Module map
//! - `bnb`: the search engine and session orchestration.
//! - `config`: solver configuration and its builder.
//! - `error`: configuration errors.
//! - `eval`: bound strategies and the incident-cost primitives behind them.
//! - `greedy`: the nearest-neighbour seed tour.
//! - `monitor`: tree-search monitors (log, limits, composite).
//! - `result`: termination reasons and outcomes.
//! - `solution`: the user-facing `TspSolution` facade.
//! - `state`: the mutable path state of the search.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod config;
pub mod error;
pub mod eval;
pub mod greedy;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod solution;
mod stack;
pub mod state;
pub mod stats;

pub use eval::strategy::BoundStrategy;
pub use solution::TspSolution;
