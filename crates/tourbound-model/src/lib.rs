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

//! # Tourbound Model
//!
//! Problem-side types for the tourbound traveling salesman solver.
//!
//! ## Modules
//!
//! - `city`: the `City` cost-model trait and the concrete `LineCity` and
//!   `PlanarCity` point types.
//! - `index`: the `CityIndex` typed index.
//! - `model`: `TspModel`, an immutable city list with a precomputed cost
//!   matrix and path/cycle cost helpers.
//! - `tour`: `Tour`, a closed cycle over city indices together with its cost.
//! - `loading`: a whitespace-delimited text loader for city lists.
//!
//! Solvers only ever work with `CityIndex` values; city data is loaded once
//! and never mutated afterwards.

pub mod city;
pub mod index;
pub mod loading;
pub mod model;
pub mod tour;
