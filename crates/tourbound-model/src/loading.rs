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

//! City list loader.
//!
//! Reads whitespace-delimited text into a list of cities. The expected
//! layout is
//!
//! ```raw
//! N                  (number of cities)
//! c_1                (one coordinate per city for line instances, or
//! ...                 two coordinates "x y" per city for planar ones)
//! c_N
//! ```
//!
//! Line breaks carry no meaning beyond separating tokens, and anything after a
//! `#` on a line is a comment. Coordinates must be finite. By default the
//! loader rejects tokens left over after the last city, which usually means
//! the count and the data disagree.

use crate::city::{LineCity, PlanarCity};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};
use thiserror::Error;
use tourbound_core::num::CostNumeric;

/// The error type for loading city lists.
#[derive(Debug, Error)]
pub enum CityLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before all announced cities were read.
    #[error("Unexpected end of input while reading cities")]
    UnexpectedEof,
    /// A token could not be parsed into the expected type.
    #[error("Could not parse token '{token}' as type {type_name}")]
    Parse {
        /// The token that failed to parse.
        token: String,
        /// The name of the target type.
        type_name: &'static str,
    },
    /// A coordinate was NaN or infinite.
    #[error("City {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending city in the input.
        index: usize,
    },
    /// Input continued after the last announced city.
    #[error("Unexpected trailing token '{token}' after the last city")]
    TrailingInput {
        /// The first leftover token.
        token: String,
    },
}

/// A configurable loader for city lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityLoader {
    allow_trailing_input: bool,
}

impl Default for CityLoader {
    fn default() -> Self {
        Self {
            allow_trailing_input: false,
        }
    }
}

impl CityLoader {
    /// Creates a loader with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether tokens after the last city are ignored instead of
    /// rejected.
    #[inline]
    pub fn allow_trailing_input(mut self, yes: bool) -> Self {
        self.allow_trailing_input = yes;
        self
    }

    /// Loads cities on a line, one coordinate each.
    pub fn load_line_bufread<T, R>(&self, rdr: R) -> Result<Vec<LineCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
        R: BufRead,
    {
        let mut scanner = Scanner::new(rdr);
        let n: usize = scanner.next()?;

        let mut cities = Vec::with_capacity(n);
        for index in 0..n {
            let position: T = scanner.next()?;
            if !position.is_finite() {
                return Err(CityLoaderError::NonFiniteCoordinate { index });
            }
            cities.push(LineCity::new(position));
        }

        self.finish(&mut scanner)?;
        Ok(cities)
    }

    /// Loads cities in the plane, two coordinates each.
    pub fn load_planar_bufread<T, R>(
        &self,
        rdr: R,
    ) -> Result<Vec<PlanarCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
        R: BufRead,
    {
        let mut scanner = Scanner::new(rdr);
        let n: usize = scanner.next()?;

        let mut cities = Vec::with_capacity(n);
        for index in 0..n {
            let x: T = scanner.next()?;
            let y: T = scanner.next()?;
            if !x.is_finite() || !y.is_finite() {
                return Err(CityLoaderError::NonFiniteCoordinate { index });
            }
            cities.push(PlanarCity::new(x, y));
        }

        self.finish(&mut scanner)?;
        Ok(cities)
    }

    /// Loads line cities from a string slice.
    #[inline]
    pub fn load_line_str<T>(&self, s: &str) -> Result<Vec<LineCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
    {
        self.load_line_bufread(s.as_bytes())
    }

    /// Loads planar cities from a string slice.
    #[inline]
    pub fn load_planar_str<T>(&self, s: &str) -> Result<Vec<PlanarCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
    {
        self.load_planar_bufread(s.as_bytes())
    }

    /// Loads line cities from a file.
    #[inline]
    pub fn load_line_path<T, P>(&self, path: P) -> Result<Vec<LineCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.load_line_bufread(BufReader::new(file))
    }

    /// Loads planar cities from a file.
    #[inline]
    pub fn load_planar_path<T, P>(&self, path: P) -> Result<Vec<PlanarCity<T>>, CityLoaderError>
    where
        T: CostNumeric + FromStr,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.load_planar_bufread(BufReader::new(file))
    }

    fn finish<R>(&self, scanner: &mut Scanner<R>) -> Result<(), CityLoaderError>
    where
        R: BufRead,
    {
        if self.allow_trailing_input {
            return Ok(());
        }
        match scanner.next_token()? {
            Some(token) => Err(CityLoaderError::TrailingInput { token }),
            None => Ok(()),
        }
    }
}

/// Splits a reader into whitespace-delimited tokens, skipping `#` comments.
struct Scanner<R> {
    rdr: R,
    pending: VecDeque<String>,
    line: String,
}

impl<R> Scanner<R>
where
    R: BufRead,
{
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    /// Returns the next token, or `None` at the end of the input.
    fn next_token(&mut self) -> Result<Option<String>, CityLoaderError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }

            let content = match self.line.find('#') {
                Some(comment) => &self.line[..comment],
                None => self.line.as_str(),
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, CityLoaderError>
    where
        T: FromStr,
    {
        let token = self.next_token()?.ok_or(CityLoaderError::UnexpectedEof)?;
        token.parse::<T>().map_err(|_| CityLoaderError::Parse {
            token,
            type_name: std::any::type_name::<T>(),
        })
    }
}
