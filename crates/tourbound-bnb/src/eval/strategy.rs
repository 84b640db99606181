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

//! Selection of the lower bound used to price candidate extensions.
//!
//! Each strategy is addressable by its numeric version (`1..=4`) and by a
//! kebab-case name, so it can come from a config file, a CLI flag or code.

use crate::error::ConfigurationError;

/// The admissible lower bounds the solver can prune with.
///
/// Every strategy estimates the cost of the cheapest completion of a path
/// `track -> candidate -> ... -> root`. They differ only in how tight (and how
/// expensive) that estimate is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundStrategy {
    /// Remaining city count times the cheapest edge of the whole instance.
    GlobalMinEdge,
    /// Cheapest way to enter every city that still has to be entered.
    MinIncoming,
    /// Half the entry cost at both path endpoints plus the cheapest
    /// two-edge visit of every unvisited city.
    EndpointVisit,
    /// Remaining city count times the cheapest edge still usable by the
    /// completion.
    TrackMinEdge,
}

impl BoundStrategy {
    /// All strategies in version order.
    pub const ALL: [BoundStrategy; 4] = [
        BoundStrategy::GlobalMinEdge,
        BoundStrategy::MinIncoming,
        BoundStrategy::EndpointVisit,
        BoundStrategy::TrackMinEdge,
    ];

    /// Returns the numeric version of this strategy.
    #[inline]
    pub const fn version(self) -> u32 {
        match self {
            BoundStrategy::GlobalMinEdge => 1,
            BoundStrategy::MinIncoming => 2,
            BoundStrategy::EndpointVisit => 3,
            BoundStrategy::TrackMinEdge => 4,
        }
    }

    /// Returns the kebab-case name of this strategy.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            BoundStrategy::GlobalMinEdge => "global-min-edge",
            BoundStrategy::MinIncoming => "min-incoming",
            BoundStrategy::EndpointVisit => "endpoint-visit",
            BoundStrategy::TrackMinEdge => "track-min-edge",
        }
    }

    /// Returns the strategy with the given numeric version.
    #[inline]
    pub const fn from_version(version: u32) -> Option<Self> {
        match version {
            1 => Some(BoundStrategy::GlobalMinEdge),
            2 => Some(BoundStrategy::MinIncoming),
            3 => Some(BoundStrategy::EndpointVisit),
            4 => Some(BoundStrategy::TrackMinEdge),
            _ => None,
        }
    }
}

impl TryFrom<u32> for BoundStrategy {
    type Error = ConfigurationError;

    #[inline]
    fn try_from(version: u32) -> Result<Self, Self::Error> {
        Self::from_version(version).ok_or(ConfigurationError::InvalidBoundVersion(version))
    }
}

impl std::str::FromStr for BoundStrategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(version) = trimmed.parse::<u32>() {
            return Self::try_from(version);
        }

        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigurationError::UnknownBoundStrategy(trimmed.to_string()))
    }
}

impl std::fmt::Display for BoundStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (v{})", self.name(), self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, BoundStrategy::GlobalMinEdge)]
    #[case(2, BoundStrategy::MinIncoming)]
    #[case(3, BoundStrategy::EndpointVisit)]
    #[case(4, BoundStrategy::TrackMinEdge)]
    fn test_versions_map_to_strategies(#[case] version: u32, #[case] expected: BoundStrategy) {
        assert_eq!(BoundStrategy::try_from(version), Ok(expected));
        assert_eq!(expected.version(), version);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(u32::MAX)]
    fn test_out_of_range_versions_are_rejected(#[case] version: u32) {
        assert_eq!(
            BoundStrategy::try_from(version),
            Err(ConfigurationError::InvalidBoundVersion(version))
        );
    }

    #[test]
    fn test_all_is_in_version_order() {
        let versions: Vec<u32> = BoundStrategy::ALL.iter().map(|s| s.version()).collect();
        assert_eq!(versions, vec![1, 2, 3, 4]);
    }

    #[rstest]
    #[case("3", BoundStrategy::EndpointVisit)]
    #[case(" 4 ", BoundStrategy::TrackMinEdge)]
    #[case("min-incoming", BoundStrategy::MinIncoming)]
    #[case("Global-Min-Edge", BoundStrategy::GlobalMinEdge)]
    fn test_parse_accepts_versions_and_names(#[case] input: &str, #[case] expected: BoundStrategy) {
        assert_eq!(input.parse::<BoundStrategy>(), Ok(expected));
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert_eq!(
            "9".parse::<BoundStrategy>(),
            Err(ConfigurationError::InvalidBoundVersion(9))
        );
        assert_eq!(
            "tightest".parse::<BoundStrategy>(),
            Err(ConfigurationError::UnknownBoundStrategy("tightest".into()))
        );
    }

    #[test]
    fn test_display_shows_name_and_version() {
        assert_eq!(BoundStrategy::EndpointVisit.to_string(), "endpoint-visit (v3)");
    }
}
