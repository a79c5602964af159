//! Tab identifiers for the three research panels.

use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::{bail, Report};

/// Identifier for one of the dashboard tabs.
///
/// The slug form is stable: it is accepted by the `--tab` CLI flag and the
/// `default_tab` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    KeywordResearch,
    CompetitorAnalysis,
    UrlAnalyzer,
}

impl TabId {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [
        Self::KeywordResearch,
        Self::CompetitorAnalysis,
        Self::UrlAnalyzer,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::KeywordResearch => "keyword-research",
            Self::CompetitorAnalysis => "competitor-analysis",
            Self::UrlAnalyzer => "url-analyzer",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::KeywordResearch => "Keyword Research",
            Self::CompetitorAnalysis => "Competitor Analysis",
            Self::UrlAnalyzer => "URL Analyzer",
        }
    }

    /// Position within [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::KeywordResearch => 0,
            Self::CompetitorAnalysis => 1,
            Self::UrlAnalyzer => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::KeywordResearch => Self::CompetitorAnalysis,
            Self::CompetitorAnalysis => Self::UrlAnalyzer,
            Self::UrlAnalyzer => Self::KeywordResearch,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::KeywordResearch => Self::UrlAnalyzer,
            Self::CompetitorAnalysis => Self::KeywordResearch,
            Self::UrlAnalyzer => Self::CompetitorAnalysis,
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for TabId {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for tab in Self::ALL {
            if tab.slug().eq_ignore_ascii_case(s) {
                return Ok(tab);
            }
        }
        let slugs: Vec<_> = Self::ALL.iter().map(|t| t.slug()).collect();
        bail!("Unknown tab '{}'. Available: {}", s, slugs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for tab in TabId::ALL {
            assert_eq!(tab.slug().parse::<TabId>().unwrap(), tab);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Keyword-Research".parse::<TabId>().unwrap(),
            TabId::KeywordResearch
        );
    }

    #[test]
    fn test_parse_rejects_unknown_slug() {
        assert!("rank-tracker".parse::<TabId>().is_err());
    }

    #[test]
    fn test_next_previous_cycle() {
        for tab in TabId::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
        assert_eq!(TabId::UrlAnalyzer.next(), TabId::KeywordResearch);
    }
}
