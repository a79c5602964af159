//! Result types produced by a [`crate::source::DataSource`].
//!
//! All of these are ephemeral view data: they live in panel state until the
//! next request overwrites them, and can be serialized for the copy-as-JSON
//! action.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Competition tier for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl Competition {
    /// Derive a competition tier from a 0-100 difficulty score.
    ///
    /// Used by the URL analyzer's render layer; the keyword and competitor
    /// generators assign tiers randomly instead. The mismatch is inherited
    /// from the product and kept as-is.
    #[must_use]
    pub const fn from_difficulty(difficulty: u8) -> Self {
        if difficulty < 30 {
            Self::Low
        } else if difficulty < 70 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{label}")
    }
}

/// One keyword suggestion with its synthetic metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    /// Monthly search volume.
    pub search_volume: u32,
    /// Ranking difficulty score in 0-100.
    pub difficulty: u8,
    /// Cost per click in USD, pre-formatted to two decimals.
    pub cpc: String,
    pub competition: Competition,
}

/// Domain-level overview for a competitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorResult {
    pub domain: String,
    pub traffic_estimate: u32,
    pub domain_authority: u32,
    pub backlinks: u32,
    pub top_keywords: Vec<TopKeyword>,
    pub top_pages: Vec<TopPage>,
}

/// A keyword the competitor ranks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopKeyword {
    pub keyword: String,
    /// SERP position, 1-10.
    pub position: u32,
    pub search_volume: u32,
    /// Monthly visits attributed to this keyword.
    pub traffic: u32,
}

/// A high-traffic page on the competitor's site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPage {
    pub url: String,
    pub traffic: u32,
    /// Number of keywords the page ranks for.
    pub keywords: u32,
}

/// On-page audit of a single URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlAnalysisResult {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub word_count: u32,
    pub headings: HeadingCounts,
    pub extracted_keywords: Vec<ExtractedKeyword>,
    pub images: u32,
    pub links: LinkCounts,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinkCounts {
    pub internal: u32,
    pub external: u32,
}

/// A keyword extracted from the analyzed page.
///
/// Carries no stored competition tier; the view derives one from
/// `difficulty` via [`Competition::from_difficulty`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedKeyword {
    pub keyword: String,
    /// Occurrences on the page.
    pub frequency: u32,
    /// Keyword density in percent, pre-formatted to two decimals.
    pub density: String,
    pub difficulty: u8,
    pub search_volume: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_thresholds() {
        assert_eq!(Competition::from_difficulty(0), Competition::Low);
        assert_eq!(Competition::from_difficulty(29), Competition::Low);
        assert_eq!(Competition::from_difficulty(30), Competition::Medium);
        assert_eq!(Competition::from_difficulty(69), Competition::Medium);
        assert_eq!(Competition::from_difficulty(70), Competition::High);
        assert_eq!(Competition::from_difficulty(100), Competition::High);
    }

    #[test]
    fn test_competition_display() {
        assert_eq!(Competition::Low.to_string(), "Low");
        assert_eq!(Competition::Medium.to_string(), "Medium");
        assert_eq!(Competition::High.to_string(), "High");
    }

    #[test]
    fn test_results_serialize_to_json() {
        let result = KeywordResult {
            keyword: "shoes".to_string(),
            search_volume: 4200,
            difficulty: 55,
            cpc: "1.25".to_string(),
            competition: Competition::Medium,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"keyword\":\"shoes\""));
        assert!(json.contains("\"competition\":\"Medium\""));
    }
}
