//! Data source abstraction for SEO metrics.
//!
//! Panels talk to a [`DataSource`] and never care where the numbers come
//! from. The only implementation shipped today is [`MockSource`], which
//! fabricates plausible-looking data after an artificial delay; a real
//! provider client can be dropped in behind this trait without touching the
//! panel layer.

mod mock;

use async_trait::async_trait;
use color_eyre::Result;

pub use mock::{Delays, MockSource};

use crate::model::{CompetitorResult, KeywordResult, UrlAnalysisResult};

/// Capability to fetch SEO metrics for a query.
///
/// Implementations receive the query exactly as submitted (already trimmed
/// and non-empty; the panels enforce that guard).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Expand a seed keyword into suggestions with volume/difficulty/CPC.
    async fn keyword_ideas(&self, keyword: &str) -> Result<Vec<KeywordResult>>;

    /// Fetch a domain-level overview of a competitor.
    async fn competitor_overview(&self, domain: &str) -> Result<CompetitorResult>;

    /// Run an on-page audit of a single URL.
    async fn analyze_url(&self, url: &str) -> Result<UrlAnalysisResult>;
}
