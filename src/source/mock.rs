//! Mock data source.
//!
//! Fabricates metrics with a random generator after a fixed artificial
//! delay, standing in for a real SEO data provider. Every numeric field is
//! re-rolled independently on each call; nothing is cached or seeded.

use std::time::Duration;

use async_trait::async_trait;
use color_eyre::Result;
use rand::Rng;

use crate::model::{
    Competition, CompetitorResult, ExtractedKeyword, HeadingCounts, KeywordResult, LinkCounts,
    TopKeyword, TopPage, UrlAnalysisResult,
};
use crate::source::DataSource;

const KEYWORD_DELAY: Duration = Duration::from_millis(1000);
const COMPETITOR_DELAY: Duration = Duration::from_millis(1500);
const URL_DELAY: Duration = Duration::from_millis(1200);

/// Simulated provider latency per operation.
#[derive(Debug, Clone, Copy)]
pub struct Delays {
    pub keyword: Duration,
    pub competitor: Duration,
    pub url: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            keyword: KEYWORD_DELAY,
            competitor: COMPETITOR_DELAY,
            url: URL_DELAY,
        }
    }
}

/// Data source that synthesizes results instead of fetching them.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    delays: Delays,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_delays(delays: Delays) -> Self {
        Self { delays }
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn keyword_ideas(&self, keyword: &str) -> Result<Vec<KeywordResult>> {
        tokio::time::sleep(self.delays.keyword).await;

        let mut rng = rand::rng();
        Ok(vec![
            keyword_variant(&mut rng, keyword.to_string(), 1000..11_000, 5.0),
            keyword_variant(&mut rng, format!("{keyword} tips"), 500..5500, 3.0),
            keyword_variant(&mut rng, format!("best {keyword}"), 800..8800, 4.0),
        ])
    }

    async fn competitor_overview(&self, domain: &str) -> Result<CompetitorResult> {
        tokio::time::sleep(self.delays.competitor).await;

        let mut rng = rand::rng();
        Ok(CompetitorResult {
            domain: domain.to_string(),
            traffic_estimate: rng.random_range(50_000..1_050_000),
            domain_authority: rng.random_range(50..90),
            backlinks: rng.random_range(5000..55_000),
            top_keywords: vec![
                top_keyword(&mut rng, "digital marketing", 5000..25_000, 500..5500),
                top_keyword(&mut rng, "seo services", 3000..18_000, 300..3300),
                top_keyword(&mut rng, "online marketing", 2000..14_000, 250..2750),
            ],
            top_pages: vec![
                TopPage {
                    url: format!("/{domain}/blog/digital-marketing-guide"),
                    traffic: rng.random_range(1000..11_000),
                    keywords: rng.random_range(20..120),
                },
                TopPage {
                    url: format!("/{domain}/services/seo"),
                    traffic: rng.random_range(800..8800),
                    keywords: rng.random_range(15..95),
                },
            ],
        })
    }

    async fn analyze_url(&self, url: &str) -> Result<UrlAnalysisResult> {
        tokio::time::sleep(self.delays.url).await;

        let mut rng = rand::rng();
        Ok(UrlAnalysisResult {
            url: url.to_string(),
            title: "Sample Page Title - SEO Optimized".to_string(),
            meta_description: "This is a sample meta description that would be extracted from \
                               the analyzed URL."
                .to_string(),
            word_count: rng.random_range(500..2500),
            headings: HeadingCounts {
                h1: rng.random_range(1..4),
                h2: rng.random_range(2..10),
                h3: rng.random_range(5..20),
            },
            extracted_keywords: vec![
                extracted_keyword(&mut rng, "digital marketing", 5..25, 3.0, 1000..11_000),
                extracted_keyword(&mut rng, "seo optimization", 3..18, 2.5, 500..8500),
                extracted_keyword(&mut rng, "content strategy", 2..14, 2.0, 300..6300),
            ],
            images: rng.random_range(3..23),
            links: LinkCounts {
                internal: rng.random_range(5..35),
                external: rng.random_range(2..17),
            },
        })
    }
}

fn keyword_variant(
    rng: &mut impl Rng,
    keyword: String,
    volume: std::ops::Range<u32>,
    max_cpc: f64,
) -> KeywordResult {
    KeywordResult {
        keyword,
        search_volume: rng.random_range(volume),
        difficulty: rng.random_range(0..100),
        cpc: format!("{:.2}", rng.random_range(0.0..max_cpc)),
        competition: random_competition(rng),
    }
}

fn top_keyword(
    rng: &mut impl Rng,
    keyword: &str,
    volume: std::ops::Range<u32>,
    traffic: std::ops::Range<u32>,
) -> TopKeyword {
    TopKeyword {
        keyword: keyword.to_string(),
        position: rng.random_range(1..=10),
        search_volume: rng.random_range(volume),
        traffic: rng.random_range(traffic),
    }
}

fn extracted_keyword(
    rng: &mut impl Rng,
    keyword: &str,
    frequency: std::ops::Range<u32>,
    max_density: f64,
    volume: std::ops::Range<u32>,
) -> ExtractedKeyword {
    ExtractedKeyword {
        keyword: keyword.to_string(),
        frequency: rng.random_range(frequency),
        density: format!("{:.2}", rng.random_range(0.0..max_density)),
        difficulty: rng.random_range(0..100),
        search_volume: rng.random_range(volume),
    }
}

fn random_competition(rng: &mut impl Rng) -> Competition {
    match rng.random_range(0..3) {
        0 => Competition::Low,
        1 => Competition::Medium,
        _ => Competition::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `"1.25"`-style strings: digits, one dot, exactly two decimals.
    fn is_two_decimal(s: &str) -> bool {
        matches!(s.split_once('.'), Some((whole, frac))
            if !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && frac.len() == 2
                && frac.chars().all(|c| c.is_ascii_digit()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_ideas_returns_three_variants() {
        let source = MockSource::new();
        let results = source.keyword_ideas("shoes").await.unwrap();

        let labels: Vec<&str> = results.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(labels, vec!["shoes", "shoes tips", "best shoes"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_metrics_stay_in_range() {
        let source = MockSource::new();
        for _ in 0..50 {
            let results = source.keyword_ideas("shoes").await.unwrap();
            assert_eq!(results.len(), 3);

            assert!((1000..11_000).contains(&results[0].search_volume));
            assert!((500..5500).contains(&results[1].search_volume));
            assert!((800..8800).contains(&results[2].search_volume));

            for result in &results {
                assert!(result.difficulty <= 100);
                assert!(is_two_decimal(&result.cpc), "bad cpc: {}", result.cpc);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_competitor_pages_derive_from_domain() {
        let source = MockSource::new();
        let result = source.competitor_overview("example.com").await.unwrap();

        assert_eq!(result.domain, "example.com");
        assert_eq!(result.top_pages.len(), 2);
        for page in &result.top_pages {
            assert!(page.url.contains("example.com"), "url: {}", page.url);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_competitor_overview_ranges() {
        let source = MockSource::new();
        for _ in 0..50 {
            let result = source.competitor_overview("example.com").await.unwrap();
            assert!((50_000..1_050_000).contains(&result.traffic_estimate));
            assert!((50..90).contains(&result.domain_authority));
            assert!((5000..55_000).contains(&result.backlinks));

            assert_eq!(result.top_keywords.len(), 3);
            for kw in &result.top_keywords {
                assert!((1..=10).contains(&kw.position));
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_analysis_fixed_and_random_fields() {
        let source = MockSource::new();
        for _ in 0..50 {
            let result = source.analyze_url("https://example.com/page").await.unwrap();

            assert_eq!(result.url, "https://example.com/page");
            assert_eq!(result.title, "Sample Page Title - SEO Optimized");
            assert!((500..2500).contains(&result.word_count));
            assert!((1..4).contains(&result.headings.h1));
            assert!((2..10).contains(&result.headings.h2));
            assert!((5..20).contains(&result.headings.h3));

            assert_eq!(result.extracted_keywords.len(), 3);
            for kw in &result.extracted_keywords {
                assert!(kw.difficulty <= 100);
                assert!(is_two_decimal(&kw.density), "bad density: {}", kw.density);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_are_rerolled_per_call() {
        let source = MockSource::new();
        // 10 rolls of 5 independent uniform fields all landing on identical
        // values would mean the generator is caching.
        let mut volumes = Vec::new();
        for _ in 0..10 {
            let results = source.keyword_ideas("shoes").await.unwrap();
            volumes.push(results[0].search_volume);
        }
        assert!(volumes.iter().any(|v| *v != volumes[0]));
    }
}
