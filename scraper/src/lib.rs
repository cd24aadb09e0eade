//! We Work Remotely job scraper.
//!
//! Fetches one category page and extracts job records from it; see
//! [`scrape`] for the full run.

pub mod extract;
pub mod fetch;

use anyhow::Result;
use common::Job;
use scraper::{Html, Selector};
use std::time::Duration;

pub use extract::{ListingExtractor, WeWorkRemotely, MAX_LISTINGS};
pub use fetch::{category_url, Fetcher, DEFAULT_CATEGORY};

/// Pause after each run so repeated invocations don't hammer the site.
pub const POLITENESS_DELAY: Duration = Duration::from_secs(2);

/// Parses a raw page and extracts its jobs, logging what was found.
pub fn scrape_document(extractor: &impl ListingExtractor, html: &str) -> Vec<Job> {
    let document = Html::parse_document(html);

    let page_title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| "No title".to_string());
    tracing::info!("Page title: {}", page_title);

    let found = extractor.listings(&document).len();
    tracing::info!("Found {} job listings", found);

    let jobs = extractor.extract_jobs(&document);
    tracing::info!("Successfully extracted {} jobs", jobs.len());
    jobs
}

/// Fetches the first page of `category` and extracts its jobs.
///
/// A non-200 answer yields an empty list rather than an error.
pub fn scrape(
    fetcher: &Fetcher,
    extractor: &impl ListingExtractor,
    category: &str,
    pages: u32,
) -> Result<Vec<Job>> {
    let Some(html) = fetcher.fetch(category, pages)? else {
        return Ok(Vec::new());
    };

    let jobs = scrape_document(extractor, &html);
    std::thread::sleep(POLITENESS_DELAY);
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_document_without_listings() {
        let extractor = WeWorkRemotely::new().unwrap();
        let jobs = scrape_document(&extractor, "<html><body><p>Maintenance</p></body></html>");
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_scrape_document_extracts_listings() {
        let html = r#"<html><head><title>Remote Full-Stack Jobs</title></head><body><ul>
            <li class="new-listing-container">
              <a href="/remote-jobs/acme-rust">
                <h3 class="new-listing__header__title">Rust Developer</h3>
                <p class="new-listing__company-name">Acme</p>
                <p class="new-listing__categories__category">$80,000 USD</p>
              </a>
            </li>
          </ul></body></html>"#;
        let jobs = scrape_document(&WeWorkRemotely::new().unwrap(), html);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].salary, "$80,000 USD");
        assert_eq!(jobs[0].url, "https://weworkremotely.com/remote-jobs/acme-rust");
    }
}
