//! Turns a category page into job records.
//!
//! Selectors are tied to the job board's markup and will break whenever the
//! site changes. Everything that knows about that markup lives behind
//! [`ListingExtractor`], so a redesign only touches one implementation.

use anyhow::{anyhow, Result};
use common::{Job, DEFAULT_LOCATION, NOT_SPECIFIED};
use scraper::{ElementRef, Html, Selector};

/// Listings past this point on the page are ignored.
pub const MAX_LISTINGS: usize = 15;

/// Titles containing any of these (lowercased) are ads, not jobs.
pub const EXCLUDED_KEYWORDS: [&str; 2] = ["sponsored", "bootcamp"];

/// Marker in a category tag that carries the salary range.
const SALARY_MARKER: &str = "USD";

/// A way of pulling job records out of a parsed listing page.
pub trait ListingExtractor {
    /// Every listing fragment on the page, in document order.
    fn listings<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;

    /// Builds a record from one listing.
    ///
    /// `Ok(None)` means the listing was deliberately skipped; `Err` means
    /// something about it was unexpected.
    fn extract_listing(&self, listing: ElementRef<'_>) -> Result<Option<Job>>;

    /// Extracts up to [`MAX_LISTINGS`] records. A listing that fails is
    /// logged and dropped without affecting the others.
    fn extract_jobs(&self, document: &Html) -> Vec<Job> {
        self.listings(document)
            .into_iter()
            .take(MAX_LISTINGS)
            .filter_map(|listing| match self.extract_listing(listing) {
                Ok(job) => job,
                Err(e) => {
                    tracing::warn!("❌ Error extracting job data: {:#}", e);
                    None
                }
            })
            .collect()
    }
}

/// Extraction strategy for weworkremotely.com category pages.
pub struct WeWorkRemotely {
    origin: String,
    detail_marker: String,
    listing: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    category: Selector,
    link: Selector,
}

pub const WWR_ORIGIN: &str = "https://weworkremotely.com";

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {:?}: {:?}", css, e))
}

/// Trimmed text of the first element matching `selector`, if any.
fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn is_excluded(title: &str) -> bool {
    let title = title.to_lowercase();
    EXCLUDED_KEYWORDS.iter().any(|keyword| title.contains(keyword))
}

fn timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

impl WeWorkRemotely {
    pub fn new() -> Result<Self> {
        Ok(Self {
            origin: WWR_ORIGIN.to_string(),
            detail_marker: "/remote-jobs/".to_string(),
            listing: selector("li.new-listing-container")?,
            title: selector("h3.new-listing__header__title")?,
            company: selector("p.new-listing__company-name")?,
            location: selector("p.new-listing__company-headquarters")?,
            category: selector("p.new-listing__categories__category")?,
            link: selector("a[href]")?,
        })
    }

    /// Absolute link of the first anchor pointing at a job detail page, or
    /// an empty string when there is none.
    fn detail_url(&self, listing: ElementRef<'_>) -> String {
        listing
            .select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(&self.detail_marker))
            .map(|href| format!("{}{}", self.origin, href))
            .unwrap_or_default()
    }

    /// All category tags in order, plus the first one that looks like a salary.
    fn categories(&self, listing: ElementRef<'_>) -> (Vec<String>, Option<String>) {
        let categories: Vec<String> = listing
            .select(&self.category)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect();

        let salary = categories
            .iter()
            .find(|cat| cat.contains(SALARY_MARKER))
            .cloned();

        (categories, salary)
    }
}

impl ListingExtractor for WeWorkRemotely {
    fn listings<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.listing).collect()
    }

    fn extract_listing(&self, listing: ElementRef<'_>) -> Result<Option<Job>> {
        let title = first_text(listing, &self.title).unwrap_or_else(|| NOT_SPECIFIED.to_string());
        if is_excluded(&title) {
            tracing::debug!("skipping ad listing {:?}", title);
            return Ok(None);
        }

        let company =
            first_text(listing, &self.company).unwrap_or_else(|| NOT_SPECIFIED.to_string());
        let location =
            first_text(listing, &self.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let url = self.detail_url(listing);
        let (categories, salary) = self.categories(listing);

        Ok(Some(Job {
            title,
            company,
            location,
            salary: salary.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            url,
            categories,
            scraped_at: timestamp(),
        }))
    }
}
