//! Scraping a district listing page for LNM PDF links

use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::models::{PdfLink, Region};

const PDF_LINK_SELECTOR: &str = r#"a[href*="lnm"][href*=".pdf"]"#;
const PDF_LABEL: &str = "PDF";

static PDF_LINK_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Listing page for one district.
pub fn region_url(base_url: &str, region: Region) -> String {
    format!(
        "{}/?pageName=lnmDistrict&region={}",
        base_url.trim_end_matches('/'),
        region
    )
}

/// Fetch a listing page and return its PDF links in page order.
///
/// Transport errors and non-200 responses are logged and produce an empty
/// list; callers treat "no links" as the only failure signal.
pub async fn scrape_for_pdfs(client: &Client, url: &str) -> Vec<PdfLink> {
    info!("Scraping '{}' for LNM PDFs", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url, "Error encountered: {}", e);
            return Vec::new();
        }
    };

    if response.status() != StatusCode::OK {
        warn!(url, "Error encountered: HTTP {}", response.status());
        return Vec::new();
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(url, "Error reading listing body: {}", e);
            return Vec::new();
        }
    };
    info!("Successfully loaded page");

    extract_pdf_links(&body)
}

/// Hrefs of anchors pointing at LNM PDFs whose text mentions "PDF".
pub fn extract_pdf_links(html: &str) -> Vec<PdfLink> {
    let document = Html::parse_document(html);
    let selector = PDF_LINK_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(PDF_LINK_SELECTOR).expect("PDF_LINK_SELECTOR is a valid CSS selector")
    });

    let links: Vec<PdfLink> = document
        .select(selector)
        .filter(|element| element.text().collect::<String>().contains(PDF_LABEL))
        .filter_map(|element| element.value().attr("href"))
        .map(PdfLink::new)
        .collect();

    for (position, link) in links.iter().enumerate() {
        info!(position, href = %link, "Found LNM PDF");
    }
    debug!("Extracted {} PDF links", links.len());

    links
}
