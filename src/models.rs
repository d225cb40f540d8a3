use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Coast Guard district identifier. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(u32);

impl Region {
    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Region(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Relative path to an LNM PDF as scraped from the listing page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PdfLink(String);

impl PdfLink {
    pub fn new(href: impl Into<String>) -> Self {
        PdfLink(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the final `/`, or the whole link when there is none.
    pub fn filename(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Absolute URL of the PDF under `base_url`.
    ///
    /// Listing hrefs are relative to the site root, written either as
    /// `./lnm/...` or `/lnm/...`. The leading `.` and a single leading `/`
    /// are consumed so the result always has exactly one `/` between the
    /// origin and the path. Already absolute hrefs are returned unchanged.
    pub fn url(&self, base_url: &str) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            return self.0.clone();
        }
        let path = self.0.strip_prefix('.').unwrap_or(&self.0);
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", base_url.trim_end_matches('/'), path)
    }
}

impl fmt::Display for PdfLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one decide-and-download unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadOutcome {
    Downloaded { bytes: usize },
    Skipped,
    Failed { reason: String },
}

impl DownloadOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DownloadOutcome::Downloaded { .. } => "downloaded",
            DownloadOutcome::Skipped => "skipped",
            DownloadOutcome::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadRecord {
    pub link: PdfLink,
    pub url: String,
    pub filename: String,
    pub outcome: DownloadOutcome,
}

/// Summary of a single run, printed by the binary once every download has settled.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub region: Region,
    pub listing_url: String,
    pub links_found: usize,
    pub retained: Vec<PdfLink>,
    pub downloads: Vec<DownloadRecord>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.count_where(|outcome| matches!(outcome, DownloadOutcome::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count_where(|outcome| matches!(outcome, DownloadOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count_where(|outcome| matches!(outcome, DownloadOutcome::Failed { .. }))
    }

    fn count_where(&self, predicate: impl Fn(&DownloadOutcome) -> bool) -> usize {
        self.downloads
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }
}
