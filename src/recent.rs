//! Picking the presumed-newest links
//!
//! NAVCEN embeds a sortable week/year token in LNM filenames, so ordinal
//! order of the whole href approximates publication order. Nothing here
//! knows about dates: if the upstream naming scheme changes, so does the
//! meaning of "most recent".

use tracing::info;

use crate::models::PdfLink;

/// Sort by full string ordinal order, reverse, keep the first `count`.
pub fn filter_recent(mut links: Vec<PdfLink>, count: usize) -> Vec<PdfLink> {
    info!("Keeping the {} most recent of {} links", count, links.len());

    links.sort();
    links.reverse();
    links.truncate(count);

    for link in &links {
        info!(href = %link, "Retained");
    }
    links
}
