//! Fetch the most recent Local Notice to Mariners PDFs for a Coast Guard
//! district from NAVCEN, skipping any already on disk.

pub mod cli;
pub mod config;
pub mod downloader;
pub mod errors;
pub mod inventory;
pub mod listing;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod recent;

pub use errors::{LnmError, LnmResult};
pub use models::{DownloadOutcome, PdfLink, Region, RunReport};
