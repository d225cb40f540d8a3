//! Error types for fetching Local Notice to Mariners bulletins

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LnmError {
    #[error("Invalid district '{0}'")]
    InvalidRegion(String),

    #[error("Input closed before a valid district was entered")]
    InputClosed,

    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        url: String,
        status: u16,
    },

    #[error("Failed to list local PDFs in {}: {source}", .dir.display())]
    Inventory {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LnmResult<T> = std::result::Result<T, LnmError>;
