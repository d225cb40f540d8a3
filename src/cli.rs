use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "lnmfetch")]
#[command(about = "Download the latest Local Notice to Mariners PDFs for a Coast Guard district")]
#[command(
    long_about = "Download the latest Local Notice to Mariners PDFs for a Coast Guard district.\n\n\
    \"Latest\" means greatest by plain string order of the PDF links on the district page, \
    which matches publication order only while NAVCEN keeps a sortable week/year token \
    in its filenames."
)]
#[command(version)]
pub struct Cli {
    /// District number; prompts interactively when omitted
    #[arg(short, long)]
    pub region: Option<String>,

    /// Number of most recent notices to keep
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Re-download and overwrite notices that are already present
    #[arg(short, long)]
    pub clean: bool,

    /// Directory to check for and save PDFs
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Origin of the NAVCEN site
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Layer command-line flags over a configuration loaded from the environment.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(count) = self.count {
            config.recent_count = count;
        }
        if self.clean {
            config.clean = true;
        }
        if let Some(output) = &self.output {
            config.download_dir = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }
        config
    }
}
