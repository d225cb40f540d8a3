use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::errors::{LnmError, LnmResult};
use crate::models::{DownloadOutcome, DownloadRecord, PdfLink};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Whether `filename` needs fetching given what is already on disk.
pub fn should_download(filename: &str, inventory: &BTreeSet<String>, clean: bool) -> bool {
    clean || !inventory.contains(filename)
}

/// Fetch one PDF and write it verbatim to `output_path`, replacing any
/// existing file. Returns the number of bytes written.
pub async fn download_pdf(client: &Client, url: &str, output_path: &Path) -> LnmResult<usize> {
    info!("Attempting to download '{}'", url);

    let response = client
        .get(url)
        .header(CONTENT_TYPE, PDF_CONTENT_TYPE)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(LnmError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    info!(url, "Successfully connected");

    let content = response.bytes().await?;

    info!("Writing to file '{}'", output_path.display());
    let mut file = File::create(output_path).await?;
    file.write_all(&content).await?;
    file.flush().await?;
    info!(bytes = content.len(), "All data successfully written to '{}'", output_path.display());

    Ok(content.len())
}

/// Decide and download every retained link concurrently, waiting for all
/// of them. One record per distinct filename, in the order given; later
/// links naming an already queued file are dropped so each target has a
/// single writer.
pub async fn download_all(
    client: &Client,
    base_url: &str,
    output_dir: &Path,
    links: &[PdfLink],
    inventory: &BTreeSet<String>,
    clean: bool,
) -> Vec<DownloadRecord> {
    let mut queued = HashSet::new();
    let mut unique = Vec::with_capacity(links.len());
    for link in links {
        if queued.insert(link.filename()) {
            unique.push(link);
        } else {
            debug!("Dropping repeated link '{}'", link);
        }
    }

    let tasks = unique.into_iter().map(|link| async move {
        let url = link.url(base_url);
        let filename = link.filename().to_string();

        let outcome = if should_download(&filename, inventory, clean) {
            match download_pdf(client, &url, &output_dir.join(&filename)).await {
                Ok(bytes) => DownloadOutcome::Downloaded { bytes },
                Err(e) => {
                    warn!("Failed to download '{}': {}", url, e);
                    DownloadOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        } else {
            debug!("Skipping '{}', already downloaded", filename);
            DownloadOutcome::Skipped
        };

        DownloadRecord {
            link: link.clone(),
            url,
            filename,
            outcome,
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn inventory(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_should_download_skips_present_files() {
        let present = inventory(&["c.pdf"]);
        assert!(!should_download("c.pdf", &present, false));
        assert!(should_download("b.pdf", &present, false));
    }

    #[test]
    fn test_clean_mode_always_downloads() {
        let present = inventory(&["c.pdf"]);
        assert!(should_download("c.pdf", &present, true));
        assert!(should_download("b.pdf", &present, true));
        assert!(should_download("b.pdf", &BTreeSet::new(), true));
    }

    #[tokio::test]
    async fn test_download_pdf_writes_body_and_sends_content_type() {
        let mut server = mockito::Server::new_async().await;
        let body = b"%PDF-1.4\n\x00\xff binary".to_vec();
        let mock = server
            .mock("GET", "/lnm/b.pdf")
            .match_header("content-type", "application/pdf")
            .with_status(200)
            .with_body(body.clone())
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("b.pdf");
        let client = Client::new();

        let bytes = download_pdf(&client, &format!("{}/lnm/b.pdf", server.url()), &path)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, body.len());
        assert_eq!(std::fs::read(&path).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_pdf_rejects_non_200() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/lnm/gone.pdf")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.pdf");
        let client = Client::new();

        let result = download_pdf(&client, &format!("{}/lnm/gone.pdf", server.url()), &path).await;
        assert!(matches!(result, Err(LnmError::Status { status: 404, .. })));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_download_all_skips_inventory_and_isolates_failures() {
        let mut server = mockito::Server::new_async().await;
        let present = server
            .mock("GET", "/lnm/c.pdf")
            .expect(0)
            .create_async()
            .await;
        let fetched = server
            .mock("GET", "/lnm/b.pdf")
            .with_status(200)
            .with_body("b-body")
            .create_async()
            .await;
        let broken = server
            .mock("GET", "/lnm/a.pdf")
            .with_status(500)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("c.pdf"), "old").unwrap();
        let client = Client::new();
        let links = vec![
            PdfLink::new("/lnm/c.pdf"),
            PdfLink::new("/lnm/b.pdf"),
            PdfLink::new("/lnm/a.pdf"),
        ];

        let records = download_all(
            &client,
            &server.url(),
            temp_dir.path(),
            &links,
            &inventory(&["c.pdf"]),
            false,
        )
        .await;

        present.assert_async().await;
        fetched.assert_async().await;
        broken.assert_async().await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].outcome, DownloadOutcome::Skipped);
        assert_eq!(records[1].outcome, DownloadOutcome::Downloaded { bytes: 6 });
        assert!(matches!(records[2].outcome, DownloadOutcome::Failed { .. }));

        assert_eq!(std::fs::read_to_string(temp_dir.path().join("c.pdf")).unwrap(), "old");
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("b.pdf")).unwrap(), "b-body");
        assert!(!temp_dir.path().join("a.pdf").exists());
    }

    #[tokio::test]
    async fn test_download_all_writes_repeated_filename_once() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/lnm/2023/lnm07422023.pdf")
            .with_status(200)
            .with_body("week 42")
            .expect(1)
            .create_async()
            .await;
        let mirror = server
            .mock("GET", "/mirror/lnm07422023.pdf")
            .expect(0)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = Client::new();
        let links = vec![
            PdfLink::new("/lnm/2023/lnm07422023.pdf"),
            PdfLink::new("/lnm/2023/lnm07422023.pdf"),
            PdfLink::new("/mirror/lnm07422023.pdf"),
        ];

        let records = download_all(
            &client,
            &server.url(),
            temp_dir.path(),
            &links,
            &BTreeSet::new(),
            false,
        )
        .await;

        first.assert_async().await;
        mirror.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "lnm07422023.pdf");
        assert_eq!(records[0].outcome, DownloadOutcome::Downloaded { bytes: 7 });
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("lnm07422023.pdf")).unwrap(),
            "week 42"
        );
    }

    #[tokio::test]
    async fn test_download_all_clean_mode_overwrites() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/lnm/c.pdf")
            .with_status(200)
            .with_body("new")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("c.pdf"), "old").unwrap();
        let client = Client::new();

        let records = download_all(
            &client,
            &server.url(),
            temp_dir.path(),
            &[PdfLink::new("/lnm/c.pdf")],
            &inventory(&["c.pdf"]),
            true,
        )
        .await;

        assert_eq!(records[0].outcome, DownloadOutcome::Downloaded { bytes: 3 });
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("c.pdf")).unwrap(), "new");
    }
}
