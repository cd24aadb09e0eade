//! Single-page download of a job-board category.

use crate::extract::WWR_ORIGIN;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_CATEGORY: &str = "full-stack-programming";

/// Snapshot of the last successfully fetched page.
pub const DEBUG_PAGE: &str = "debug_page.html";

/// Snapshot of the body returned alongside a non-200 status.
pub const DEBUG_ERROR_PAGE: &str = "debug_wwr.html";

/// Listing page for `category`, e.g. `full-stack-programming`.
pub fn category_url(category: &str) -> String {
    category_url_at(WWR_ORIGIN, category)
}

fn category_url_at(origin: &str, category: &str) -> String {
    format!("{}/categories/remote-{}-jobs", origin, category)
}

pub struct Fetcher {
    client: Client,
    origin: String,
    debug_dir: PathBuf,
}

impl Fetcher {
    pub fn new(debug_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            origin: WWR_ORIGIN.to_string(),
            debug_dir: debug_dir.into(),
        })
    }

    /// Points the fetcher at another host serving the same paths.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Downloads the first page of `category`.
    ///
    /// Returns `Ok(None)` when the site answers with anything but 200; the
    /// body is kept in [`DEBUG_ERROR_PAGE`] for inspection. Transport errors
    /// are returned as-is. Only one page is ever requested, whatever `pages`
    /// says.
    pub fn fetch(&self, category: &str, pages: u32) -> Result<Option<String>> {
        let url = category_url_at(&self.origin, category);
        if pages > 1 {
            tracing::info!("pages={} requested, only the first page is fetched", pages);
        }

        tracing::info!("📡 Scraping We Work Remotely: {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to fetch {}", url))?;

        let status = response.status();
        tracing::info!("Status code: {}", status.as_u16());

        let body = response
            .text()
            .with_context(|| format!("failed to read response body from {}", url))?;

        if status != StatusCode::OK {
            tracing::error!("❌ Error: Status code {}", status.as_u16());
            write_debug(&self.debug_dir.join(DEBUG_ERROR_PAGE), &body);
            return Ok(None);
        }

        tracing::info!("✅ Fetched {} bytes from {}", body.len(), url);
        write_debug(&self.debug_dir.join(DEBUG_PAGE), &body);

        Ok(Some(body))
    }
}

/// Best-effort dump of a raw page; a failure here never stops the run.
fn write_debug(path: &Path, body: &str) {
    match fs::write(path, body) {
        Ok(()) => tracing::debug!("saved raw page to {:?}", path),
        Err(e) => tracing::warn!("could not write {:?}: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serves a single HTTP response and reports the request head it got.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            tx.send(head).unwrap();
        });

        (origin, rx)
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wwr-fetch-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_fetch_ok_returns_body_and_snapshot() {
        let (origin, head) = serve_once("200 OK", "<html>jobs</html>");
        let dir = temp_dir("ok");

        let fetcher = Fetcher::new(&dir).unwrap().with_origin(origin);
        let body = fetcher.fetch(DEFAULT_CATEGORY, 3).unwrap();

        assert_eq!(body.as_deref(), Some("<html>jobs</html>"));
        assert_eq!(fs::read_to_string(dir.join(DEBUG_PAGE)).unwrap(), "<html>jobs</html>");
        assert!(!dir.join(DEBUG_ERROR_PAGE).exists());

        let head = head.recv().unwrap().to_lowercase();
        assert!(head.starts_with("get /categories/remote-full-stack-programming-jobs "));
        assert!(head.contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fetch_non_200_returns_none_and_dumps_body() {
        let (origin, _head) = serve_once("403 Forbidden", "blocked");
        let dir = temp_dir("forbidden");

        let fetcher = Fetcher::new(&dir).unwrap().with_origin(origin);
        assert_eq!(fetcher.fetch("devops", 1).unwrap(), None);
        assert_eq!(fs::read_to_string(dir.join(DEBUG_ERROR_PAGE)).unwrap(), "blocked");
        assert!(!dir.join(DEBUG_PAGE).exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fetch_connection_refused_is_error() {
        let origin = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let dir = temp_dir("refused");

        let fetcher = Fetcher::new(&dir).unwrap().with_origin(origin);
        assert!(fetcher.fetch(DEFAULT_CATEGORY, 1).is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_category_url() {
        assert_eq!(
            category_url(DEFAULT_CATEGORY),
            "https://weworkremotely.com/categories/remote-full-stack-programming-jobs"
        );
        assert_eq!(
            category_url("back-end-programming"),
            "https://weworkremotely.com/categories/remote-back-end-programming-jobs"
        );
    }

    #[test]
    fn test_write_debug_keeps_body_verbatim() {
        let dir = std::env::temp_dir().join(format!("wwr-debug-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(DEBUG_PAGE);

        write_debug(&path, "<html>raw</html>");
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>raw</html>");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_debug_ignores_bad_path() {
        let path = std::env::temp_dir()
            .join(format!("wwr-missing-{}", std::process::id()))
            .join("nested")
            .join(DEBUG_ERROR_PAGE);

        write_debug(&path, "body");
        assert!(!path.exists());
    }
}
