// src/crawl/fetch.rs
// =============================================================================
// Everything that talks to the network.
//
// Two kinds of request:
// - fetch_page: GET the page body. HTTP status codes are ignored, so a 404 or
//   500 page is still parsed for links and emails.
// - probe_content_type: find out what a discovered link points at before we
//   queue it, so images, PDFs and archives never get parsed as HTML. We try a
//   HEAD first (no body download) and fall back to GET if HEAD fails or the
//   server refuses the method.
//
// There is no timeout unless one was configured.
// =============================================================================

use crate::error::{CrawlError, FetchError};
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// HTTP client shared by every request in a run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, CrawlError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CrawlError::Client)?;
        Ok(Self { client })
    }

    /// Fetches a web page and returns its body, whatever the status code.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "parsing error page anyway");
        }

        response.text().await.map_err(|e| FetchError::new(url, e))
    }

    /// Returns the Content-Type header of `url`, if the server sends one.
    pub async fn probe_content_type(&self, url: &str) -> Result<Option<String>, FetchError> {
        let response = match self.client.head(url).send().await {
            Ok(response) if !head_refused(response.status()) => response,
            Ok(response) => {
                debug!(%url, status = %response.status(), "HEAD refused, retrying with GET");
                self.get_headers(url).await?
            }
            Err(e) => {
                debug!(%url, error = %e, "HEAD failed, retrying with GET");
                self.get_headers(url).await?
            }
        };

        Ok(content_type(&response))
    }

    // The body is never read; dropping the response closes it.
    async fn get_headers(&self, url: &str) -> Result<Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, e))
    }
}

/// True if a Content-Type header value denotes an HTML page.
pub fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains("text/html"))
}

fn head_refused(status: StatusCode) -> bool {
    matches!(status, StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED)
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
