use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::{PdfError, PdfRenderer};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// POSTs the HTML to a rendering service and returns the response body.
///
/// Retries on 429 and 5xx with exponential backoff (base `backoff`, doubling).
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    url: String,
    backoff: Duration,
}

impl HttpPdfRenderer {
    pub fn new(url: String) -> Self {
        Self::with_backoff(url, Duration::from_millis(1000))
    }

    pub fn with_backoff(url: String, backoff: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url,
            backoff,
        }
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, html: &str) -> Result<Bytes, PdfError> {
        let mut last_error: Option<PdfError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "PDF service attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .header("content-type", "text/html; charset=utf-8")
                .body(html.to_string())
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PdfError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("PDF service returned {}: {}", status, body);
                last_error = Some(PdfError::Service {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(PdfError::Service {
                    status: status.as_u16(),
                    message,
                });
            }

            let pdf = response.bytes().await?;
            if pdf.is_empty() {
                return Err(PdfError::Empty);
            }

            debug!("PDF service returned {} bytes", pdf.len());
            return Ok(pdf);
        }

        Err(last_error.unwrap_or(PdfError::Service {
            status: 503,
            message: format!("gave up after {MAX_RETRIES} attempts"),
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
