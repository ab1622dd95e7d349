//! HTTP webhook delivery of submission payloads.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::{payload::WebhookPayload, Notifier};
use crate::error::{ConfiguratorError, Result};

/// Default time to wait for the automation endpoint.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts payloads as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfiguratorError::Configuration {
                message: format!("Webhook URL must be http(s): {url}"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("configurator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfiguratorError::notification)?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, payload: &WebhookPayload) -> Result<()> {
        debug!(
            "Posting submission {} to webhook {}",
            payload.submission_id, self.url
        );
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(ConfiguratorError::notification)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfiguratorError::notification(format!(
                "Webhook responded with {status}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::models::{
        Answers, AppointmentSelection, ConfiguratorSchema, ContactInfo, Submission,
        SubmissionStatus,
    };

    fn payload() -> WebhookPayload {
        let schema = ConfiguratorSchema::new(1, "carport", "Carport", vec![]);
        let submission = Submission {
            id: 42,
            configurator_id: 1,
            answers: Answers::new(),
            contact: ContactInfo::new("Ann", "ann@example.com", "0612345678"),
            appointment: AppointmentSelection::none(),
            status: SubmissionStatus::New,
            locale: "en".to_string(),
            submitted_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        WebhookPayload::build(&schema, &submission)
    }

    /// Accepts one connection, answers with `status_line` and returns the
    /// raw request.
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 4096];
            loop {
                let n = stream.read(&mut buffer).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + length
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = WebhookNotifier::new("ftp://example.com/hook", DEFAULT_WEBHOOK_TIMEOUT);
        assert!(matches!(result, Err(ConfiguratorError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_posts_json_payload() {
        let (url, server) = serve_once("204 No Content").await;
        let notifier = WebhookNotifier::new(url, DEFAULT_WEBHOOK_TIMEOUT).unwrap();

        notifier.notify(&payload()).await.expect("delivery should succeed");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /hook HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains("\"event\":\"configurator.submission\""));
        assert!(request.contains("\"submissionId\":42"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (url, server) = serve_once("500 Internal Server Error").await;
        let notifier = WebhookNotifier::new(url, DEFAULT_WEBHOOK_TIMEOUT).unwrap();

        let result = notifier.notify(&payload()).await;
        assert!(matches!(result, Err(ConfiguratorError::Notification { .. })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        drop(listener);

        let notifier = WebhookNotifier::new(url, Duration::from_secs(2)).unwrap();
        let result = notifier.notify(&payload()).await;
        assert!(matches!(result, Err(ConfiguratorError::Notification { .. })));
    }
}
