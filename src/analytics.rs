use std::time::Duration;

use reqwest::Client;

#[derive(serde::Serialize)]
struct PageViewBody<'a> {
    path: &'a str,
}

/// Fire-and-forget page view reporting.
///
/// Reports are dropped when no endpoint is configured.
#[derive(Clone)]
pub struct PageViewReporter {
    http_client: Client,
    endpoint: Option<String>,
}

impl PageViewReporter {
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Spawns the report in the background. Nothing is returned and failures
    /// are only logged.
    pub fn report(&self, path: &str) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };
        let http_client = self.http_client.clone();
        let path = path.to_owned();

        tokio::spawn(async move {
            if let Err(e) = send_page_view(&http_client, &endpoint, &path).await {
                tracing::warn!(detail = e.to_string(), "failed to report a page view");
            }
        });
    }
}

async fn send_page_view(
    http_client: &Client,
    endpoint: &str,
    path: &str,
) -> Result<(), reqwest::Error> {
    http_client
        .post(endpoint)
        .json(&PageViewBody { path })
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
