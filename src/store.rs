use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::{config::WaitlistSettings, domain::waitlist::Email};

/// REST client for the hosted table receiving signups.
///
/// Speaks the PostgREST dialect: one `POST /rest/v1/{table}` per row, keyed
/// by the project API key.
#[derive(Clone)]
pub struct WaitlistClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    table: String,
}

#[derive(serde::Serialize)]
struct InsertRowBody<'a> {
    email: &'a str,
}

impl WaitlistClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        table: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            table,
        })
    }

    #[tracing::instrument(
        name = "Insert email into the waitlist store",
        skip(self, email),
        fields(table = %self.table)
    )]
    pub async fn insert(&self, email: &Email) -> Result<(), reqwest::Error> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);

        self.http_client
            .post(&url)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&InsertRowBody {
                email: email.as_ref(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Where a submitted email ends up.
///
/// Deployments without store credentials fall back to a fixed delay so the
/// form behaves the same way.
#[derive(Clone)]
pub enum WaitlistBackend {
    Store(WaitlistClient),
    Simulated(Duration),
}

impl WaitlistBackend {
    pub fn from_settings(settings: &WaitlistSettings) -> Result<Self, reqwest::Error> {
        match &settings.store {
            Some(store) => Ok(Self::Store(WaitlistClient::new(
                store.base_url.clone(),
                store.api_key.clone(),
                store.table.clone(),
                store.timeout(),
            )?)),
            None => Ok(Self::Simulated(settings.simulated_delay())),
        }
    }

    /// Persists `email`. Store failures are logged and dropped.
    pub async fn record(&self, email: &Email) {
        match self {
            Self::Store(client) => {
                if let Err(e) = client.insert(email).await {
                    tracing::error!(
                        detail = e.to_string(),
                        "failed to add an email to the waitlist"
                    );
                }
            }
            Self::Simulated(delay) => {
                tracing::debug!(?delay, "no waitlist store configured, simulating the insert");
                tokio::time::sleep(*delay).await;
            }
        }
    }
}
