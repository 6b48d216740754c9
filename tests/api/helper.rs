use once_cell::sync::Lazy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::Secret;
use tracing_subscriber::util::SubscriberInitExt;
use waitlist::{
    app::App,
    config::{get_configuration, StoreSettings},
    telemetry::get_subscriber,
};
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "waitlist=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

pub const STORE_PATH: &str = "/rest/v1/waitlist";
pub const ANALYTICS_PATH: &str = "/analytics";

pub struct TestApp {
    pub addr: String,
    /// Plays both the waitlist store and the analytics collector.
    pub mock_server: MockServer,
}

impl TestApp {
    pub async fn get_home_page(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/", &self.addr))
            .send()
            .await
            .expect("The request should succeed.")
    }

    /// `body` is already form-urlencoded.
    pub async fn post_waitlist_form(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/waitlist", &self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_owned())
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_waitlist_form_with_htmx(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/waitlist", &self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("HX-Request", "true")
            .body(body.to_owned())
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_waitlist_json(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/waitlist", &self.addr))
            .json(&body)
            .send()
            .await
            .expect("The request should succeed.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn(true).await
}

/// The waitlist store is left unconfigured, so submissions are simulated.
pub async fn spawn_app_without_store() -> TestApp {
    spawn(false).await
}

async fn spawn(with_store: bool) -> TestApp {
    Lazy::force(&TRACING);

    let mock_server = MockServer::start().await;
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.host = "127.0.0.1".to_string();
    config.application.port = 0;
    config.waitlist.simulated_delay_milliseconds = 10;
    config.waitlist.store = with_store.then(|| StoreSettings {
        base_url: mock_server.uri(),
        api_key: Secret::new("test-api-key".to_string()),
        table: "waitlist".to_string(),
        timeout_milliseconds: 200,
    });
    config.analytics.script_src = None;
    config.analytics.endpoint = Some(format!("{}{}", mock_server.uri(), ANALYTICS_PATH));

    let app = App::with(config)
        .await
        .expect("The application should be built.");

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port()),
        mock_server,
    };

    let _ = tokio::spawn(async move { app.serve().await.expect("The server should be running") });

    test_app
}

pub fn get_client() -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
