use std::{io, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{http::Request, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    analytics::PageViewReporter,
    config::{LinkSettings, Settings},
    store::WaitlistBackend,
};

mod api;
mod error;
mod ui;

#[derive(Clone)]
pub struct AppState {
    waitlist: WaitlistBackend,
    analytics: PageViewReporter,
    page: Arc<PageContent>,
}

/// Configured pieces of the landing page that do not change per request.
pub struct PageContent {
    links: LinkSettings,
    analytics_script: Option<String>,
}

fn app_router() -> Router<AppState> {
    api::router()
        .merge(ui::router())
        .fallback(ui::not_found::not_found_page)
}

pub struct App {
    listener: TcpListener,
    state: AppState,
}

impl App {
    pub async fn with(config: Settings) -> anyhow::Result<Self> {
        let waitlist = WaitlistBackend::from_settings(&config.waitlist)
            .context("Failed to build the waitlist store client.")?;
        let analytics =
            PageViewReporter::new(config.analytics.endpoint.clone(), config.analytics.timeout())
                .context("Failed to build the analytics client.")?;

        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .context("The listener should be able to bind the address.")?;

        Ok(Self {
            listener,
            state: AppState {
                waitlist,
                analytics,
                page: Arc::new(PageContent {
                    links: config.links,
                    analytics_script: config.analytics.script_src,
                }),
            },
        })
    }

    pub fn host(&self) -> IpAddr {
        self.listener
            .local_addr()
            .expect("A bound listener should have a local address.")
            .ip()
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .expect("A bound listener should have a local address.")
            .port()
    }

    pub async fn serve(self) -> Result<(), io::Error> {
        let app = app_router().with_state(self.state).layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "request",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    %id,
                )
            }),
        );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
