use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};

use super::schema;
use crate::{
    app::{error::AppResult, AppState, PageContent},
    config::LinkSettings,
    domain::waitlist::SignupForm,
};

/// Set by htmx on requests it issues itself.
const HX_REQUEST: &str = "HX-Request";

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate<'a> {
    form: &'a SignupForm,
    links: &'a LinkSettings,
    analytics_script: Option<&'a str>,
}

impl<'a> HomeTemplate<'a> {
    fn new(form: &'a SignupForm, page: &'a PageContent) -> Self {
        Self {
            form,
            links: &page.links,
            analytics_script: page.analytics_script.as_deref(),
        }
    }
}

/// The signup panel alone, swapped in place by htmx.
#[derive(Template)]
#[template(path = "signup.html")]
struct SignupTemplate<'a> {
    form: &'a SignupForm,
}

#[tracing::instrument(name = "Home page", skip(state))]
pub async fn home_page(State(state): State<AppState>) -> Response {
    state.analytics.report("/");

    let form = SignupForm::new();
    HomeTemplate::new(&form, &state.page).into_response()
}

#[tracing::instrument(name = "Join the waitlist", skip(state, headers, body))]
pub async fn join_waitlist(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(body): Form<schema::JoinWaitlistFormData>,
) -> AppResult<Response> {
    let mut form = SignupForm::new();
    form.update_email(body.email);

    if let Err(e) = form.submit(&state.waitlist).await {
        tracing::debug!(detail = %e, "nothing to submit");
    }

    if headers.contains_key(HX_REQUEST) {
        let panel = SignupTemplate { form: &form }
            .render()
            .context("Failed to render the signup panel.")?;
        return Ok(Html(panel).into_response());
    }

    Ok(HomeTemplate::new(&form, &state.page).into_response())
}
