use axum::{extract::State, Json};

use super::schema;
use crate::{
    app::{
        error::{AppError, AppResult},
        AppState,
    },
    domain::waitlist::SignupForm,
};

#[tracing::instrument(name = "Join the waitlist through the API", skip(state, body))]
pub async fn join_waitlist(
    State(state): State<AppState>,
    Json(body): Json<schema::JoinWaitlistRequestBody>,
) -> AppResult<Json<schema::JoinWaitlistResponseBody>> {
    let mut form = SignupForm::new();
    form.update_email(body.email);

    form.submit(&state.waitlist)
        .await
        .map_err(AppError::ValidationError)?;

    Ok(Json(schema::JoinWaitlistResponseBody {
        submitted: form.is_submitted(),
    }))
}
