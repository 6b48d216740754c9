use super::Email;
use crate::store::WaitlistBackend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Editing,
    /// Terminal. The confirmation panel replaces the form.
    Submitted,
}

/// The email capture form of the landing page.
#[derive(Debug, Default)]
pub struct SignupForm {
    email: String,
    state: SubmissionState,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SubmissionState::Submitted
    }

    /// Records the current email and moves to [`SubmissionState::Submitted`].
    ///
    /// An empty email leaves the form untouched and reaches no backend.
    /// Otherwise the outcome of the insert does not matter: the form always
    /// ends up submitted with its email cleared.
    #[tracing::instrument(
        name = "Submit signup form",
        skip(self, backend),
        fields(email = %self.email)
    )]
    pub async fn submit(&mut self, backend: &WaitlistBackend) -> Result<(), String> {
        let email = Email::try_from(self.email.clone())?;

        backend.record(&email).await;

        self.email.clear();
        self.state = SubmissionState::Submitted;
        Ok(())
    }
}
