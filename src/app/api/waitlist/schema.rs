use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct JoinWaitlistRequestBody {
    /// A missing field reads as an empty email.
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub struct JoinWaitlistResponseBody {
    pub submitted: bool,
}
