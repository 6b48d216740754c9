use serde::Deserialize;

#[derive(Deserialize)]
pub struct JoinWaitlistFormData {
    #[serde(default)]
    pub email: String,
}
