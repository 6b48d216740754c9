pub mod email;
pub mod form;

pub use self::email::Email;
pub use self::form::{SignupForm, SubmissionState};
