use derive_more::Display;

/// An address typed into the signup form.
///
/// Only presence is checked. The format is left to the browser's
/// `type="email"` input constraint.
#[derive(Debug, Clone, Display)]
#[display(fmt = "{}", _0)]
pub struct Email(String);

impl TryFrom<String> for Email {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err("email is empty".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
