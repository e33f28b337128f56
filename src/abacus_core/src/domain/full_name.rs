use std::fmt;

use super::user::UserError;

const MAX_FULL_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(UserError::InvalidFullName(
                "Full name is required".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(UserError::InvalidFullName(format!(
                "Full name must be at most {MAX_FULL_NAME_LENGTH} characters"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<&str> for FullName {
    type Error = UserError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
