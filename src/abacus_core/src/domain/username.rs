use std::{fmt, sync::LazyLock};

use regex::Regex;

use super::user::UserError;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username regex is valid"));

/// Login handle chosen at signup. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(UserError::InvalidUsername(
                "Username is required".to_string(),
            ));
        }
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
            return Err(UserError::InvalidUsername(format!(
                "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if !USERNAME_REGEX.is_match(trimmed) {
            return Err(UserError::InvalidUsername(
                "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<&str> for Username {
    type Error = UserError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
