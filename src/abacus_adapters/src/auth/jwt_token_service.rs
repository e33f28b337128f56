use abacus_core::{Email, TokenError, TokenService, User, Username};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
    pub password_reset_token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }

    fn ttl_for(&self, purpose: TokenPurpose) -> i64 {
        match purpose {
            TokenPurpose::Access => self.access_token_ttl_in_seconds,
            TokenPurpose::Refresh => self.refresh_token_ttl_in_seconds,
            TokenPurpose::PasswordReset => self.password_reset_token_ttl_in_seconds,
        }
    }
}

/// What a token may be used for. A token is only accepted for its own purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Access,
    Refresh,
    PasswordReset,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Random per token, so two tokens issued in the same second still differ.
    pub jti: String,
    pub purpose: TokenPurpose,
}

/// HS256 tokens signed with a single shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtAuthConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }

    fn generate_token(&self, subject: &str, purpose: TokenPurpose) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.ttl_for(purpose)).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
            purpose,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
    }

    /// Checks signature and expiry, then that the token was issued for one of
    /// `accepted` purposes.
    pub fn decode_claims(
        &self,
        token: &str,
        accepted: &[TokenPurpose],
    ) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::InvalidToken
        })?
        .claims;

        if !accepted.contains(&claims.purpose) {
            tracing::debug!(purpose = ?claims.purpose, "Token used for the wrong purpose");
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}

const SESSION_PURPOSES: &[TokenPurpose] = &[TokenPurpose::Access, TokenPurpose::Refresh];

impl TokenService for JwtTokenService {
    fn issue_access_token(&self, username: &Username) -> Result<String, TokenError> {
        self.generate_token(username.as_str(), TokenPurpose::Access)
    }

    fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        self.generate_token(user.username().as_str(), TokenPurpose::Refresh)
    }

    fn issue_password_reset_token(&self, email: &Email) -> Result<String, TokenError> {
        self.generate_token(email.as_str(), TokenPurpose::PasswordReset)
    }

    fn extract_username(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token, SESSION_PURPOSES)
            .map(|claims| claims.sub)
    }

    fn extract_email(&self, reset_token: &str) -> Result<String, TokenError> {
        self.decode_claims(reset_token, &[TokenPurpose::PasswordReset])
            .map(|claims| claims.sub)
    }

    fn is_valid(&self, token: &str, user: &User) -> bool {
        self.decode_claims(token, SESSION_PURPOSES)
            .is_ok_and(|claims| claims.sub == user.username().as_str())
    }

    fn is_reset_token_valid(&self, token: &str) -> bool {
        self.decode_claims(token, &[TokenPurpose::PasswordReset])
            .is_ok()
    }
}
