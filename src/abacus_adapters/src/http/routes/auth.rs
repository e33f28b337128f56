use std::sync::Arc;

use abacus_application::{
    AuthOrchestrator, AuthSession, LoginRequest, PasswordResetOutcome, ResetPasswordRequest,
    SignupRequest,
};
use abacus_core::{
    Email, FullName, NotificationGateway, Password, PasswordHasher, TokenService, UserStore,
    Username,
};
use axum::extract::{OriginalUri, State};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::http::{
    envelope::ApiResponse,
    error::{ApiError, ApiFailure},
    extract::{ValidateRequest, ValidatedJson, Violations},
};

pub const AUTH_HEALTH_MESSAGE: &str = "Authentication API is running!";
const TOKEN_TYPE: &str = "Bearer";

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const TOKEN_REFRESH_FAILED: &str = "Token refresh failed";
const PASSWORD_RESET_FAILED: &str = "Password reset failed";
const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";

type AuthState<U, T, H, N> = State<Arc<AuthOrchestrator<U, T, H, N>>>;

/// Response body shared by every auth endpoint. Fields a flow does not
/// produce are serialized as `null`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseBody {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub message: String,
}

impl From<AuthSession> for AuthResponseBody {
    fn from(session: AuthSession) -> Self {
        Self {
            token: Some(session.tokens.access_token),
            refresh_token: Some(session.tokens.refresh_token),
            token_type: TOKEN_TYPE.to_string(),
            username: Some(session.profile.username),
            email: Some(session.profile.email),
            full_name: Some(session.profile.full_name),
            message: session.message.to_string(),
        }
    }
}

impl From<PasswordResetOutcome> for AuthResponseBody {
    fn from(outcome: PasswordResetOutcome) -> Self {
        Self {
            token: None,
            refresh_token: None,
            token_type: TOKEN_TYPE.to_string(),
            username: Some(outcome.profile.username),
            email: Some(outcome.profile.email),
            full_name: Some(outcome.profile.full_name),
            message: outcome.message.to_string(),
        }
    }
}

impl AuthResponseBody {
    fn message_only(message: &str) -> Self {
        Self {
            token: None,
            refresh_token: None,
            token_type: TOKEN_TYPE.to_string(),
            username: None,
            email: None,
            full_name: None,
            message: message.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl ValidateRequest for SignupBody {
    type Validated = SignupRequest;

    fn validate(self) -> Result<SignupRequest, Vec<String>> {
        let mut violations = Violations::default();

        let username = violations.check_user(Username::try_from(self.username.unwrap_or_default()));
        let email = violations.check_user(Email::try_from(self.email.unwrap_or_default()));
        let password = violations.check_user(Password::try_from(
            self.password
                .unwrap_or_else(|| Secret::from(String::new())),
        ));
        let full_name = violations.check_user(FullName::try_from(self.full_name.unwrap_or_default()));

        match (username, email, password, full_name) {
            (Some(username), Some(email), Some(password), Some(full_name)) => Ok(SignupRequest {
                username,
                email,
                password,
                full_name,
            }),
            _ => Err(violations.into_errors()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[serde(default)]
    pub username_or_email: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

impl ValidateRequest for LoginBody {
    type Validated = LoginRequest;

    fn validate(self) -> Result<LoginRequest, Vec<String>> {
        let mut violations = Violations::default();

        let username_or_email = violations.require(
            "usernameOrEmail",
            self.username_or_email,
            "Username or email is required",
        );
        let password = violations
            .require(
                "password",
                self.password.map(|p| p.expose_secret().to_owned()),
                "Password is required",
            )
            .map(Secret::from);

        match (username_or_email, password) {
            (Some(username_or_email), Some(password)) => Ok(LoginRequest {
                username_or_email,
                password,
            }),
            _ => Err(violations.into_errors()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenBody {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl ValidateRequest for RefreshTokenBody {
    type Validated = String;

    fn validate(self) -> Result<String, Vec<String>> {
        let mut violations = Violations::default();
        violations
            .require("refreshToken", self.refresh_token, "Refresh token is required")
            .ok_or_else(|| violations.into_errors())
    }
}

#[derive(Deserialize)]
pub struct ForgotPasswordBody {
    #[serde(default)]
    pub email: Option<String>,
}

impl ValidateRequest for ForgotPasswordBody {
    type Validated = Email;

    fn validate(self) -> Result<Email, Vec<String>> {
        let mut violations = Violations::default();
        violations
            .check_user(Email::try_from(self.email.unwrap_or_default()))
            .ok_or_else(|| violations.into_errors())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    #[serde(default)]
    pub reset_token: Option<String>,
    #[serde(default)]
    pub new_password: Option<Secret<String>>,
    #[serde(default)]
    pub confirm_password: Option<Secret<String>>,
}

impl ValidateRequest for ResetPasswordBody {
    type Validated = ResetPasswordRequest;

    fn validate(self) -> Result<ResetPasswordRequest, Vec<String>> {
        let mut violations = Violations::default();

        let reset_token =
            violations.require("resetToken", self.reset_token, "Reset token is required");
        let new_password = violations.check(
            "newPassword",
            Password::try_from(
                self.new_password
                    .unwrap_or_else(|| Secret::from(String::new())),
            ),
        );
        let confirm_password = violations
            .require(
                "confirmPassword",
                self.confirm_password.map(|p| p.expose_secret().to_owned()),
                "Confirm password is required",
            )
            .map(Secret::from);

        match (reset_token, new_password, confirm_password) {
            (Some(reset_token), Some(new_password), Some(confirm_password)) => {
                Ok(ResetPasswordRequest {
                    reset_token,
                    new_password,
                    confirm_password,
                })
            }
            _ => Err(violations.into_errors()),
        }
    }
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, T, H, N>(
    State(auth): AuthState<U, T, H, N>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<SignupBody>,
) -> Result<ApiResponse<AuthResponseBody>, ApiFailure>
where
    U: UserStore + 'static,
    T: TokenService + 'static,
    H: PasswordHasher + 'static,
    N: NotificationGateway + 'static,
{
    let session = auth
        .signup(request)
        .await
        .map_err(|e| ApiError::from_auth(e, REGISTRATION_FAILED).at(uri.path()))?;

    let message = session.message;
    Ok(ApiResponse::success(
        AuthResponseBody::from(session),
        message,
        uri.path(),
    ))
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, T, H, N>(
    State(auth): AuthState<U, T, H, N>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<LoginBody>,
) -> Result<ApiResponse<AuthResponseBody>, ApiFailure>
where
    U: UserStore + 'static,
    T: TokenService + 'static,
    H: PasswordHasher + 'static,
    N: NotificationGateway + 'static,
{
    let session = auth
        .login(request)
        .await
        .map_err(|e| ApiError::from_auth(e, LOGIN_FAILED).at(uri.path()))?;

    let message = session.message;
    Ok(ApiResponse::success(
        AuthResponseBody::from(session),
        message,
        uri.path(),
    ))
}

#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U, T, H, N>(
    State(auth): AuthState<U, T, H, N>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(refresh_token): ValidatedJson<RefreshTokenBody>,
) -> Result<ApiResponse<AuthResponseBody>, ApiFailure>
where
    U: UserStore + 'static,
    T: TokenService + 'static,
    H: PasswordHasher + 'static,
    N: NotificationGateway + 'static,
{
    let session = auth
        .refresh(&refresh_token)
        .await
        .map_err(|e| ApiError::from_auth(e, TOKEN_REFRESH_FAILED).at(uri.path()))?;

    let message = session.message;
    Ok(ApiResponse::success(
        AuthResponseBody::from(session),
        message,
        uri.path(),
    ))
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, T, H, N>(
    State(auth): AuthState<U, T, H, N>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(email): ValidatedJson<ForgotPasswordBody>,
) -> Result<ApiResponse<AuthResponseBody>, ApiFailure>
where
    U: UserStore + 'static,
    T: TokenService + 'static,
    H: PasswordHasher + 'static,
    N: NotificationGateway + 'static,
{
    let message = auth
        .forgot_password(&email)
        .await
        .map_err(|e| ApiError::from_auth(e, GENERIC_FAILURE).at(uri.path()))?;

    Ok(ApiResponse::success(
        AuthResponseBody::message_only(message),
        message,
        uri.path(),
    ))
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, T, H, N>(
    State(auth): AuthState<U, T, H, N>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<ResetPasswordBody>,
) -> Result<ApiResponse<AuthResponseBody>, ApiFailure>
where
    U: UserStore + 'static,
    T: TokenService + 'static,
    H: PasswordHasher + 'static,
    N: NotificationGateway + 'static,
{
    let outcome = auth
        .reset_password(request)
        .await
        .map_err(|e| ApiError::from_auth(e, PASSWORD_RESET_FAILED).at(uri.path()))?;

    let message = outcome.message;
    Ok(ApiResponse::success(
        AuthResponseBody::from(outcome),
        message,
        uri.path(),
    ))
}

pub async fn auth_health(OriginalUri(uri): OriginalUri) -> ApiResponse<()> {
    ApiResponse::message_only(AUTH_HEALTH_MESSAGE, uri.path())
}
