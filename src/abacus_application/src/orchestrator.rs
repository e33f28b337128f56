use abacus_core::{Email, NotificationGateway, PasswordHasher, TokenService, UserStore};
use chrono::Duration;

use crate::{
    error::AuthError,
    use_cases::{
        AuthSession, ForgotPasswordUseCase, LoginRequest, LoginUseCase, PasswordResetOutcome,
        RefreshTokenUseCase, ResetPasswordRequest, ResetPasswordUseCase, SignupRequest,
        SignupUseCase,
    },
};

/// Where reset links point and how long a reset token stays usable.
#[derive(Debug, Clone)]
pub struct PasswordResetPolicy {
    pub reset_url: String,
    pub token_ttl: Duration,
}

impl PasswordResetPolicy {
    pub fn new(reset_url: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            reset_url: reset_url.into(),
            token_ttl,
        }
    }

    pub fn reset_link(&self, reset_token: &str) -> String {
        format!("{}?token={}", self.reset_url, reset_token)
    }
}

/// Entry point for every authentication flow. Owns the collaborators and
/// hands out borrowed use cases per call.
#[derive(Clone)]
pub struct AuthOrchestrator<U, T, H, N>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
    N: NotificationGateway,
{
    user_store: U,
    token_service: T,
    password_hasher: H,
    notifier: N,
    reset_policy: PasswordResetPolicy,
}

impl<U, T, H, N> AuthOrchestrator<U, T, H, N>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
    N: NotificationGateway,
{
    pub fn new(
        user_store: U,
        token_service: T,
        password_hasher: H,
        notifier: N,
        reset_policy: PasswordResetPolicy,
    ) -> Self {
        Self {
            user_store,
            token_service,
            password_hasher,
            notifier,
            reset_policy,
        }
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    pub fn token_service(&self) -> &T {
        &self.token_service
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<AuthSession, AuthError> {
        SignupUseCase::new(
            &self.user_store,
            &self.token_service,
            &self.password_hasher,
            &self.notifier,
        )
        .execute(request)
        .await
        .inspect_err(|e| log_failure("signup", e))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        LoginUseCase::new(&self.user_store, &self.token_service, &self.password_hasher)
            .execute(request)
            .await
            .inspect_err(|e| log_failure("login", e))
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        RefreshTokenUseCase::new(&self.user_store, &self.token_service)
            .execute(refresh_token)
            .await
            .inspect_err(|e| log_failure("refresh", e))
    }

    pub async fn forgot_password(&self, email: &Email) -> Result<&'static str, AuthError> {
        ForgotPasswordUseCase::new(
            &self.user_store,
            &self.token_service,
            &self.notifier,
            &self.reset_policy,
        )
        .execute(email)
        .await
        .inspect_err(|e| log_failure("forgot_password", e))
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<PasswordResetOutcome, AuthError> {
        ResetPasswordUseCase::new(&self.user_store, &self.token_service, &self.password_hasher)
            .execute(request)
            .await
            .inspect_err(|e| log_failure("reset_password", e))
    }
}

fn log_failure(flow: &'static str, error: &AuthError) {
    if error.is_unexpected() {
        tracing::error!(flow, %error, "Authentication flow failed");
    } else {
        tracing::info!(flow, %error, "Authentication flow rejected");
    }
}
