pub mod error;
pub mod orchestrator;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::AuthError;
pub use orchestrator::{AuthOrchestrator, PasswordResetPolicy};
pub use use_cases::{
    AuthSession, ForgotPasswordUseCase, LoginRequest, LoginUseCase, PasswordResetOutcome,
    RefreshTokenUseCase, ResetPasswordRequest, ResetPasswordUseCase, SignupRequest,
    SignupUseCase, TokenPair, UserProfile, messages,
};
