pub mod forgot_password;
pub mod login;
pub mod refresh_token;
pub mod reset_password;
pub mod session;
pub mod signup;

pub use forgot_password::ForgotPasswordUseCase;
pub use login::{LoginRequest, LoginUseCase};
pub use refresh_token::RefreshTokenUseCase;
pub use reset_password::{PasswordResetOutcome, ResetPasswordRequest, ResetPasswordUseCase};
pub use session::{AuthSession, TokenPair, UserProfile};
pub use signup::{SignupRequest, SignupUseCase};

/// Success messages returned alongside each flow's payload.
pub mod messages {
    pub const USER_REGISTERED: &str = "User registered successfully";
    pub const LOGIN_SUCCESSFUL: &str = "Login successful";
    pub const TOKEN_REFRESHED: &str = "Token refreshed successfully";
    pub const RESET_LINK_SENT: &str = "If the email exists, a password reset link has been sent";
    pub const PASSWORD_RESET: &str = "Password reset successfully";
}
