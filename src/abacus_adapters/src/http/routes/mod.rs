pub mod auth;
pub mod calculator;

pub use auth::{
    AuthResponseBody, ForgotPasswordBody, LoginBody, RefreshTokenBody, ResetPasswordBody,
    SignupBody, auth_health, forgot_password, login, refresh_token, reset_password, signup,
};
pub use calculator::{
    CalculationBody, CalculationResponseBody, add, add_from_query, calculator_health, divide,
    multiply, subtract,
};
