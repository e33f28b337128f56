pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AbacusSettings, AppSettings, AuthSettings, EmailClientSettings, EmailProvider, JwtSettings,
    PasswordResetSettings, PostgresSettings,
};
