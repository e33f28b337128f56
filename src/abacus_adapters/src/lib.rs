pub mod auth;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;

pub use auth::{Claims, JwtAuthConfig, JwtTokenService, TokenPurpose};
pub use email::{
    BrevoNotificationGateway, ConfiguredNotificationGateway, LoggingNotificationGateway,
};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{HashMapUserStore, PostgresUserStore};
