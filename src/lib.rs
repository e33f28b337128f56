//! # Abacus - Calculator and Authentication Backend
//!
//! Facade crate that re-exports the public APIs of the Abacus components, so
//! embedders can depend on a single crate.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `User`, `Calculation`
//! - **Ports**: `UserStore`, `TokenService`, `PasswordHasher`, `NotificationGateway`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `RefreshTokenUseCase`, etc.
//! - **Adapters**: `JwtTokenService`, `Argon2PasswordHasher`, `PostgresUserStore`,
//!   `BrevoNotificationGateway`, etc.
//! - **Service**: `AbacusService`, the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use abacus_core::*;
}

pub use abacus_core::{
    Calculation, CalculationError, Email, FullName, Operation, Password, User, UserError,
    Username, calculate,
};

// ============================================================================
// Ports
// ============================================================================

pub use abacus_core::{
    NotificationGateway, PasswordHasher, TokenService, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use abacus_application::*;
}

pub use abacus_application::{
    AuthError, AuthOrchestrator, ForgotPasswordUseCase, LoginUseCase, PasswordResetPolicy,
    RefreshTokenUseCase, ResetPasswordUseCase, SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers and response envelope
    pub mod http {
        pub use abacus_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use abacus_adapters::persistence::*;
    }

    /// Email gateways
    pub mod email {
        pub use abacus_adapters::email::*;
    }

    /// JWT token service
    pub mod auth {
        pub use abacus_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use abacus_adapters::config::*;
    }
}

pub use abacus_adapters::{
    Argon2PasswordHasher, BrevoNotificationGateway, ConfiguredNotificationGateway,
    HashMapUserStore, JwtTokenService, LoggingNotificationGateway, PostgresUserStore,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use abacus_service::{AbacusService, auth_from_settings, configure_postgresql};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
