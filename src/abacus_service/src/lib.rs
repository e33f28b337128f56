pub mod abacus_service;
pub mod helpers;
pub mod tracing;

pub use abacus_service::AbacusService;
pub use helpers::{AuthComponents, SetupError, auth_from_settings, configure_postgresql};
