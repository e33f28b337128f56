pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    calculation::{Calculation, CalculationError, OPERAND_LIMIT, Operation, calculate},
    email::Email,
    full_name::FullName,
    password::{HashedPassword, Password},
    user::{NewUser, Role, User, UserError, UserId, UserParts},
    username::Username,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{
        HashError, NotificationError, NotificationGateway, PasswordHasher, TokenError,
        TokenService,
    },
};
