pub mod env {
    /// Environment overrides look like `ABACUS__AUTH__JWT__SECRET`.
    pub const ENV_PREFIX: &str = "ABACUS";
    pub const ENV_SEPARATOR: &str = "__";
    pub const CONFIG_FILE: &str = "config/default";
}

pub mod defaults {
    pub const APP_ADDRESS: &str = "0.0.0.0:8080";
    pub const APP_NAME: &str = "Abacus";
    pub const ACCESS_TOKEN_TTL_IN_SECONDS: i64 = 86_400;
    pub const REFRESH_TOKEN_TTL_IN_SECONDS: i64 = 604_800;
    pub const PASSWORD_RESET_URL: &str = "http://localhost:3000/reset-password";
    pub const PASSWORD_RESET_TOKEN_TTL_IN_SECONDS: i64 = 3_600;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;

    pub mod email_client {
        pub const PROVIDER: &str = "logging";
        pub const BASE_URL: &str = "https://api.brevo.com";
        pub const SENDER_EMAIL: &str = "noreply@example.com";
        pub const SENDER_NAME: &str = "Abacus";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";
}
