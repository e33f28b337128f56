use std::sync::{Arc, Mutex};

use abacus_adapters::{
    Argon2PasswordHasher, HashMapUserStore, JwtAuthConfig, JwtTokenService, config::test,
    http::ApiResponse,
};
use abacus_application::{AuthOrchestrator, PasswordResetPolicy};
use abacus_core::{Email, NotificationError, NotificationGateway, Username};
use abacus_service::AbacusService;
use async_trait::async_trait;
use secrecy::Secret;
use serde_json::Value;
use tokio::net::TcpListener;

pub const RESET_URL: &str = "http://localhost:3000/reset-password";

#[derive(Debug, Clone, PartialEq)]
pub enum SentEmail {
    Welcome { to: String },
    PasswordReset { to: String, token: String },
}

/// Records outgoing emails instead of delivering them.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_reset_token(&self) -> Option<String> {
        self.sent().into_iter().rev().find_map(|email| match email {
            SentEmail::PasswordReset { token, .. } => Some(token),
            SentEmail::Welcome { .. } => None,
        })
    }

    fn record(&self, email: SentEmail) -> Result<(), NotificationError> {
        if self.failing {
            return Err(NotificationError::Delivery("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotifier {
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        _username: &Username,
    ) -> Result<(), NotificationError> {
        self.record(SentEmail::Welcome {
            to: recipient.as_ref().to_string(),
        })
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        _username: &Username,
        reset_token: &str,
        _reset_url: &str,
    ) -> Result<(), NotificationError> {
        self.record(SentEmail::PasswordReset {
            to: recipient.as_ref().to_string(),
            token: reset_token.to_string(),
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub notifier: RecordingNotifier,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default()).await
    }

    pub async fn with_notifier(notifier: RecordingNotifier) -> Self {
        let token_service = JwtTokenService::new(JwtAuthConfig {
            jwt_secret: Secret::from(test::JWT_SECRET.to_string()),
            access_token_ttl_in_seconds: 900,
            refresh_token_ttl_in_seconds: 3_600,
            password_reset_token_ttl_in_seconds: 3_600,
        });
        let reset_policy =
            PasswordResetPolicy::new(RESET_URL.to_string(), chrono::Duration::hours(1));

        let auth = AuthOrchestrator::new(
            HashMapUserStore::new(),
            token_service,
            Argon2PasswordHasher,
            notifier.clone(),
            reset_policy,
        );

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());
        let router = AbacusService::new(auth).into_router(&[]);

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            notifier,
        }
    }

    pub async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/api/auth/signup",
            &serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
                "fullName": "Test User",
            }),
        )
        .await
    }

    pub async fn login(&self, username_or_email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/api/auth/login",
            &serde_json::json!({
                "usernameOrEmail": username_or_email,
                "password": password,
            }),
        )
        .await
    }
}

/// Status code plus decoded envelope.
pub async fn envelope(response: reqwest::Response) -> (u16, ApiResponse<Value>) {
    let status = response.status().as_u16();
    let body = response
        .json::<ApiResponse<Value>>()
        .await
        .expect("Response is not an envelope");
    (status, body)
}
