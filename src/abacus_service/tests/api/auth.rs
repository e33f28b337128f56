use abacus_adapters::http::ResponseStatus;
use serde_json::json;

use crate::helpers::{RecordingNotifier, SentEmail, TestApp, envelope};

#[tokio::test]
async fn signup_returns_tokens_and_profile() {
    let app = TestApp::new().await;

    let (status, body) = envelope(app.signup("alice", "alice@x.com", "secret1").await).await;

    assert_eq!(status, 200);
    assert_eq!(body.status, ResponseStatus::Success);
    assert_eq!(body.message, "User registered successfully");
    assert_eq!(body.path, "/api/auth/signup");

    let data = body.data.unwrap();
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["refreshToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["type"], "Bearer");
    assert_eq!(data["username"], "alice");
    assert_eq!(data["email"], "alice@x.com");
    assert_eq!(data["fullName"], "Test User");

    assert_eq!(
        app.notifier.sent(),
        vec![SentEmail::Welcome {
            to: "alice@x.com".to_string()
        }]
    );
}

#[tokio::test]
async fn signup_rejects_duplicate_username_and_email() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;

    let (status, body) = envelope(app.signup("alice", "other@x.com", "secret1").await).await;
    assert_eq!(status, 400);
    assert_eq!(body.status, ResponseStatus::Error);
    assert_eq!(body.message, "Username already exists");
    assert_eq!(body.errors, Some(vec!["Username already exists".to_string()]));

    let (status, body) = envelope(app.signup("bob", "alice@x.com", "secret1").await).await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Email already exists");
}

#[tokio::test]
async fn signup_reports_every_invalid_field() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/auth/signup",
            &json!({ "username": "al", "email": "not-an-email", "password": "123" }),
        )
        .await;
    let (status, body) = envelope(response).await;

    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
    assert!(body.data.is_none());
    let errors = body.errors.unwrap();
    assert_eq!(errors.len(), 4);
    assert!(errors.iter().any(|e| e.starts_with("username:")));
    assert!(errors.iter().any(|e| e.starts_with("email:")));
    assert!(errors.iter().any(|e| e.starts_with("password:")));
    assert!(errors.iter().any(|e| e.starts_with("fullName:")));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let (status, body) = envelope(app.post_raw("/api/auth/login", "{ not json").await).await;

    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
    assert_eq!(body.path, "/api/auth/login");
}

#[tokio::test]
async fn signup_succeeds_when_welcome_email_fails() {
    let app = TestApp::with_notifier(RecordingNotifier::failing()).await;

    let (status, body) = envelope(app.signup("alice", "alice@x.com", "secret1").await).await;

    assert_eq!(status, 200);
    assert_eq!(body.status, ResponseStatus::Success);
}

#[tokio::test]
async fn login_by_username_or_email() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;

    let (status, body) = envelope(app.login("alice", "secret1").await).await;
    assert_eq!(status, 200);
    assert_eq!(body.message, "Login successful");

    let (status, body) = envelope(app.login("alice@x.com", "secret1").await).await;
    assert_eq!(status, 200);
    assert_eq!(body.data.unwrap()["username"], "alice");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;

    let (wrong_password_status, wrong_password) =
        envelope(app.login("alice", "wrong-password").await).await;
    let (unknown_user_status, unknown_user) =
        envelope(app.login("nobody", "secret1").await).await;

    assert_eq!(wrong_password_status, 400);
    assert_eq!(unknown_user_status, 400);
    assert_eq!(wrong_password.message, "Invalid username/email or password");
    assert_eq!(wrong_password.message, unknown_user.message);
}

#[tokio::test]
async fn refresh_rotates_the_refresh_token() {
    let app = TestApp::new().await;
    let (_, signed_up) = envelope(app.signup("alice", "alice@x.com", "secret1").await).await;
    let first_refresh = signed_up.data.unwrap()["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = envelope(
        app.post("/api/auth/refresh", &json!({ "refreshToken": first_refresh }))
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body.message, "Token refreshed successfully");
    let second_refresh = body.data.unwrap()["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first_refresh, second_refresh);

    // The superseded token no longer works.
    let (status, body) = envelope(
        app.post("/api/auth/refresh", &json!({ "refreshToken": first_refresh }))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Invalid refresh token");

    let (status, _) = envelope(
        app.post("/api/auth/refresh", &json!({ "refreshToken": second_refresh }))
            .await,
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn refresh_rejects_garbage_and_missing_tokens() {
    let app = TestApp::new().await;

    let (status, body) = envelope(
        app.post("/api/auth/refresh", &json!({ "refreshToken": "garbage" }))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Invalid refresh token");

    let (status, body) = envelope(app.post("/api/auth/refresh", &json!({})).await).await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
}

#[tokio::test]
async fn access_token_is_not_accepted_as_refresh_token() {
    let app = TestApp::new().await;
    let (_, signed_up) = envelope(app.signup("alice", "alice@x.com", "secret1").await).await;
    let access_token = signed_up.data.unwrap()["token"].as_str().unwrap().to_string();

    let (status, body) = envelope(
        app.post("/api/auth/refresh", &json!({ "refreshToken": access_token }))
            .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body.message, "Invalid refresh token");
}

#[tokio::test]
async fn forgot_password_response_does_not_reveal_accounts() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;

    let (known_status, known) = envelope(
        app.post("/api/auth/forgot-password", &json!({ "email": "alice@x.com" }))
            .await,
    )
    .await;
    let (unknown_status, unknown) = envelope(
        app.post("/api/auth/forgot-password", &json!({ "email": "nobody@x.com" }))
            .await,
    )
    .await;

    assert_eq!(known_status, 200);
    assert_eq!(unknown_status, 200);
    assert_eq!(known.message, unknown.message);
    assert_eq!(
        known.message,
        "If the email exists, a password reset link has been sent"
    );
    let data = known.data.unwrap();
    assert!(data["token"].is_null());
    assert!(data["username"].is_null());

    let resets: Vec<_> = app
        .notifier
        .sent()
        .into_iter()
        .filter(|email| matches!(email, SentEmail::PasswordReset { .. }))
        .collect();
    assert_eq!(resets.len(), 1);
}

#[tokio::test]
async fn forgot_password_succeeds_when_email_delivery_fails() {
    let app = TestApp::with_notifier(RecordingNotifier::failing()).await;
    app.signup("alice", "alice@x.com", "secret1").await;

    let (status, body) = envelope(
        app.post("/api/auth/forgot-password", &json!({ "email": "alice@x.com" }))
            .await,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body.status, ResponseStatus::Success);
}

#[tokio::test]
async fn reset_password_flow() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;
    app.post("/api/auth/forgot-password", &json!({ "email": "alice@x.com" }))
        .await;
    let reset_token = app.notifier.last_reset_token().unwrap();

    let (status, body) = envelope(
        app.post(
            "/api/auth/reset-password",
            &json!({
                "resetToken": reset_token,
                "newPassword": "newSecret1",
                "confirmPassword": "newSecret1",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body.message, "Password reset successfully");
    let data = body.data.unwrap();
    assert!(data["token"].is_null());
    assert_eq!(data["username"], "alice");

    let (status, _) = envelope(app.login("alice", "secret1").await).await;
    assert_eq!(status, 400);
    let (status, _) = envelope(app.login("alice", "newSecret1").await).await;
    assert_eq!(status, 200);

    // A reset token works once.
    let (status, body) = envelope(
        app.post(
            "/api/auth/reset-password",
            &json!({
                "resetToken": reset_token,
                "newPassword": "another1",
                "confirmPassword": "another1",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Invalid or expired reset token");
}

#[tokio::test]
async fn reset_password_rejects_mismatched_confirmation() {
    let app = TestApp::new().await;
    app.signup("alice", "alice@x.com", "secret1").await;
    app.post("/api/auth/forgot-password", &json!({ "email": "alice@x.com" }))
        .await;
    let reset_token = app.notifier.last_reset_token().unwrap();

    let (status, body) = envelope(
        app.post(
            "/api/auth/reset-password",
            &json!({
                "resetToken": reset_token,
                "newPassword": "newSecret1",
                "confirmPassword": "different1",
            }),
        )
        .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body.message, "Passwords do not match");

    let (status, _) = envelope(app.login("alice", "secret1").await).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn auth_health_check() {
    let app = TestApp::new().await;

    let (status, body) = envelope(app.get("/api/auth/health").await).await;

    assert_eq!(status, 200);
    assert_eq!(body.message, "Authentication API is running!");
    assert!(body.data.is_none());
}
