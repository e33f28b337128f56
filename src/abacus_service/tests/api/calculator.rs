use abacus_adapters::http::ResponseStatus;
use serde_json::json;

use crate::helpers::{TestApp, envelope};

#[tokio::test]
async fn each_operation_returns_its_result() {
    let app = TestApp::new().await;
    let cases = [
        ("/api/calculator/add", 15.0, "addition", "Addition completed successfully"),
        ("/api/calculator/subtract", 5.0, "subtraction", "Subtraction completed successfully"),
        ("/api/calculator/multiply", 50.0, "multiplication", "Multiplication completed successfully"),
        ("/api/calculator/divide", 2.0, "division", "Division completed successfully"),
    ];

    for (path, expected, operation, message) in cases {
        let (status, body) =
            envelope(app.post(path, &json!({ "number1": 10, "number2": 5 })).await).await;

        assert_eq!(status, 200, "{path}");
        assert_eq!(body.status, ResponseStatus::Success);
        assert_eq!(body.message, message);
        assert_eq!(body.path, path);

        let data = body.data.unwrap();
        assert_eq!(data["result"].as_f64(), Some(expected));
        assert_eq!(data["operation"], operation);
        assert_eq!(data["message"], "Calculation completed successfully");
    }
}

#[tokio::test]
async fn division_by_zero_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = envelope(
        app.post("/api/calculator/divide", &json!({ "number1": 10, "number2": 0 }))
            .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body.status, ResponseStatus::Error);
    assert_eq!(body.message, "Division by zero is not allowed");
    assert_eq!(
        body.errors,
        Some(vec!["Division by zero is not allowed".to_string()])
    );
}

#[tokio::test]
async fn missing_and_out_of_range_operands_fail_validation() {
    let app = TestApp::new().await;

    let (status, body) =
        envelope(app.post("/api/calculator/add", &json!({ "number1": 1 })).await).await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
    assert_eq!(body.errors, Some(vec!["number2: Number2 is required".to_string()]));

    let (status, body) = envelope(
        app.post(
            "/api/calculator/multiply",
            &json!({ "number1": 1_000_000_000.0, "number2": 2 }),
        )
        .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
    assert_eq!(
        body.errors,
        Some(vec![
            "number1: number1 must be between -999999999 and 999999999".to_string()
        ])
    );
}

#[tokio::test]
async fn add_accepts_query_parameters() {
    let app = TestApp::new().await;

    let (status, body) = envelope(app.get("/api/calculator/add?number1=2.5&number2=4").await).await;

    assert_eq!(status, 200);
    assert_eq!(body.path, "/api/calculator/add");
    assert_eq!(body.data.unwrap()["result"].as_f64(), Some(6.5));

    let (status, body) = envelope(app.get("/api/calculator/add?number1=abc&number2=4").await).await;
    assert_eq!(status, 400);
    assert_eq!(body.message, "Validation failed");
}

#[tokio::test]
async fn calculator_health_check() {
    let app = TestApp::new().await;

    let (status, body) = envelope(app.get("/api/calculator/health").await).await;

    assert_eq!(status, 200);
    assert_eq!(body.message, "Calculator API is running!");
}
