use abacus_core::{Calculation, Operation, calculate};
use axum::extract::{OriginalUri, Query};
use serde::{Deserialize, Serialize};

use crate::http::{
    envelope::ApiResponse,
    error::{ApiError, ApiFailure},
    extract::{ValidateRequest, ValidatedJson, Violations},
};

pub const CALCULATOR_HEALTH_MESSAGE: &str = "Calculator API is running!";
const CALCULATION_COMPLETED: &str = "Calculation completed successfully";

/// Operands of a binary operation, from a JSON body or a query string.
#[derive(Debug, Deserialize)]
pub struct CalculationBody {
    #[serde(default)]
    pub number1: Option<f64>,
    #[serde(default)]
    pub number2: Option<f64>,
}

impl ValidateRequest for CalculationBody {
    type Validated = (f64, f64);

    fn validate(self) -> Result<(f64, f64), Vec<String>> {
        let mut violations = Violations::default();
        let number1 = violations.check("number1", self.number1.ok_or("Number1 is required"));
        let number2 = violations.check("number2", self.number2.ok_or("Number2 is required"));

        match (number1, number2) {
            (Some(number1), Some(number2)) => Ok((number1, number2)),
            _ => Err(violations.into_errors()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculationResponseBody {
    pub number1: f64,
    pub number2: f64,
    pub result: f64,
    pub operation: String,
    pub message: String,
}

impl From<Calculation> for CalculationResponseBody {
    fn from(calculation: Calculation) -> Self {
        Self {
            number1: calculation.number1,
            number2: calculation.number2,
            result: calculation.result,
            operation: calculation.operation.to_string(),
            message: CALCULATION_COMPLETED.to_string(),
        }
    }
}

fn run(
    operation: Operation,
    (number1, number2): (f64, f64),
    path: &str,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    let calculation = calculate(operation, number1, number2).map_err(|e| {
        tracing::warn!(%operation, number1, number2, error = %e, "Calculation rejected");
        ApiError::from(e).at(path)
    })?;

    tracing::info!(
        %operation,
        number1,
        number2,
        result = calculation.result,
        "Calculation completed"
    );

    Ok(ApiResponse::success(
        CalculationResponseBody::from(calculation),
        operation.success_message(),
        path,
    ))
}

#[tracing::instrument(name = "Add", skip_all)]
pub async fn add(
    OriginalUri(uri): OriginalUri,
    ValidatedJson(operands): ValidatedJson<CalculationBody>,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    run(Operation::Addition, operands, uri.path())
}

#[tracing::instrument(name = "Add from query", skip_all)]
pub async fn add_from_query(
    OriginalUri(uri): OriginalUri,
    query: Result<Query<CalculationBody>, axum::extract::rejection::QueryRejection>,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    let Query(body) = query.map_err(|rejection| {
        ApiError::Validation(vec![format!("query: {}", rejection.body_text())]).at(uri.path())
    })?;
    let operands = body
        .validate()
        .map_err(|errors| ApiError::Validation(errors).at(uri.path()))?;

    run(Operation::Addition, operands, uri.path())
}

#[tracing::instrument(name = "Subtract", skip_all)]
pub async fn subtract(
    OriginalUri(uri): OriginalUri,
    ValidatedJson(operands): ValidatedJson<CalculationBody>,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    run(Operation::Subtraction, operands, uri.path())
}

#[tracing::instrument(name = "Multiply", skip_all)]
pub async fn multiply(
    OriginalUri(uri): OriginalUri,
    ValidatedJson(operands): ValidatedJson<CalculationBody>,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    run(Operation::Multiplication, operands, uri.path())
}

#[tracing::instrument(name = "Divide", skip_all)]
pub async fn divide(
    OriginalUri(uri): OriginalUri,
    ValidatedJson(operands): ValidatedJson<CalculationBody>,
) -> Result<ApiResponse<CalculationResponseBody>, ApiFailure> {
    run(Operation::Division, operands, uri.path())
}

pub async fn calculator_health(OriginalUri(uri): OriginalUri) -> ApiResponse<()> {
    tracing::debug!("Health check requested");
    ApiResponse::message_only(CALCULATOR_HEALTH_MESSAGE, uri.path())
}
