use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Operands must stay within `[-OPERAND_LIMIT, OPERAND_LIMIT]`.
pub const OPERAND_LIMIT: f64 = 999_999_999.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Division by zero is not allowed")]
    DivisionByZero,
    #[error("{field} must be between -999999999 and 999999999")]
    OutOfRange { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition completed successfully",
            Operation::Subtraction => "Subtraction completed successfully",
            Operation::Multiplication => "Multiplication completed successfully",
            Operation::Division => "Division completed successfully",
        }
    }

    fn apply(&self, number1: f64, number2: f64) -> Result<f64, CalculationError> {
        match self {
            Operation::Addition => Ok(number1 + number2),
            Operation::Subtraction => Ok(number1 - number2),
            Operation::Multiplication => Ok(number1 * number2),
            Operation::Division if number2 == 0.0 => Err(CalculationError::DivisionByZero),
            Operation::Division => Ok(number1 / number2),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub number1: f64,
    pub number2: f64,
    pub result: f64,
    pub operation: Operation,
}

fn check_operand(field: &'static str, value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() && (-OPERAND_LIMIT..=OPERAND_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(CalculationError::OutOfRange { field })
    }
}

pub fn calculate(
    operation: Operation,
    number1: f64,
    number2: f64,
) -> Result<Calculation, CalculationError> {
    let number1 = check_operand("number1", number1)?;
    let number2 = check_operand("number2", number2)?;
    let result = operation.apply(number1, number2)?;

    Ok(Calculation {
        number1,
        number2,
        result,
        operation,
    })
}
