//! Request validation.
//!
//! Pure functions: no IO, input is never mutated. Each validator either
//! produces a parsed request or a non-empty list of field-level violations.
//! Route parameters arrive as raw strings and are parsed here - this layer
//! is the single rejection boundary for malformed input (the router never
//! rejects on segment shape).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Currencies the upstream provider does not support reliably.
/// Conversion requests naming one of these are rejected up front.
pub const EXCLUDED_CURRENCIES: [&str; 4] = ["TRY", "PLN", "THB", "MXN"];

/// Smallest accepted conversion amount.
pub const MIN_AMOUNT: f64 = 0.001;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending route parameter
    #[schema(example = "base_code")]
    pub field: String,
    /// Human-readable description of the rule that failed
    #[schema(example = "must be a 3-letter uppercase currency code")]
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validated latest-rate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRequest {
    pub code: String,
}

/// Validated point-conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub base_code: String,
    pub target_code: String,
    pub amount: f64,
}

/// Validated history request.
///
/// Begin/end ordering is deliberately not checked; the upstream provider
/// accepts either order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub code: String,
}

/// `^[A-Z]{3}$`, case-sensitive. Lowercase and mixed case fail - codes are
/// forwarded verbatim, never normalized.
fn is_valid_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_excluded(code: &str) -> bool {
    EXCLUDED_CURRENCIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(code))
}

fn check_code(field: &str, code: &str, violations: &mut Vec<FieldViolation>) {
    if !is_valid_code(code) {
        violations.push(FieldViolation::new(
            field,
            "must be a 3-letter uppercase currency code",
        ));
    }
}

fn check_not_excluded(field: &str, code: &str, violations: &mut Vec<FieldViolation>) {
    if is_excluded(code) {
        violations.push(FieldViolation::new(
            field,
            format!(
                "must not be one of the following values: {}",
                EXCLUDED_CURRENCIES.join(", ")
            ),
        ));
    }
}

fn parse_date(field: &str, value: &str, violations: &mut Vec<FieldViolation>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(FieldViolation::new(
                field,
                "must be an ISO-8601 calendar date (YYYY-MM-DD)",
            ));
            None
        }
    }
}

/// Validates a latest-rate request.
pub fn validate_latest(code: &str) -> Result<LatestRequest, Vec<FieldViolation>> {
    let mut violations = Vec::new();
    check_code("code", code, &mut violations);

    if violations.is_empty() {
        Ok(LatestRequest {
            code: code.to_string(),
        })
    } else {
        Err(violations)
    }
}

/// Validates a conversion request.
///
/// Both codes must pass the format rule and must not name an excluded
/// currency (checked case-insensitively). The amount must be a decimal in
/// `[MIN_AMOUNT, f64::MAX]`.
pub fn validate_convert(
    base_code: &str,
    target_code: &str,
    amount: &str,
) -> Result<ConvertRequest, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    check_code("base_code", base_code, &mut violations);
    check_not_excluded("base_code", base_code, &mut violations);
    check_code("target_code", target_code, &mut violations);
    check_not_excluded("target_code", target_code, &mut violations);

    let parsed_amount = match amount.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if value < MIN_AMOUNT {
                violations.push(FieldViolation::new(
                    "amount",
                    format!("must be between {} and {}", MIN_AMOUNT, f64::MAX),
                ));
            }
            Some(value)
        }
        _ => {
            violations.push(FieldViolation::new("amount", "must be a decimal number"));
            None
        }
    };

    match (violations.is_empty(), parsed_amount) {
        (true, Some(amount)) => Ok(ConvertRequest {
            base_code: base_code.to_string(),
            target_code: target_code.to_string(),
            amount,
        }),
        _ => Err(violations),
    }
}

/// Validates a history request.
///
/// Only the code carries a business rule; dates merely have to parse.
pub fn validate_history(
    begin_date: &str,
    end_date: &str,
    code: &str,
) -> Result<HistoryRequest, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let begin = parse_date("begin_date", begin_date, &mut violations);
    let end = parse_date("end_date", end_date, &mut violations);
    check_code("code", code, &mut violations);

    match (begin, end, violations.is_empty()) {
        (Some(begin_date), Some(end_date), true) => Ok(HistoryRequest {
            begin_date,
            end_date,
            code: code.to_string(),
        }),
        _ => Err(violations),
    }
}
