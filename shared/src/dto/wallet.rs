use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, SharedError};
use crate::models::wallet::Transaction;

/// Payments are mocked; the API accepts this method without charging anything.
pub const MOCK_PAYMENT_METHOD: &str = "mock_payment";

/// Body of `POST /wallet/add-funds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddFundsRequest {
    #[validate(range(min = 0.01, message = "Please enter a valid amount"))]
    pub amount: f64,
    pub payment_method: String,
}

impl AddFundsRequest {
    /// Parses the amount typed by the user and checks it against the
    /// per-transaction limit, usually `PolicyConfig::max_top_up`.
    pub fn from_input(raw: &str, max_top_up: f64) -> Result<Self> {
        let amount = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| SharedError::Validation("Please enter a valid amount".to_string()))?;
        if amount > max_top_up {
            return Err(SharedError::Validation(format!(
                "Maximum amount is {}₹ per transaction",
                group_thousands(max_top_up)
            )));
        }
        let request = Self {
            amount,
            payment_method: MOCK_PAYMENT_METHOD.to_string(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// `10000.0` as `10,000`; a fractional part is kept to two places.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if cents != "00" {
        grouped.push('.');
        grouped.push_str(cents);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFundsResponse {
    pub new_balance: f64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TOP_UP;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_from_input_ok() {
        let req = AddFundsRequest::from_input(" 250.5 ", MAX_TOP_UP).unwrap();
        assert_eq!(req.amount, 250.5);
        assert_eq!(req.payment_method, "mock_payment");
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(AddFundsRequest::from_input("10000", MAX_TOP_UP).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "not a number")]
    #[test_case("0" ; "zero")]
    #[test_case("-5" ; "negative")]
    #[test_case("NaN" ; "nan")]
    fn test_invalid_amount(raw: &str) {
        assert_eq!(
            AddFundsRequest::from_input(raw, MAX_TOP_UP).unwrap_err(),
            SharedError::Validation("Please enter a valid amount".into())
        );
    }

    #[test]
    fn test_over_limit() {
        assert_eq!(
            AddFundsRequest::from_input("10000.01", MAX_TOP_UP).unwrap_err(),
            SharedError::Validation("Maximum amount is 10,000₹ per transaction".into())
        );
    }

    #[test]
    fn test_lower_limit_from_policy() {
        assert_eq!(
            AddFundsRequest::from_input("750", 500.0).unwrap_err(),
            SharedError::Validation("Maximum amount is 500₹ per transaction".into())
        );
    }

    #[test_case(500.0, "500")]
    #[test_case(10_000.0, "10,000")]
    #[test_case(1_250_000.5, "1,250,000.50")]
    fn test_group_thousands(value: f64, expected: &str) {
        assert_eq!(group_thousands(value), expected);
    }
}
