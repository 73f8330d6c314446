use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body for POST /add_expense. The owner comes from the access guard, never
/// from the body.
#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub category: String,
    pub amount: f64,
    /// Caller-supplied date string; format is not interpreted.
    pub date: String,
}

impl AddExpenseRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.category.trim().is_empty() || self.date.trim().is_empty() {
            return Err(ApiError::Validation("All fields are required".into()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ApiError::Validation(
                "Amount must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// One expense as returned to the client; storage identifiers stripped.
#[derive(Debug, Serialize)]
pub struct ExpenseItem {
    pub category: String,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct SavingsResponse {
    pub savings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: &str, amount: f64, date: &str) -> AddExpenseRequest {
        AddExpenseRequest {
            category: category.into(),
            amount,
            date: date.into(),
        }
    }

    #[test]
    fn accepts_complete_request() {
        assert!(request("food", 50.0, "2024-01-01").validate().is_ok());
    }

    #[test]
    fn rejects_empty_fields() {
        assert!(request("", 50.0, "2024-01-01").validate().is_err());
        assert!(request("   ", 50.0, "2024-01-01").validate().is_err());
        assert!(request("food", 50.0, "").validate().is_err());
    }

    #[test]
    fn rejects_non_positive_and_non_finite_amounts() {
        assert!(request("food", 0.0, "2024-01-01").validate().is_err());
        assert!(request("food", -5.0, "2024-01-01").validate().is_err());
        assert!(request("food", f64::NAN, "2024-01-01").validate().is_err());
        assert!(request("food", f64::INFINITY, "2024-01-01").validate().is_err());
    }
}
