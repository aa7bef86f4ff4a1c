use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response.
///
/// Successful responses carry `data` (or a `message` for operations with
/// nothing to return); failures carry `error`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

pub mod expense {
    use super::*;

    /// Amount as sent by clients: either a JSON number or a numeric string.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(f64),
        Text(String),
    }

    /// Request body for creating an expense.
    ///
    /// Every field is optional at the JSON level so that missing fields are
    /// reported through the envelope instead of a deserialization failure.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount: Option<AmountInput>,
        pub category: Option<String>,
        /// Defaults to today when omitted.
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub amount: f64,
        pub category: String,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub created_at: Option<DateTime<Utc>>,
    }
}

pub mod analytics {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total: f64,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct MonthlySummaryView {
        /// `YYYY-MM`
        pub month: String,
        pub categories: Vec<CategoryTotalView>,
        pub total: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AlertKind {
        Warning,
        Danger,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AlertView {
        #[serde(rename = "type")]
        pub kind: AlertKind,
        pub message: String,
        pub current: f64,
        pub limit: f64,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct SpendingAlertView {
        pub monthly_total: f64,
        pub monthly_limit: f64,
        pub alerts: Vec<AlertView>,
    }
}
