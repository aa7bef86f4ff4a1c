//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`], [`InvalidCategory`] and [`InvalidDescription`] thrown
//!   when the input of a new expense is rejected.
//! - [`KeyNotFound`] thrown when an expense is not found.
//! - [`TotalOverflow`] thrown when a report total does not fit in cents.
//! - [`Database`] thrown when the storage layer fails.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidDescription`]: EngineError::InvalidDescription
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`TotalOverflow`]: EngineError::TotalOverflow
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid description: {0}")]
    InvalidDescription(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("total of {0} is out of range")]
    TotalOverflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidDescription(a), Self::InvalidDescription(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::TotalOverflow(a), Self::TotalOverflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
