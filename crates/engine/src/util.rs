//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every write path enforces the same invariants.

use crate::{EngineError, Money, ResultEngine};

pub(crate) const CATEGORY_MAX_LEN: usize = 50;
pub(crate) const DESCRIPTION_MAX_LEN: usize = 200;
/// Largest single expense: one billion euros.
pub(crate) const AMOUNT_MAX: Money = Money::new(1_000_000_000_00);

/// Expenses are strictly positive and at most [`AMOUNT_MAX`].
pub(crate) fn validate_amount(amount: Money) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be greater than 0".to_string(),
        ));
    }
    if amount > AMOUNT_MAX {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be at most {AMOUNT_MAX}"
        )));
    }
    Ok(())
}

/// Trim a category label and reject empty or oversized values.
pub(crate) fn normalize_category(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidCategory(
            "category must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > CATEGORY_MAX_LEN {
        return Err(EngineError::InvalidCategory(format!(
            "category must be at most {CATEGORY_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trims a description. An empty one stays an empty string, only a missing
/// one is stored as absent.
pub(crate) fn normalize_description(value: Option<&str>) -> ResultEngine<Option<String>> {
    let Some(trimmed) = value.map(str::trim) else {
        return Ok(None);
    };
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(EngineError::InvalidDescription(format!(
            "description must be at most {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
