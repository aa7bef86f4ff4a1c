//! Expense records.
//!
//! An `Expense` is a single money outflow tagged with a free-form category and
//! a calendar date. Records are immutable once stored: they can only be
//! created and deleted.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{
    Money, ResultEngine,
    util::{normalize_category, normalize_description, validate_amount},
};

/// A stored expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i32,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for a new expense, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        description: Option<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            description,
        }
    }

    /// Checks the invariants of a record and returns the normalized input.
    pub(crate) fn validated(self) -> ResultEngine<Self> {
        validate_amount(self.amount)?;
        Ok(Self {
            amount: self.amount,
            category: normalize_category(&self.category)?,
            date: self.date,
            description: normalize_description(self.description.as_deref())?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount_minor: i64,
    pub category: String,
    pub date: Date,
    pub description: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn from_new(expense: &NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            category: ActiveValue::Set(expense.category.clone()),
            date: ActiveValue::Set(expense.date),
            description: ActiveValue::Set(expense.description.clone()),
            created_at: ActiveValue::Set(Some(created_at)),
        }
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: Money::new(model.amount_minor),
            category: model.category,
            date: model.date,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
