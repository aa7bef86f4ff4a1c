//! Expense storage and spending analytics.
//!
//! The [`Engine`] owns the database connection and exposes the only three
//! write/read operations on records (create, list, delete) plus the reports
//! built on top of them. The reports themselves live in [`analytics`] as pure
//! functions, so they can be used without a database.

pub use analytics::{
    Alert, AlertKind, Budget, CategoryTotal, MonthKey, MonthlySummary, SpendingAlert,
};
pub use error::EngineError;
pub use expenses::{Expense, NewExpense};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};

pub mod analytics;
mod error;
mod expenses;
mod money;
mod ops;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
