use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Expense, NewExpense, ResultEngine, expenses};

use super::{Engine, with_tx};

impl Engine {
    /// Validates and stores a new expense, returning the stored record.
    pub async fn create_expense(
        &self,
        expense: NewExpense,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Expense> {
        let expense = expense.validated()?;
        with_tx!(self, |db_tx| {
            let model = expenses::ActiveModel::from_new(&expense, created_at)
                .insert(&db_tx)
                .await?;
            tracing::info!(
                id = model.id,
                category = %model.category,
                "created expense"
            );
            Ok::<_, EngineError>(Expense::from(model))
        })
    }

    /// Every stored expense, newest date first (ties: most recently inserted first).
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Hard-deletes an expense. Unknown ids are an error, never a no-op.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            match expenses::Entity::find_by_id(id).one(&db_tx).await? {
                Some(model) => {
                    model.delete(&db_tx).await?;
                    tracing::info!(id, "deleted expense");
                    Ok(())
                }
                None => Err(EngineError::KeyNotFound(format!("expense {id}"))),
            }
        })
    }
}
