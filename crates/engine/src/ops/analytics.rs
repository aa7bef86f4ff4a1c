use chrono::NaiveDate;

use crate::{
    CategoryTotal, MonthlySummary, ResultEngine, SpendingAlert,
    analytics::{category_summary, monthly_summary, spending_alert},
};

use super::Engine;

impl Engine {
    pub async fn monthly_summary(&self) -> ResultEngine<Vec<MonthlySummary>> {
        let records = self.list_expenses().await?;
        monthly_summary(&records)
    }

    pub async fn category_summary(&self) -> ResultEngine<Vec<CategoryTotal>> {
        let records = self.list_expenses().await?;
        category_summary(&records)
    }

    /// Budget check for the month containing `today`, against the engine budget.
    pub async fn spending_alert(&self, today: NaiveDate) -> ResultEngine<SpendingAlert> {
        let records = self.list_expenses().await?;
        spending_alert(&records, today, &self.budget)
    }
}
