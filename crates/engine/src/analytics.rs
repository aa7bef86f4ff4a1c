//! Spending analytics.
//!
//! Every function here is a pure computation over a slice of [`Expense`]s:
//! the caller always passes the full, freshly loaded record set and gets back
//! a new summary. Nothing is cached between calls.
//!
//! Orderings never depend on the order the records are stored in, with one
//! exception: categories whose totals are exactly equal keep the order in
//! which they first appear in the input.
//!
//! Totals are summed with checked arithmetic and fail with
//! [`EngineError::TotalOverflow`] instead of wrapping.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use chrono::{Datelike, NaiveDate};
use crate::{EngineError, Expense, Money, ResultEngine};

/// Default monthly spending limit, in cents.
pub const DEFAULT_MONTHLY_LIMIT: Money = Money::new(1000_00);
/// Default share of the limit that triggers a warning.
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.8;

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns `true` when `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub categories: Vec<CategoryTotal>,
    pub total: Money,
}

/// The monthly budget the spending alert compares against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Budget {
    monthly_limit: Money,
    warning_threshold: f64,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }
}

impl Budget {
    /// Builds a budget; the limit must be positive and the threshold in `(0, 1]`.
    pub fn new(monthly_limit: Money, warning_threshold: f64) -> ResultEngine<Self> {
        if !monthly_limit.is_positive() {
            return Err(EngineError::InvalidAmount(
                "monthly limit must be greater than 0".to_string(),
            ));
        }
        if !(warning_threshold > 0.0 && warning_threshold <= 1.0) {
            return Err(EngineError::InvalidAmount(format!(
                "warning threshold must be in (0, 1], got {warning_threshold}"
            )));
        }
        Ok(Self {
            monthly_limit,
            warning_threshold,
        })
    }

    #[must_use]
    pub fn monthly_limit(&self) -> Money {
        self.monthly_limit
    }

    #[must_use]
    pub fn warning_threshold(&self) -> f64 {
        self.warning_threshold
    }

    /// `true` once `spent` reaches `limit × threshold`, compared unrounded.
    fn warns_at(&self, spent: Money) -> bool {
        spent.cents() as f64 >= self.monthly_limit.cents() as f64 * self.warning_threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Danger,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub current: Money,
    pub limit: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpendingAlert {
    pub monthly_total: Money,
    pub monthly_limit: Money,
    pub alerts: Vec<Alert>,
}

fn add_to(total: Money, amount: Money, what: &str) -> ResultEngine<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| EngineError::TotalOverflow(what.to_string()))
}

/// Sums amounts per category, highest total first.
///
/// Ties keep first-seen order because `sort_by` is stable.
fn totals_by_category<'a>(
    records: impl IntoIterator<Item = &'a Expense>,
) -> ResultEngine<Vec<CategoryTotal>> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in records {
        match index.get(record.category.as_str()) {
            Some(&pos) => {
                let slot = &mut totals[pos];
                slot.total = add_to(slot.total, record.amount, &slot.category)?;
            }
            None => {
                index.insert(record.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: record.category.clone(),
                    total: record.amount,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(totals)
}

/// Totals per category for every month that has at least one expense, most
/// recent month first.
pub fn monthly_summary(records: &[Expense]) -> ResultEngine<Vec<MonthlySummary>> {
    let mut months: BTreeMap<MonthKey, Vec<&Expense>> = BTreeMap::new();
    for record in records {
        months
            .entry(MonthKey::of(record.date))
            .or_default()
            .push(record);
    }

    months
        .into_iter()
        .rev()
        .map(|(month, records)| {
            let categories = totals_by_category(records)?;
            let total = Money::checked_sum(categories.iter().map(|c| c.total))
                .ok_or_else(|| EngineError::TotalOverflow(month.to_string()))?;
            Ok(MonthlySummary {
                month,
                categories,
                total,
            })
        })
        .collect()
}

/// Totals per category across all records, highest total first.
pub fn category_summary(records: &[Expense]) -> ResultEngine<Vec<CategoryTotal>> {
    totals_by_category(records)
}

/// Compares the spend of the month containing `today` with `budget`.
///
/// At most one alert is produced: `danger` once the limit is reached,
/// otherwise `warning` once `monthly_limit × warning_threshold` is reached.
pub fn spending_alert(
    records: &[Expense],
    today: NaiveDate,
    budget: &Budget,
) -> ResultEngine<SpendingAlert> {
    let current_month = MonthKey::of(today);
    let monthly_total = Money::checked_sum(
        records
            .iter()
            .filter(|record| current_month.contains(record.date))
            .map(|record| record.amount),
    )
    .ok_or_else(|| EngineError::TotalOverflow(current_month.to_string()))?;
    let monthly_limit = budget.monthly_limit();

    let mut alerts = Vec::new();
    if monthly_total >= monthly_limit {
        alerts.push(Alert {
            kind: AlertKind::Danger,
            message: format!(
                "You have exceeded your monthly budget of €{:.2}!",
                monthly_limit.to_major()
            ),
            current: monthly_total,
            limit: monthly_limit,
        });
    } else if budget.warns_at(monthly_total) {
        let percent = monthly_total.cents() as f64 / monthly_limit.cents() as f64 * 100.0;
        alerts.push(Alert {
            kind: AlertKind::Warning,
            message: format!("You have used {percent:.1}% of your monthly budget"),
            current: monthly_total,
            limit: monthly_limit,
        });
    }

    Ok(SpendingAlert {
        monthly_total,
        monthly_limit,
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(id: i32, euros: i64, category: &str, day: &str) -> Expense {
        Expense {
            id,
            amount: Money::new(euros * 100),
            category: category.to_string(),
            date: date(day),
            description: None,
            created_at: None,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, 100, "food", "2024-01-15"),
            expense(2, 50, "food", "2024-01-20"),
            expense(3, 200, "rent", "2024-02-01"),
        ]
    }

    fn grand_total(records: &[Expense]) -> Money {
        Money::checked_sum(records.iter().map(|r| r.amount)).unwrap()
    }

    #[test]
    fn month_key_formats_as_year_month() {
        assert_eq!(MonthKey::of(date("2024-03-09")).to_string(), "2024-03");
        assert_eq!(MonthKey::of(date("0999-12-31")).to_string(), "0999-12");
    }

    #[test]
    fn monthly_summary_groups_by_month_most_recent_first() {
        let summary = monthly_summary(&sample()).unwrap();

        assert_eq!(
            summary,
            vec![
                MonthlySummary {
                    month: MonthKey {
                        year: 2024,
                        month: 2
                    },
                    categories: vec![CategoryTotal {
                        category: "rent".to_string(),
                        total: Money::new(200_00),
                    }],
                    total: Money::new(200_00),
                },
                MonthlySummary {
                    month: MonthKey {
                        year: 2024,
                        month: 1
                    },
                    categories: vec![CategoryTotal {
                        category: "food".to_string(),
                        total: Money::new(150_00),
                    }],
                    total: Money::new(150_00),
                },
            ]
        );
    }

    #[test]
    fn monthly_summary_is_strictly_descending_and_conserves_total() {
        let records = vec![
            expense(1, 12, "food", "2023-12-31"),
            expense(2, 30, "fuel", "2024-01-01"),
            expense(3, 7, "food", "2024-11-02"),
            expense(4, 41, "food", "2024-01-31"),
            expense(5, 5, "gifts", "2023-12-01"),
            expense(6, 9, "fuel", "2024-11-30"),
        ];
        let summary = monthly_summary(&records).unwrap();

        assert_eq!(summary.len(), 3);
        assert!(summary.windows(2).all(|w| w[0].month > w[1].month));
        let total = Money::checked_sum(summary.iter().map(|m| m.total)).unwrap();
        assert_eq!(total, grand_total(&records));
        for month in &summary {
            let categories = Money::checked_sum(month.categories.iter().map(|c| c.total)).unwrap();
            assert_eq!(categories, month.total);
        }
    }

    #[test]
    fn monthly_summary_orders_categories_inside_a_month() {
        let records = vec![
            expense(1, 10, "food", "2024-05-01"),
            expense(2, 40, "rent", "2024-05-02"),
            expense(3, 10, "fun", "2024-05-03"),
        ];
        let summary = monthly_summary(&records).unwrap();
        let names: Vec<&str> = summary[0]
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["rent", "food", "fun"]);
    }

    #[test]
    fn category_summary_sorts_by_total_descending() {
        let summary = category_summary(&sample()).unwrap();
        assert_eq!(
            summary,
            vec![
                CategoryTotal {
                    category: "rent".to_string(),
                    total: Money::new(200_00),
                },
                CategoryTotal {
                    category: "food".to_string(),
                    total: Money::new(150_00),
                },
            ]
        );
    }

    #[test]
    fn category_summary_ties_keep_first_seen_order() {
        let records = vec![
            expense(1, 20, "travel", "2024-01-01"),
            expense(2, 20, "books", "2024-02-01"),
            expense(3, 30, "food", "2024-03-01"),
        ];
        let names: Vec<String> = category_summary(&records)
            .unwrap()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["food", "travel", "books"]);
    }

    #[test]
    fn category_summary_conserves_total_and_order() {
        let records = vec![
            expense(1, 3, "a", "2024-01-01"),
            expense(2, 8, "b", "2024-01-02"),
            expense(3, 4, "a", "2023-06-02"),
            expense(4, 1, "c", "2022-06-02"),
            expense(5, 6, "b", "2024-01-09"),
        ];
        let summary = category_summary(&records).unwrap();
        let total = Money::checked_sum(summary.iter().map(|c| c.total)).unwrap();
        assert_eq!(total, grand_total(&records));
        assert!(summary.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn empty_input_yields_empty_summaries() {
        assert!(monthly_summary(&[]).unwrap().is_empty());
        assert!(category_summary(&[]).unwrap().is_empty());
    }

    #[test]
    fn summaries_are_idempotent() {
        let records = sample();
        assert_eq!(monthly_summary(&records), monthly_summary(&records));
        assert_eq!(category_summary(&records), category_summary(&records));
        let today = date("2024-02-10");
        let budget = Budget::default();
        assert_eq!(
            spending_alert(&records, today, &budget).unwrap(),
            spending_alert(&records, today, &budget).unwrap()
        );
    }

    #[test]
    fn no_spend_means_no_alert() {
        let alert = spending_alert(&sample(), date("2025-06-15"), &Budget::default()).unwrap();
        assert_eq!(alert.monthly_total, Money::ZERO);
        assert_eq!(alert.monthly_limit, Money::new(1000_00));
        assert!(alert.alerts.is_empty());
    }

    #[test]
    fn warning_when_over_threshold() {
        let records = vec![
            expense(1, 800, "rent", "2024-03-01"),
            expense(2, 50, "food", "2024-03-31"),
            expense(3, 900, "rent", "2024-02-29"),
        ];
        let alert = spending_alert(&records, date("2024-03-15"), &Budget::default()).unwrap();

        assert_eq!(alert.monthly_total, Money::new(850_00));
        assert_eq!(alert.alerts.len(), 1);
        assert_eq!(alert.alerts[0].kind, AlertKind::Warning);
        assert!(alert.alerts[0].message.contains("85.0%"));
        assert_eq!(alert.alerts[0].current, Money::new(850_00));
    }

    #[test]
    fn warning_starts_exactly_at_threshold() {
        let records = vec![expense(1, 800, "rent", "2024-03-01")];
        let alert = spending_alert(&records, date("2024-03-15"), &Budget::default()).unwrap();
        assert_eq!(alert.alerts[0].kind, AlertKind::Warning);

        let records = vec![Expense {
            amount: Money::new(799_99),
            ..expense(1, 0, "rent", "2024-03-01")
        }];
        let alert = spending_alert(&records, date("2024-03-15"), &Budget::default()).unwrap();
        assert!(alert.alerts.is_empty());
    }

    #[test]
    fn danger_when_limit_reached() {
        let records = vec![
            expense(1, 600, "rent", "2024-03-01"),
            expense(2, 400, "food", "2024-03-02"),
        ];
        let alert = spending_alert(&records, date("2024-03-20"), &Budget::default()).unwrap();

        assert_eq!(alert.alerts.len(), 1);
        assert_eq!(alert.alerts[0].kind, AlertKind::Danger);
        assert_eq!(
            alert.alerts[0].message,
            "You have exceeded your monthly budget of €1000.00!"
        );
    }

    #[test]
    fn same_month_of_another_year_is_ignored() {
        let records = vec![expense(1, 5000, "car", "2023-03-10")];
        let alert = spending_alert(&records, date("2024-03-10"), &Budget::default()).unwrap();
        assert_eq!(alert.monthly_total, Money::ZERO);
        assert!(alert.alerts.is_empty());
    }

    #[test]
    fn custom_budget_is_honoured() {
        let budget = Budget::new(Money::new(200_00), 0.5).unwrap();
        let records = vec![expense(1, 120, "food", "2024-03-01")];
        let alert = spending_alert(&records, date("2024-03-10"), &budget).unwrap();
        assert_eq!(alert.monthly_limit, Money::new(200_00));
        assert_eq!(alert.alerts[0].kind, AlertKind::Warning);
        assert!(alert.alerts[0].message.contains("60.0%"));
    }

    #[test]
    fn budget_rejects_invalid_values() {
        assert!(Budget::new(Money::ZERO, 0.8).is_err());
        assert!(Budget::new(Money::new(100), 0.0).is_err());
        assert!(Budget::new(Money::new(100), 1.5).is_err());
        assert!(Budget::new(Money::new(100), f64::NAN).is_err());
        assert!(Budget::new(Money::new(100), 1.0).is_ok());
    }

    #[test]
    fn warning_compares_against_the_unrounded_threshold() {
        let budget = Budget::new(Money::new(10_00), 0.8333).unwrap();
        let spent = |cents| Expense {
            amount: Money::new(cents),
            ..expense(1, 0, "food", "2024-03-01")
        };

        let alert = spending_alert(&[spent(8_33)], date("2024-03-10"), &budget).unwrap();
        assert!(alert.alerts.is_empty());

        let alert = spending_alert(&[spent(8_34)], date("2024-03-10"), &budget).unwrap();
        assert_eq!(alert.alerts[0].kind, AlertKind::Warning);
        assert!(alert.alerts[0].message.contains("83.4%"));
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let huge = |id, category: &str| Expense {
            amount: Money::new(i64::MAX / 2 + 1),
            ..expense(id, 0, category, "2024-03-01")
        };

        let same_category = vec![huge(1, "house"), huge(2, "house")];
        assert!(matches!(
            category_summary(&same_category),
            Err(EngineError::TotalOverflow(_))
        ));
        assert!(matches!(
            monthly_summary(&same_category),
            Err(EngineError::TotalOverflow(_))
        ));
        assert!(matches!(
            spending_alert(&same_category, date("2024-03-10"), &Budget::default()),
            Err(EngineError::TotalOverflow(_))
        ));

        let split = vec![huge(1, "house"), huge(2, "boat")];
        assert!(category_summary(&split).is_ok());
        assert!(matches!(
            monthly_summary(&split),
            Err(EngineError::TotalOverflow(_))
        ));
    }
}
