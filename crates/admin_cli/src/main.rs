use std::error::Error;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::{Budget, Engine, Money, NewExpense};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "expenses_admin")]
#[command(about = "Command-line access to the expense database")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./expenses.db?mode=rwc"
    )]
    database_url: String,

    /// Timezone deciding what "today" is, like the server's `budget.timezone`.
    #[arg(
        long,
        env = "EXPENSES__BUDGET__TIMEZONE",
        default_value = "UTC",
        value_parser = parse_timezone
    )]
    timezone: Tz,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense.
    Add(AddArgs),
    /// List every expense, newest first.
    List,
    /// Delete an expense by id.
    Delete { id: i32 },
    /// Totals per category for each month.
    Monthly,
    /// Totals per category across all expenses.
    Categories,
    /// Check this month's spend against a budget.
    Alert(AlertArgs),
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Amount in euros, `.` or `,` as decimal separator.
    #[arg(long, value_parser = parse_money)]
    amount: Money,
    #[arg(long)]
    category: String,
    /// `YYYY-MM-DD`, defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct AlertArgs {
    /// Monthly limit in euros.
    #[arg(long, value_parser = parse_money, default_value = "1000")]
    limit: Money,
    /// Share of the limit that triggers a warning.
    #[arg(long, default_value_t = 0.8)]
    threshold: f64,
}

fn parse_money(raw: &str) -> Result<Money, String> {
    raw.parse::<Money>().map_err(|err| err.to_string())
}

fn parse_timezone(raw: &str) -> Result<Tz, String> {
    raw.parse::<Tz>()
        .map_err(|err| format!("invalid timezone '{raw}': {err}"))
}

fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

fn print_expense(expense: &engine::Expense) {
    let description = expense.description.as_deref().unwrap_or("");
    println!(
        "#{:<5} {}  {:>12}  {:<20} {description}",
        expense.id,
        expense.date,
        expense.amount.to_string(),
        expense.category
    );
}

async fn connect_db(database_url: &str) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Add(args) => {
            let engine = Engine::builder().database(db).build().await?;
            let date = args.date.unwrap_or_else(|| today_in(cli.timezone));
            let expense = engine
                .create_expense(
                    NewExpense::new(args.amount, args.category, date, args.description),
                    Utc::now(),
                )
                .await?;
            print_expense(&expense);
        }
        Command::List => {
            let engine = Engine::builder().database(db).build().await?;
            for expense in engine.list_expenses().await? {
                print_expense(&expense);
            }
        }
        Command::Delete { id } => {
            let engine = Engine::builder().database(db).build().await?;
            if let Err(err) = engine.delete_expense(id).await {
                eprintln!("{err}");
                std::process::exit(1);
            }
            println!("deleted expense #{id}");
        }
        Command::Monthly => {
            let engine = Engine::builder().database(db).build().await?;
            for month in engine.monthly_summary().await? {
                println!("{}  {}", month.month, month.total);
                for category in month.categories {
                    println!("    {:<20} {:>12}", category.category, category.total.to_string());
                }
            }
        }
        Command::Categories => {
            let engine = Engine::builder().database(db).build().await?;
            for category in engine.category_summary().await? {
                println!("{:<20} {:>12}", category.category, category.total.to_string());
            }
        }
        Command::Alert(args) => {
            let budget = Budget::new(args.limit, args.threshold)?;
            let engine = Engine::builder().database(db).budget(budget).build().await?;
            let report = engine.spending_alert(today_in(cli.timezone)).await?;
            println!("spent {} of {}", report.monthly_total, report.monthly_limit);
            for alert in report.alerts {
                println!("[{}] {}", alert.kind.as_str(), alert.message);
            }
        }
    }

    Ok(())
}
