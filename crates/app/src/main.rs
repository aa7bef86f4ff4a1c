use engine::{Budget, Money};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expenses={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let budget = parse_budget(&settings.budget)?;
    let timezone: chrono_tz::Tz = settings
        .budget
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone '{}': {err}", settings.budget.timezone))?;

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .budget(budget)
        .build()
        .await?;
    tracing::info!(
        limit = %budget.monthly_limit(),
        threshold = budget.warning_threshold(),
        %timezone,
        "budget configured"
    );

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(server::ServerState::new(engine, timezone), listener).await?;
    Ok(())
}

fn parse_budget(config: &settings::Budget) -> Result<Budget, BoxError> {
    let limit = Money::from_major(config.monthly_limit)
        .ok_or_else(|| format!("invalid monthly limit: {}", config.monthly_limit))?;
    Ok(Budget::new(limit, config.warning_threshold)?)
}

async fn parse_database(config: &Database) -> Result<sea_orm::DatabaseConnection, BoxError> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
