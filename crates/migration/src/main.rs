use sea_orm::Database;
use sea_orm_migration::prelude::*;

const USAGE: &str = "Usage: migration [up [N]|down [N]|fresh|refresh|status]";

fn steps(arg: Option<String>) -> Result<Option<u32>, Box<dyn std::error::Error + Send + Sync>> {
    arg.map(|raw| raw.parse::<u32>())
        .transpose()
        .map_err(|err| format!("invalid step count: {err}").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./expenses.db?mode=rwc".to_string());

    let db = Database::connect(&db_url).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, steps(args.next())?).await?,
        "down" => migration::Migrator::down(&db, Some(steps(args.next())?.unwrap_or(1))).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "refresh" => migration::Migrator::refresh(&db).await?,
        "status" => migration::Migrator::status(&db).await?,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
