use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    // Same `.env` discovery as the server, so `DATABASE_URL` resolves identically.
    let _ = dotenvy::dotenv();
    cli::run_cli(db_migration::Migrator).await;
}
