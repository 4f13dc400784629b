use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connect using `config.toml` settings, falling back to environment-only
/// configuration (`DATABASE_URL`) when no file is present.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let cfg = match configs::load_default() {
        Ok(mut app) => {
            app.database.normalize_from_env();
            app.database
        }
        Err(_) => configs::DatabaseConfig::from_env(),
    };
    connect_with_config(&cfg).await
}

/// Connect with explicit pool settings. The connection is handed to the
/// repository layer by the caller; nothing here is global state.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    cfg.validate()?;

    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await?;
    Ok(db)
}
