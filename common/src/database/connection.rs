use std::{fs::File, io::BufReader, path::Path, time::Duration};

use tracing::{error, info};
use tokio_postgres::NoTls;
use tokio_postgres_rustls::MakeRustlsConnect;
use deadpool_postgres::{
    Config as PoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime, Timeouts,
};

use crate::utils::{
    config::Config,
    error::{ApiError, Result},
};

pub type DbPool = Pool;

const MIGRATION_PATHS: [&str; 3] = ["../migrations", "./migrations", "migrations"];

fn pool_config(config: &Config) -> PoolConfig {
    let mut cfg = PoolConfig::new();
    cfg.url = Some(config.database_url.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Verified,
    });

    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: config.max_db_connections as usize,
        timeouts: Timeouts {
            wait: Some(Duration::from_secs(10)),
            create: Some(Duration::from_secs(5)),
            recycle: Some(Duration::from_secs(10)),
        },
        ..Default::default()
    });

    cfg
}

fn tls_connector(config: &Config) -> Result<MakeRustlsConnect> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = &config.database_ca_cert {
        let mut reader = BufReader::new(File::open(path)?);
        for cert in rustls_pemfile::certs(&mut reader).flatten() {
            root_store
                .add(cert)
                .map_err(|e| ApiError::Config(format!("Invalid certificate in {path}: {e}")))?;
        }
    }

    Ok(MakeRustlsConnect::new(
        rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth(),
    ))
}

/// Builds the pool without opening a connection. Connections are created
/// lazily on the first `get`.
pub fn build_pool(config: &Config) -> Result<DbPool> {
    let cfg = pool_config(config);

    let pool = if config.database_tls {
        cfg.create_pool(Some(Runtime::Tokio1), tls_connector(config)?)
    } else {
        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
    };

    pool.map_err(|e| ApiError::Database(format!("Failed to create database pool: {}", e)))
}

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let pool = build_pool(config)?;

    let _ = pool.get()
        .await
        .map_err(|e| ApiError::Database(format!("Database connection test failed: {}", e)))?;

    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut client = pool
        .get()
        .await
        .map_err(|e| ApiError::Database(format!("Failed to get client: {e}")))?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS __migrations (
            filename TEXT PRIMARY KEY,
            applied_at TIMESTAMPTZ DEFAULT NOW()
        )",
            &[],
        )
        .await
        .map_err(|e| ApiError::Database(format!("Failed to create migrations table: {e}")))?;

    let migration_dir = MIGRATION_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .ok_or_else(|| ApiError::Database("No migrations directory found".to_owned()))?;

    let mut migrations = std::fs::read_dir(migration_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.extension()? == "sql").then_some(path)
        })
        .collect::<Vec<_>>();

    migrations.sort();

    let mut applied = 0usize;
    for migration_path in migrations {
        let migration_name = migration_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Database("Invalid migration filename".to_owned()))?;

        let already_applied = client
            .query_opt(
                "SELECT 1 FROM __migrations WHERE filename = $1",
                &[&migration_name],
            )
            .await?;

        if already_applied.is_some() {
            info!("Skipping already applied migration: {}", migration_name);
            continue;
        }

        let migration_sql = std::fs::read_to_string(&migration_path)?;

        info!("Running migration: {}", migration_name);

        let transaction = client.transaction().await?;
        if let Err(e) = transaction.batch_execute(&migration_sql).await {
            error!("Migration {} failed: {}", migration_name, e);
            return Err(ApiError::Database(format!(
                "Migration {migration_name} failed: {e}"
            )));
        }
        transaction
            .execute(
                "INSERT INTO __migrations (filename) VALUES ($1)",
                &[&migration_name],
            )
            .await?;
        transaction.commit().await?;

        applied += 1;
        info!("Successfully applied migration: {}", migration_name);
    }

    info!(applied, "All migrations completed successfully");
    Ok(())
}
