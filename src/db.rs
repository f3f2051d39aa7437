use anyhow::anyhow;
use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::deadpool::{Hook, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::*;

use crate::config::AppCfg;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn build_pool(cfg: &AppCfg) -> anyhow::Result<Pool<AsyncPgConnection>> {
    let mgr = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&cfg.database_url);

    info!(max_size = cfg.db_pool_size, "Starting DB pool");
    let pool = Pool::builder(mgr)
        .max_size(cfg.db_pool_size)
        .post_create(Hook::async_fn(|_conn, metrics| {
            Box::pin(async move {
                trace!(?metrics, "dbpool: connection created");
                Ok(())
            })
        }))
        .runtime(deadpool::Runtime::Tokio1)
        .build()?;

    Ok(pool)
}

/// Apply every pending migration. The migration harness is synchronous, so
/// it gets its own blocking thread and connection.
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    let url = database_url.to_owned();

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("running migrations: {e}"))?;
        for version in applied {
            info!(%version, "applied migration");
        }
        Ok(())
    })
    .await?
}
