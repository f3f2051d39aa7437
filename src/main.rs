mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod schema;
mod services;
mod templates;

use tracing::*;

use config::AppCfg;
use services::BloglyDb;
use templates::Templates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppCfg::load()?;

    // initialize tracing
    config::tracing::init();

    let pool = db::build_pool(&cfg)?;
    if cfg.run_migrations {
        db::run_migrations(&cfg.database_url).await?;
    }

    let templates = Templates::load(&cfg.templates_dir)?;
    let _watcher = if cfg.watch_templates {
        Some(templates.watch(&cfg.templates_dir)?)
    } else {
        None
    };

    let app = routes::app(BloglyDb::new(pool), templates, &cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!("starting listening at {}", cfg.listen_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
