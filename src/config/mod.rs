pub mod tracing;

use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppCfg {
    pub listen_addr: String,
    pub database_url: String,
    pub db_pool_size: usize,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub templates_dir: String,
    pub static_dir: String,
    /// Reload templates from disk when they change.
    pub watch_templates: bool,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            database_url: "postgres:///blogly".into(),
            db_pool_size: 10,
            run_migrations: true,
            templates_dir: "templates".into(),
            static_dir: "static".into(),
            watch_templates: false,
        }
    }
}

impl AppCfg {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Json::file("appsettings.json"))
            .merge(Env::prefixed("APP_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
