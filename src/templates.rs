use std::path::Path;
use std::sync::Arc;

use axum::response::Html;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tera::{Context, Tera};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::AppError;

/// Shared tera registry. Cloning shares the same templates.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<RwLock<Tera>>,
}

impl Templates {
    /// Load every template below `dir`. Names are relative to it, e.g.
    /// `users/list.html`.
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let glob = dir.as_ref().join("**").join("*");
        let tera = Tera::new(&glob.to_string_lossy())?;
        info!(count = tera.get_template_names().count(), "loaded templates");
        Ok(Self {
            tera: Arc::new(RwLock::new(tera)),
        })
    }

    pub async fn render(&self, name: &str, ctx: &Context) -> Result<Html<String>, AppError> {
        let html = self.tera.read().await.render(name, ctx)?;
        Ok(Html(html))
    }

    /// Reload the registry whenever something under `dir` changes. Watching
    /// stops when the returned watcher is dropped.
    pub fn watch(&self, dir: impl AsRef<Path>) -> anyhow::Result<RecommendedWatcher> {
        let tera = Arc::clone(&self.tera);
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
                Ok(event) if !event.kind.is_access() => {
                    // notify calls us on its own thread, outside the runtime
                    match tera.blocking_write().full_reload() {
                        Ok(()) => info!(paths = ?event.paths, "templates reloaded"),
                        Err(e) => warn!(error = %e, "template reload failed"),
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "template watch error"),
            })?;
        watcher.watch(dir.as_ref(), RecursiveMode::Recursive)?;
        info!(dir = %dir.as_ref().display(), "watching templates");
        Ok(watcher)
    }
}
