//! Builder for creating and configuring Designer instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;

use super::Designer;
use crate::{
    error::{DesignerError, Result},
    store::{CachedPlanStore, HttpPlanStore, LocalPlanStore, PlanStore},
};

/// Builder selecting and configuring the plan store behind a [`Designer`].
#[derive(Debug, Clone)]
pub struct DesignerBuilder {
    database_path: Option<PathBuf>,
    backend_url: Option<String>,
    cache: bool,
}

impl DesignerBuilder {
    /// Creates a builder for a local, cached store at the default path.
    pub fn new() -> Self {
        Self {
            database_path: None,
            backend_url: None,
            cache: true,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/ve-designer/designer.db` or
    /// `~/.local/share/ve-designer/designer.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Talks to a VE-Collab backend instead of a local database.
    ///
    /// Takes precedence over the database path.
    pub fn with_backend_url(mut self, url: Option<impl Into<String>>) -> Self {
        if let Some(url) = url {
            self.backend_url = Some(url.into());
        }
        self
    }

    /// Enables or disables the read-through plan cache (on by default).
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Builds the configured designer.
    ///
    /// # Errors
    ///
    /// Returns `DesignerError::Http` if the HTTP client cannot be set up,
    /// `DesignerError::FileSystem` if the database directory cannot be
    /// created and `DesignerError::Database` if initialization fails.
    pub async fn build(self) -> Result<Designer> {
        let store: Arc<dyn PlanStore> = match self.backend_url {
            Some(url) => {
                info!("Using VE-Collab backend at {url}");
                let http = HttpPlanStore::new(url)?;
                wrap(http, self.cache)
            }
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| DesignerError::FileSystem {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
                info!("Using local database at {}", db_path.display());
                let local = LocalPlanStore::open(db_path).await?;
                wrap(local, self.cache)
            }
        };

        Ok(Designer::with_store(store))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("ve-designer")
            .place_data_file("designer.db")
            .map_err(|e| DesignerError::XdgDirectory(e.to_string()))
    }
}

fn wrap<S: PlanStore + 'static>(store: S, cache: bool) -> Arc<dyn PlanStore> {
    if cache {
        Arc::new(CachedPlanStore::new(store))
    } else {
        Arc::new(store)
    }
}

impl Default for DesignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
