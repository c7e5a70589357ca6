//! App Core for BrewBrowser.
//!
//! Assembly root: loads settings, opens the local database and wires the
//! catalog client, bookmark store and both view controllers together.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::database::connection::{Database, SharedDatabase};
use crate::managers::bookmark_store::BookmarkStore;
use crate::managers::detail_view::DetailViewController;
use crate::managers::list_view::{ListConfig, ListViewController};
use crate::platform;
use crate::services::catalog_client::{CatalogClient, CatalogClientTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::AppSettings;

/// Central application struct holding the mounted views.
///
/// Generic over the catalog so the same wiring runs against the HTTP client
/// and against in-memory catalogs in tests.
pub struct App<C: CatalogClientTrait = CatalogClient> {
    pub db: SharedDatabase,
    pub client: Arc<C>,
    pub list_view: ListViewController<C, BookmarkStore>,
    pub detail_view: tokio::sync::Mutex<DetailViewController<C>>,
    settings_engine: Mutex<SettingsEngine>,
}

impl App<CatalogClient> {
    /// Creates the App from the settings file and the platform data directory.
    ///
    /// `settings_path` and `db_path` override the default locations.
    pub fn new(
        settings_path: Option<String>,
        db_path: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = match settings_engine.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "falling back to default settings");
                AppSettings::default()
            }
        };

        let db_path = db_path.unwrap_or_else(|| platform::database_path(&settings.storage.database_file));
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&db_path)?;
        info!(path = %db_path.display(), "database opened");

        let client = CatalogClient::new(&settings.api)?;
        Ok(Self::with_client(Arc::new(client), db, settings_engine))
    }
}

impl<C: CatalogClientTrait> App<C> {
    /// Wires an App around an existing client and database.
    pub fn with_client(client: Arc<C>, db: Database, settings_engine: SettingsEngine) -> Self {
        let settings = settings_engine.get_settings().clone();
        let db = db.into_shared();

        let store = BookmarkStore::new(db.clone(), &settings.storage.saved_list_key);
        let list_view = ListViewController::new(client.clone(), store, ListConfig::from(&settings.list));
        let detail_view = tokio::sync::Mutex::new(DetailViewController::new(client.clone()));

        Self {
            db,
            client,
            list_view,
            detail_view,
            settings_engine: Mutex::new(settings_engine),
        }
    }

    /// Locks the settings engine.
    pub fn settings(&self) -> MutexGuard<'_, SettingsEngine> {
        match self.settings_engine.lock() {
            Ok(engine) => engine,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
