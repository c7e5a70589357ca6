use serde::{Deserialize, Serialize};

use super::beverage::SortOrder;

/// Key of the persisted saved-items slot.
pub const DEFAULT_SAVED_LIST_KEY: &str = "beerApp.savedList";

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub list: ListSettings,
    pub storage: StorageSettings,
}

/// Remote catalog connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` leaves requests without a timeout.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openbrewerydb.org/v1".to_string(),
            request_timeout_secs: None,
            user_agent: format!("brewbrowser/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// List view behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListSettings {
    pub page_size: u32,
    pub sort: SortOrder,
    pub search_debounce_ms: u64,
    pub random_sample_size: u32,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            sort: SortOrder::Asc,
            search_debounce_ms: 500,
            random_sample_size: 10,
        }
    }
}

/// Client-local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub saved_list_key: String,
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            saved_list_key: DEFAULT_SAVED_LIST_KEY.to_string(),
            database_file: "brewbrowser.db".to_string(),
        }
    }
}
