//! Detail view controller for BrewBrowser.
//!
//! Shows one record, fetched by the identifier taken from the navigation
//! route. Fetch failures are logged and leave the page empty; there is no
//! retry.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::services::catalog_client::CatalogClientTrait;
use crate::types::beverage::BeverageRecord;
use crate::types::detail::{DetailLine, DetailView};
use crate::types::errors::CatalogError;

pub const PHONE_LABEL: &str = "Call us at";
pub const COUNTRY_LABEL: &str = "We are from";
pub const ADDRESS_LABEL: &str = "You can come to us at";
pub const MAP_LABEL: &str = "Or here on your Map";
pub const KIND_LABEL: &str = "Our kind of beer is";

/// Controller behind the per-item detail page.
pub struct DetailViewController<C> {
    client: Arc<C>,
    current_id: Option<String>,
    record: Option<BeverageRecord>,
}

impl<C: CatalogClientTrait> DetailViewController<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            current_id: None,
            record: None,
        }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn record(&self) -> Option<&BeverageRecord> {
        self.record.as_ref()
    }

    /// Navigates to `id`.
    ///
    /// Fetches whenever the identifier changes or the previous fetch did not
    /// produce a record. Returns the record if one is loaded afterwards.
    pub async fn open(&mut self, id: &str) -> Option<&BeverageRecord> {
        if self.current_id.as_deref() == Some(id) && self.record.is_some() {
            debug!(%id, "detail already loaded");
            return self.record.as_ref();
        }

        self.current_id = Some(id.to_string());
        self.record = None;

        match self.client.get_item(id).await {
            Ok(record) => self.record = Some(record),
            Err(CatalogError::NotFound(_)) => warn!(%id, "detail item not found"),
            Err(e) => error!(%id, error = %e, "detail fetch failed"),
        }
        self.record.as_ref()
    }

    /// Renders the current record. Every field is empty while unresolved.
    pub fn view(&self) -> DetailView {
        match &self.record {
            Some(record) => render(record),
            None => render(&BeverageRecord::default()),
        }
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

/// "street, city, state postal" with absent parts left out.
fn address(record: &BeverageRecord) -> String {
    let region = [&record.state_province, &record.postal_code]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    [record.street.clone(), record.city.clone(), Some(region)]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn coordinates(record: &BeverageRecord) -> String {
    match (&record.longitude, &record.latitude) {
        (Some(lon), Some(lat)) => format!("{}, {}", lon, lat),
        _ => String::new(),
    }
}

/// Builds the labelled detail page for a record.
pub fn render(record: &BeverageRecord) -> DetailView {
    let line = |label: &str, content: String| DetailLine {
        label: label.to_string(),
        content,
    };

    DetailView {
        heading: record.name.clone(),
        website_url: text(&record.website_url),
        lines: vec![
            line(PHONE_LABEL, text(&record.phone)),
            line(COUNTRY_LABEL, text(&record.country)),
            line(ADDRESS_LABEL, address(record)),
            line(MAP_LABEL, coordinates(record)),
            line(KIND_LABEL, text(&record.brewery_type)),
        ],
    }
}

/// Fetches `count` random records. Failures are logged and yield an empty list.
pub async fn random_sample<C: CatalogClientTrait>(client: &C, count: u32) -> Vec<BeverageRecord> {
    match client.get_random_sample(count).await {
        Ok(records) => records,
        Err(e) => {
            error!(count, error = %e, "random sample fetch failed");
            Vec::new()
        }
    }
}
