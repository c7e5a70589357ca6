use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry as returned by the listing service.
///
/// `is_saved` is never read from the wire. It is filled in by the list view
/// from the bookmark store each time a page is merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeverageRecord {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default)]
    pub brewery_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub latitude: Option<String>,
    #[serde(default, skip_deserializing)]
    pub is_saved: bool,
}

impl BeverageRecord {
    /// Creates a record with only its identity fields set.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Sort direction accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort: SortOrder,
    pub by_name: String,
}

impl ListQuery {
    pub fn new(page: u32, per_page: u32, sort: SortOrder, by_name: &str) -> Self {
        Self {
            page,
            per_page,
            sort,
            by_name: by_name.to_string(),
        }
    }

    /// Query-string pairs for the request. An empty name filter is omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ];
        if !self.by_name.is_empty() {
            pairs.push(("by_name", self.by_name.clone()));
        }
        pairs
    }
}

/// Count information for a (possibly filtered) listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(deserialize_with = "count_from_string_or_number")]
    pub total: u64,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The listing service reports coordinates as numbers on some records and as
/// strings on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn count_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("total is not a non-negative integer: {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("total is not a count: {}", e))),
        other => Err(D::Error::custom(format!("unexpected total: {}", other))),
    }
}
