use std::fmt;

// === CatalogError ===

/// Errors returned by the remote catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The request could not be completed or returned a non-success status.
    Transport(String),
    /// The request succeeded but no record matches the identifier.
    NotFound(String),
    /// The response body could not be decoded.
    InvalidResponse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Transport(msg) => write!(f, "Catalog transport error: {}", msg),
            CatalogError::NotFound(id) => write!(f, "Catalog item not found: {}", id),
            CatalogError::InvalidResponse(msg) => {
                write!(f, "Invalid catalog response: {}", msg)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// === BookmarkError ===

/// Errors related to the saved-items store.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkError {
    /// Database operation failed.
    DatabaseError(String),
    /// The identifier list could not be encoded.
    SerializationError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
            BookmarkError::SerializationError(msg) => {
                write!(f, "Bookmark serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === ListError ===

/// Errors surfaced by list view operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// A remote catalog call failed.
    Catalog(CatalogError),
    /// Reading or writing saved items failed.
    Bookmark(BookmarkError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Catalog(e) => write!(f, "List refresh failed: {}", e),
            ListError::Bookmark(e) => write!(f, "Saved items update failed: {}", e),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Catalog(e) => Some(e),
            ListError::Bookmark(e) => Some(e),
        }
    }
}

impl From<CatalogError> for ListError {
    fn from(e: CatalogError) -> Self {
        ListError::Catalog(e)
    }
}

impl From<BookmarkError> for ListError {
    fn from(e: BookmarkError) -> Self {
        ListError::Bookmark(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
