// BrewBrowser state managers
// Managers own state: the saved-items store, the search debouncer and the two view controllers.

pub mod bookmark_store;
pub mod debounce;
pub mod detail_view;
pub mod list_view;
