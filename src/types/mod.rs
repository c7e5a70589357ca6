// BrewBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod beverage;
pub mod detail;
pub mod errors;
pub mod list;
pub mod settings;
