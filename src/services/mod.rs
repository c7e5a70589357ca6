// BrewBrowser services
// Services talk to the outside world: the remote catalog and the settings file.

pub mod catalog_client;
pub mod settings_engine;
