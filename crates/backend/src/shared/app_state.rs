use crate::domain::a001_fire_district::DistrictStoreClient;
use crate::shared::config::Config;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: DistrictStoreClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: DistrictStoreClient::new(config.store.clone()),
        }
    }
}
