pub mod export;
pub mod service;
pub mod store_client;

pub use store_client::DistrictStoreClient;
