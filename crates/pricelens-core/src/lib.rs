pub mod app_config;
pub mod config;
pub mod products;
pub mod sites;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{PriceValue, ProductRecord, NO_IMAGE, NO_URL};
pub use sites::{parse_site_list, Site};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown site \"{0}\" (expected one of: amazon, flipkart, snapdeal, croma)")]
    UnknownSite(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
