//! File-backed configuration for MarketMind.

pub mod config_service;
pub mod paths;
pub mod secret_service;

pub use config_service::ConfigService;
pub use paths::MarketmindPaths;
pub use secret_service::SecretServiceImpl;
