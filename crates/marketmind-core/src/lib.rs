//! Domain layer for MarketMind.
//!
//! Holds the campaign model, the pure state transitions the orchestrator
//! applies, the gateway and secret service traits, and configuration types.

pub mod account;
pub mod campaign;
pub mod config;
pub mod error;
pub mod gateway;
pub mod secret;

// Re-export common error type
pub use error::{GenerationStage, MarketmindError};
