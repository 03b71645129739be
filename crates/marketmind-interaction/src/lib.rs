//! Gemini-backed implementation of the campaign gateway.

pub mod gemini_api_gateway;
pub mod prompt;

pub use gemini_api_gateway::GeminiApiGateway;
