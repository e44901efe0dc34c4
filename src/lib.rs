//! Pine Relay - Pine Script generation relay
//!
//! Accepts a trading-logic description over HTTP, forwards a templated prompt
//! to the Gemini `generateContent` API and reshapes the first candidate into
//! a fixed JSON contract.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::RelayError;
pub use models::{BotLogicRequest, PineScriptResponse};
pub use services::{PineScriptGenerator, RelayService};

#[cfg(test)]
mod config_tests;
