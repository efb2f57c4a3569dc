//! `relay-gateway`: HTTP client for an OpenAI-compatible chat-completion
//! gateway, exposed to the rest of the workspace as a
//! [`relay_core::generator::Generator`].
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest (relay-core)
//!     │
//!     ▼
//! GatewayClient    ← POST {base_url}/chat/completions, bearer auth
//!     │
//!     ▼
//! ChatCompletion   ← first choice's message content
//!     │
//!     ▼
//! String | ProviderError (429 → RateLimited, 402 → QuotaExhausted, …)
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use relay_core::config::GatewayConfig;
//! use relay_gateway::GatewayClient;
//!
//! let client = GatewayClient::from_config(&GatewayConfig::default())?;
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::GatewayClient;
pub use error::GatewayError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GatewayError>;
