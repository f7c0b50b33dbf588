//! # nkv-client
//!
//! Client library for a notifying key-value store reachable over a
//! line-oriented text protocol:
//! - Single-shot GET/PUT/DEL calls, one short-lived connection per call
//! - Long-lived per-key subscriptions with automatic reconnect
//! - Binary-safe payloads carried as base64 inside the text transport
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Client                            │
//! │        (client_id, key → subscription_id map)            │
//! └──────┬───────────────────────────────┬───────────────────┘
//!        │ one connection per call       │ spawn per key
//!        ▼                               ▼
//! ┌─────────────┐                ┌───────────────┐
//! │   Codec     │                │  Subscriber   │──▶ reconnect loop
//! │ (encode/    │                │ (SUB + read)  │
//! │  decode)    │                └───────┬───────┘
//! └─────────────┘                        │ unbuffered channel
//!                                        ▼
//!                                ┌───────────────┐
//!                                │  Dispatcher   │──▶ caller handler
//!                                └───────────────┘
//! ```
//!
//! ## Delivery semantics
//!
//! Notifications for one subscription reach the handler sequentially, in
//! server send order for the current connection. Nothing is tracked across
//! reconnects: updates the server sent while the connection was down are
//! lost silently (at-most-once delivery).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NkvError, Result};
pub use config::ClientConfig;
pub use client::{Client, NO_REQUEST_ID};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of nkv-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
