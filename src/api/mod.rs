//! # Chat API
//!
//! The wire contract with the reply server and the HTTP client behind it.
//! Everything above this module speaks [`ChatBackend`]; only
//! [`HttpBackend`] knows about reqwest.

pub mod client;
pub mod types;

pub use client::{ChatBackend, ChatError, HttpBackend};
pub use types::{ChatRequest, ChatResponse};
