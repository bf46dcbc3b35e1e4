//! Network operations
//!
//! HTTP client and utilities.

pub mod client;

// Re-export commonly used types
pub use client::HttpClient;
