//! Herodex Catalog Services
//!
//! Hero catalog client: favorites persistence, page selection from URL
//! query state, and cached catalog queries over HTTP.
//!
//! ## Quick start
//!
//! ```no_run
//! use herodex::app::Session;
//! use herodex::config::Config;
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod navigation;
pub mod network;
pub mod providers;
