//! HTTP client for the remote chat service.
//!
//! Implements the `ChatApi` trait over `reqwest` with JSON bodies.

mod api;
mod client;
mod config;

pub use client::HttpChatApi;
pub use config::HttpConfig;
