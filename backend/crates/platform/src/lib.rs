//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie building and parsing
//! - Client identification (IP, User-Agent) for forwarding and logs
//! - A small JSON-over-HTTP client used to reach the auth provider

pub mod client;
pub mod cookie;
pub mod http;
