//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod memory;
pub mod postgres;
pub mod provider_http;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
pub use provider_http::HttpAuthProvider;
