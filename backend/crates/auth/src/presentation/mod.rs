//! Presentation Layer
//!
//! HTTP handlers, pages, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod views;

pub use extract::{Client, CurrentIdentity};
pub use handlers::AuthContext;
pub use middleware::{require_identity, resolve_identity};
pub use router::{auth_router, auth_router_generic, router_with_context};
