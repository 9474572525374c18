//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the portal's vocabulary:
//! - The unified error type and result alias used by every HTTP surface
//! - Typed ID wrappers
//!
//! Only things with the same meaning in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
