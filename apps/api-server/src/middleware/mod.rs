//! Middleware modules.

pub mod error;
pub mod uuid_guard;

pub use uuid_guard::UuidGuard;
