//! # Userhub Core
//!
//! The domain layer of the user service.
//! This crate contains entities, input validation, the port traits that
//! infrastructure implements, and the `UserService` operations built on them.
//! It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::UserService;
