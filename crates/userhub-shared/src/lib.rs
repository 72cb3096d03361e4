//! # Userhub Shared
//!
//! Wire-level types shared by the server and its clients: response
//! envelopes and query parameters.

pub mod dto;
pub mod response;

pub use dto::PageQuery;
pub use response::{ApiResponse, ErrorResponse};
