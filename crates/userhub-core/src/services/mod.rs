//! Application services composed from the ports.

mod users;

pub use users::UserService;
