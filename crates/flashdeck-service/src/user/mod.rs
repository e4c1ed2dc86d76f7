//! Account use cases: self-service and administration.

pub mod admin;
pub mod service;

pub use admin::AdminUserService;
pub use service::{LoginOutcome, UserService};
