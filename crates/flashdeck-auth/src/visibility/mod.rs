//! Visibility policy over owned records.

pub mod policy;

pub use policy::VisibilityPolicy;
