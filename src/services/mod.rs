//! Typed wrappers turning domain operations into backend calls.

pub mod auth;
pub mod tasks;

pub use auth::{AuthPaths, AuthService};
pub use tasks::TaskService;
