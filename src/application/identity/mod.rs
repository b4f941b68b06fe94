//! Identity module: registration and JWT authentication

pub mod service;

pub use service::{AuthResult, AuthService};
