//! Authentication module: register, login, current profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
