//! User aggregate
//!
//! Contains the User entity, creation DTO, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{normalize_email, User};
pub use repository::UserRepository;
