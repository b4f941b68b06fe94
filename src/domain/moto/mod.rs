//! Moto aggregate
//!
//! The motorcycle entity, its listing fields and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Moto, MotoFilter, MotoInput, MotoSortField, MotoStatus, MIN_YEAR};
pub use repository::MotoRepository;
