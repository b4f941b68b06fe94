//! Fleet module: moto CRUD, the filtered/sorted/paged listing and each
//! moto's maintenance history

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
