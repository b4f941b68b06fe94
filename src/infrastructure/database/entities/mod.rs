//! Database entities module

pub mod maintenance;
pub mod moto;
pub mod user;

pub use maintenance::Entity as Maintenance;
pub use moto::Entity as Moto;
pub use user::Entity as User;
