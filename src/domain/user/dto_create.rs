use uuid::Uuid;

/// Data required to persist a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
