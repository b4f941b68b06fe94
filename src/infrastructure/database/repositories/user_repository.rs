use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::{conflict_or_storage, parse_id};
use crate::domain::user::{CreateUserDto, User, UserRepository};
use crate::infrastructure::database::entities::user;
use crate::shared::errors::DomainResult;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    Ok(User {
        id: parse_id("user", &model.id)?,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    })
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: Set(dto.id.to_string()),
            name: Set(dto.name),
            email: Set(dto.email.clone()),
            password_hash: Set(dto.password_hash),
            created_at: Set(Utc::now()),
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| {
                conflict_or_storage(e, || format!("email '{}' already registered", dto.email))
            })?;

        user_model_to_domain(model)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn get_user_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}
