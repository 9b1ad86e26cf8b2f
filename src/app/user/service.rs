//! 用户业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{parse_user_id, NewUser, User, UserPayload};
use super::repository::UserRepository;
use crate::core::error::CoreError;
use crate::infrastructure::DatabaseError;

const USER_NOT_FOUND: &str = "User not found";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_user(&self, raw_id: &str) -> Result<User, CoreError> {
        let id = parse_user_id(raw_id)?;
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn create_user(&self, payload: UserPayload) -> Result<User, CoreError> {
        let new_user = NewUser::try_from(payload)?;
        let user = self.repository.insert(&new_user).await?;
        info!("Created user: {} ({})", user.email, user.id);
        Ok(user)
    }

    pub async fn update_user(&self, raw_id: &str, payload: UserPayload) -> Result<User, CoreError> {
        let id = parse_user_id(raw_id)?;
        let new_user = NewUser::try_from(payload)?;
        let user = self
            .repository
            .update(id, &new_user)
            .await?
            .ok_or_else(|| CoreError::NotFound(USER_NOT_FOUND.to_string()))?;
        info!("Updated user: {}", user.id);
        Ok(user)
    }

    pub async fn delete_user(&self, raw_id: &str) -> Result<(), CoreError> {
        let id = parse_user_id(raw_id)?;
        if !self.repository.delete(id).await? {
            return Err(CoreError::NotFound(USER_NOT_FOUND.to_string()));
        }
        info!("Deleted user: {}", id);
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.repository.ping().await
    }
}
