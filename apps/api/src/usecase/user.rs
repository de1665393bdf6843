//! # ユーザー一覧ユースケース

use std::sync::Arc;

use async_trait::async_trait;
use pokecatch_domain::user::User;
use pokecatch_infra::repository::UserRepository;

use super::UserUseCase;
use crate::error::ApiError;

pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserUseCase for UserUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.user_repository.find_all().await?)
    }
}
