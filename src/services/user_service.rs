use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{request::UpdateProfileRequest, response::UserDto},
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserDto> {
        self.find_user(user_id).await.map(UserDto::from)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<UserDto> {
        request.validate()?;

        let mut user = self.find_user(user_id).await?;
        if let Some(email) = request.email {
            user.email = email;
        }
        let user = user
            .with_display_name(request.display_name)
            .with_lang(request.lang);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    async fn find_user(&self, user_id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }
}
