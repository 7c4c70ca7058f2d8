use std::sync::Arc;

use domain::{DeliveryToken, DisplayName, DomainError, User, UserId};
use uuid::Uuid;

use crate::{clock::Clock, error::ApplicationResult, repository::UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub display_name: String,
    pub delivery_token: String,
}

pub struct UserServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub clock: Arc<dyn Clock>,
}

/// 用户注册表服务。
///
/// 注册永远创建新用户，不按显示名合并：客户端每次连接房间前都会
/// 重新注册，同名的两次注册就是两个用户。
pub struct UserService {
    deps: UserServiceDependencies,
}

impl UserService {
    pub fn new(deps: UserServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> ApplicationResult<User> {
        let display_name = DisplayName::parse(request.display_name)?;
        let delivery_token = DeliveryToken::new(request.delivery_token);
        let now = self.deps.clock.now();

        let user = User::register(
            UserId::from(Uuid::new_v4()),
            display_name,
            delivery_token,
            now,
        );
        let created = self.deps.user_repository.create(user).await?;

        tracing::info!(user_id = %created.id, "用户注册完成");
        Ok(created)
    }

    /// 重新注册时刷新推送令牌。
    pub async fn update_token(&self, user_id: Uuid, token: String) -> ApplicationResult<User> {
        let user_id = UserId::from(user_id);

        let mut user = self
            .deps
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        user.update_token(DeliveryToken::new(token), self.deps.clock.now());
        let updated = self.deps.user_repository.update(user).await?;
        Ok(updated)
    }

    pub async fn lookup(&self, user_id: Uuid) -> ApplicationResult<User> {
        let user_id = UserId::from(user_id);
        let user = self
            .deps
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(user)
    }
}
