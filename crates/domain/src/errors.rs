//! 领域模型错误定义
//!
//! 定义投递核心中所有可能的领域错误，提供清晰的错误上下文。

use thiserror::Error;

use crate::value_objects::{RoomId, UserId};

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 用户不存在
    #[error("用户不存在: {0}")]
    UserNotFound(UserId),

    /// 房间不存在
    #[error("房间不存在: {0}")]
    RoomNotFound(RoomId),

    /// 用户不在房间中
    #[error("用户不在房间中: 用户 {user_id}, 房间 {room_id}")]
    UserNotInRoom { user_id: UserId, room_id: RoomId },

    /// 验证错误
    #[error("验证失败: {field}: {message}")]
    InvalidArgument { field: String, message: String },
}

impl DomainError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_in_room(user_id: UserId, room_id: RoomId) -> Self {
        Self::UserNotInRoom { user_id, room_id }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
