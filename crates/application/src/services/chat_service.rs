use std::sync::Arc;

use domain::{
    DomainError, Message, MessageContent, MessageId, RoomId, RoomMember, RoomSummary, UserId,
};
use uuid::Uuid;

use crate::{
    clock::Clock,
    error::ApplicationResult,
    pending::PendingDeliveries,
    repository::{RoomStore, UserRepository},
    router::DeliveryRouter,
};

#[derive(Debug, Clone)]
pub struct JoinRoomRequest {
    pub room_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct LeaveRoomRequest {
    pub room_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct PostMessageRequest {
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

pub struct ChatServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub room_store: Arc<dyn RoomStore>,
    pub router: Arc<DeliveryRouter>,
    pub pending: Arc<PendingDeliveries>,
    pub clock: Arc<dyn Clock>,
}

/// 聊天编排服务：进出房间、发帖、房间列表。
pub struct ChatService {
    deps: ChatServiceDependencies,
}

impl ChatService {
    pub fn new(deps: ChatServiceDependencies) -> Self {
        Self { deps }
    }

    /// 按创建顺序列出房间及实时成员数。
    pub async fn list_rooms(&self) -> ApplicationResult<Vec<RoomSummary>> {
        let rooms = self.deps.room_store.list().await?;
        Ok(rooms)
    }

    pub async fn join_room(&self, request: JoinRoomRequest) -> ApplicationResult<()> {
        let room_id = RoomId::from(request.room_id);
        let user_id = UserId::from(request.user_id);

        // 先校验用户存在，成员集合只允许包含已注册用户
        let user = self
            .deps
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let member = RoomMember::new(room_id, user.id, self.deps.clock.now());
        let joined = self.deps.room_store.join(member).await?;

        if joined {
            tracing::info!(room_id = %room_id, user_id = %user_id, "用户加入房间");
        }
        Ok(())
    }

    pub async fn leave_room(&self, request: LeaveRoomRequest) -> ApplicationResult<()> {
        let room_id = RoomId::from(request.room_id);
        let user_id = UserId::from(request.user_id);

        // 离开是幂等的：不在房间里也不算错误
        let left = self.deps.room_store.leave(room_id, user_id).await?;

        // 离开之后不给这个成员补投尚未启动的任务
        let purged = self.deps.pending.purge(user_id, room_id);

        if left {
            tracing::info!(
                room_id = %room_id,
                user_id = %user_id,
                purged_tasks = purged,
                "用户离开房间"
            );
        }
        Ok(())
    }

    /// 接受一条消息并对当前成员快照扇出。
    ///
    /// 只要消息通过校验就算接受成功，单个目标的投递结果
    /// 不会影响返回值。
    pub async fn post_message(&self, request: PostMessageRequest) -> ApplicationResult<Message> {
        let room_id = RoomId::from(request.room_id);
        let sender_id = UserId::from(request.sender_id);

        self.deps
            .user_repository
            .find_by_id(sender_id)
            .await?
            .ok_or(DomainError::UserNotFound(sender_id))?;

        if !self.deps.room_store.is_member(room_id, sender_id).await? {
            return Err(DomainError::user_not_in_room(sender_id, room_id).into());
        }

        let content = MessageContent::new(request.content)?;
        let message = Message::new(
            MessageId::from(Uuid::new_v4()),
            room_id,
            sender_id,
            content,
            self.deps.clock.now(),
        );

        let targets = self.deps.router.fan_out(&message).await?;

        tracing::info!(
            room_id = %room_id,
            message_id = %message.id,
            targets = targets,
            "消息已接受"
        );
        Ok(message)
    }
}
