use std::sync::Arc;
use std::time::Duration;

use config::DeliveryConfig;
use domain::{DeliveryTask, DomainResult, Message};

use crate::dispatcher::{DispatchError, NotificationDispatcher};
use crate::pending::PendingDeliveries;
use crate::repository::RoomStore;

/// 投递路由器：把一条消息扇出成逐个成员的投递任务。
///
/// 扇出基于发帖时刻的成员快照，发送者被排除（发送者通过自己
/// 客户端的本地回显看到消息，不走推送）。每个目标在独立的任务里
/// 投递，单个目标失败或超时不影响其他目标，也不影响发帖调用。
pub struct DeliveryRouter {
    room_store: Arc<dyn RoomStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    pending: Arc<PendingDeliveries>,
    dispatch_timeout: Duration,
}

impl DeliveryRouter {
    pub fn new(
        room_store: Arc<dyn RoomStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        pending: Arc<PendingDeliveries>,
        config: &DeliveryConfig,
    ) -> Self {
        Self {
            room_store,
            dispatcher,
            pending,
            dispatch_timeout: config.dispatch_timeout(),
        }
    }

    /// 对一条消息做成员快照扇出，返回创建的投递任务数。
    ///
    /// 投递是发射后不管的：本方法在所有任务派生之后立即返回，
    /// 不等待任何投递完成。扇出顺序不作保证。
    pub async fn fan_out(&self, message: &Message) -> DomainResult<usize> {
        let members = self.room_store.members_of(message.room_id).await?;

        let mut dispatched = 0;
        for target in members {
            if target == message.sender_id {
                continue;
            }

            let task = DeliveryTask::new(target, message.clone());
            self.pending.enqueue(&task);

            let dispatcher = Arc::clone(&self.dispatcher);
            let pending = Arc::clone(&self.pending);
            let timeout = self.dispatch_timeout;
            tokio::spawn(async move {
                dispatch_one(dispatcher, pending, task, timeout).await;
            });
            dispatched += 1;
        }

        tracing::debug!(
            room_id = %message.room_id,
            message_id = %message.id,
            targets = dispatched,
            "消息扇出完成"
        );
        Ok(dispatched)
    }
}

/// 单个目标的投递：失败域隔离在这里。
async fn dispatch_one(
    dispatcher: Arc<dyn NotificationDispatcher>,
    pending: Arc<PendingDeliveries>,
    task: DeliveryTask,
    timeout: Duration,
) {
    if !pending.claim(&task) {
        // 目标在扇出之后、投递启动之前离开了房间，任务直接丢弃
        tracing::debug!(
            target_user = %task.target_user_id,
            message_id = %task.message.id,
            "任务在启动前已被清除，跳过投递"
        );
        return;
    }

    let target_user = task.target_user_id;
    let message_id = task.message.id;

    let outcome = match tokio::time::timeout(timeout, dispatcher.dispatch(task)).await {
        Ok(result) => result,
        Err(_) => Err(DispatchError::timeout(timeout)),
    };

    match outcome {
        Ok(()) => {
            tracing::debug!(
                target_user = %target_user,
                message_id = %message_id,
                "通知已投递"
            );
        }
        Err(err) => {
            // 投递失败只记录，不向发帖调用传播，也不影响其他目标
            tracing::warn!(
                target_user = %target_user,
                message_id = %message_id,
                error = %err,
                "通知投递失败"
            );
        }
    }
}
