use std::sync::Arc;

use application::{DispatchError, NotificationDispatcher};
use async_trait::async_trait;
use config::DeliveryConfig;
use domain::{DeliveryTask, UserId};
use tokio::sync::broadcast;

use crate::retry::{retry_async, Backoff, RetryConfig};

/// 本地通知分发器：把投递任务广播给进程内的订阅者。
///
/// 一个订阅对应一条已连接的客户端会话。没有任何订阅者时投递
/// 视为成功，设备重连后由客户端自己的拉取逻辑补偿。
#[derive(Clone)]
pub struct LocalNotificationDispatcher {
    sender: broadcast::Sender<DeliveryTask>,
}

impl LocalNotificationDispatcher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self::new(config.channel_capacity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeliveryTask> {
        self.sender.subscribe()
    }

    /// 为某个用户的会话订阅投递流。
    pub fn subscribe_user(&self, user_id: UserId) -> DeliveryStream {
        DeliveryStream::new(self.sender.subscribe(), user_id)
    }
}

#[async_trait]
impl NotificationDispatcher for LocalNotificationDispatcher {
    async fn dispatch(&self, task: DeliveryTask) -> Result<(), DispatchError> {
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(task)
            .map_err(|err| DispatchError::failed(err.to_string()))?;
        Ok(())
    }
}

/// 单个用户的投递流
pub struct DeliveryStream {
    receiver: broadcast::Receiver<DeliveryTask>,
    user_id: UserId,
}

impl DeliveryStream {
    pub fn new(receiver: broadcast::Receiver<DeliveryTask>, user_id: UserId) -> Self {
        Self { receiver, user_id }
    }

    pub async fn recv(&mut self) -> Option<DeliveryTask> {
        loop {
            match self.receiver.recv().await {
                Ok(task) => {
                    // 只留下属于当前用户的任务
                    if task.target_user_id == self.user_id {
                        return Some(task);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        user_id = %self.user_id,
                        skipped,
                        "投递流滞后，跳过积压任务"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// 带重试的投递装饰器。
///
/// 重试策略属于投递器，核心本身不做重试；每次重试前递增
/// 任务的尝试计数。
pub struct RetryingDispatcher {
    inner: Arc<dyn NotificationDispatcher>,
    config: RetryConfig,
}

impl RetryingDispatcher {
    pub fn new(inner: Arc<dyn NotificationDispatcher>, delivery: &DeliveryConfig) -> Self {
        Self {
            inner,
            config: RetryConfig {
                max_attempts: delivery.retry_max_attempts,
                backoff: Backoff::exponential(delivery.retry_base_delay()),
            },
        }
    }
}

#[async_trait]
impl NotificationDispatcher for RetryingDispatcher {
    async fn dispatch(&self, task: DeliveryTask) -> Result<(), DispatchError> {
        retry_async(self.config.clone(), |attempt| {
            let mut task = task.clone();
            for _ in 1..attempt {
                task.bump_attempt();
            }
            let inner = Arc::clone(&self.inner);
            async move { inner.dispatch(task).await }
        })
        .await
    }
}
