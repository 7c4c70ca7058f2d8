use async_trait::async_trait;
use domain::DeliveryTask;
use thiserror::Error;

/// 投递错误。
///
/// 具体失败原因（网络、设备未注册等）对核心不透明，
/// 核心只记录失败，不做重试。
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch failed: {0}")]
    Failed(String),

    #[error("dispatch timed out after {millis}ms")]
    Timeout { millis: u64 },
}

impl DispatchError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn timeout(duration: std::time::Duration) -> Self {
        Self::Timeout {
            millis: duration.as_millis() as u64,
        }
    }
}

/// 通知投递器：把一条投递任务推给目标设备。
///
/// 这是核心的外部协作接口，重试策略（如果有）属于具体实现。
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, task: DeliveryTask) -> Result<(), DispatchError>;
}
