use crate::message::Message;
use crate::value_objects::UserId;

/// 一条待投递的通知义务：把一条消息推给一个目标用户。
///
/// `attempt` 从 0 开始，只有带重试策略的投递器会递增它，
/// 核心本身不做重试。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeliveryTask {
    pub target_user_id: UserId,
    pub message: Message,
    pub attempt: u32,
}

impl DeliveryTask {
    pub fn new(target_user_id: UserId, message: Message) -> Self {
        Self {
            target_user_id,
            message,
            attempt: 0,
        }
    }

    /// 投递器重试前递增尝试计数。
    pub fn bump_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }
}
