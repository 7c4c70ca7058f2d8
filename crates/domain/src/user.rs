use crate::value_objects::{DeliveryToken, DisplayName, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: DisplayName,
    pub delivery_token: DeliveryToken,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn register(
        id: UserId,
        display_name: DisplayName,
        delivery_token: DeliveryToken,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            delivery_token,
            created_at: now,
            updated_at: now,
        }
    }

    /// 重新注册时更新推送令牌。
    pub fn update_token(&mut self, token: DeliveryToken, now: Timestamp) {
        self.delivery_token = token;
        self.updated_at = now;
    }
}
