use crate::value_objects::{RoomId, Timestamp, UserId};

/// 房间成员关系。
///
/// `joined_at` 固定为首次加入时间，重复加入是幂等操作，不会刷新它。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomMember {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub joined_at: Timestamp,
}

impl RoomMember {
    pub fn new(room_id: RoomId, user_id: UserId, joined_at: Timestamp) -> Self {
        Self {
            room_id,
            user_id,
            joined_at,
        }
    }
}
