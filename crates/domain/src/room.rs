use crate::errors::DomainError;
use crate::value_objects::{RoomId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(name.into())?;
        Ok(Self {
            id,
            name,
            created_at,
        })
    }

    fn validate_name(name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_argument("room_name", "cannot be empty"));
        }
        if trimmed.len() > 60 {
            return Err(DomainError::invalid_argument("room_name", "too long"));
        }
        Ok(trimmed.to_owned())
    }
}

/// 房间列表投影：房间信息加上实时成员数。
///
/// 客户端的房间列表按房间创建顺序展示，不做重排序。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomSummary {
    pub room: Room,
    pub member_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn room_name_is_validated() {
        let id = RoomId::from(Uuid::new_v4());
        let now = OffsetDateTime::now_utc();

        assert!(Room::new(id, "general", now).is_ok());
        assert!(Room::new(id, "   ", now).is_err());
        assert!(Room::new(id, "x".repeat(61), now).is_err());
    }
}
