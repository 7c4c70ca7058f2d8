//! 聊天投递核心领域模型
//!
//! 包含用户、房间、消息、投递任务等核心实体，以及相关的校验规则。
//! 本层不做任何 I/O，也不依赖异步运行时。

pub mod delivery;
pub mod errors;
pub mod message;
pub mod room;
pub mod room_member;
pub mod user;
pub mod value_objects;

// 重新导出常用类型
pub use delivery::DeliveryTask;
pub use errors::{DomainError, DomainResult};
pub use message::Message;
pub use room::{Room, RoomSummary};
pub use room_member::RoomMember;
pub use user::User;
pub use value_objects::{
    DeliveryToken, DisplayName, MessageContent, MessageId, RoomId, Timestamp, UserId,
};
