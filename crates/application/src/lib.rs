//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、成员快照扇出、
//! 以及对外部适配器（例如通知投递器、时钟）的抽象。

pub mod clock;
pub mod dispatcher;
pub mod error;
pub mod pending;
pub mod repository;
pub mod router;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatcher::{DispatchError, NotificationDispatcher};
pub use error::{ApplicationError, ApplicationResult};
pub use pending::PendingDeliveries;
pub use repository::{RoomStore, UserRepository};
pub use router::DeliveryRouter;
pub use services::{
    ChatService, ChatServiceDependencies, JoinRoomRequest, LeaveRoomRequest, PostMessageRequest,
    RegisterUserRequest, UserService, UserServiceDependencies,
};
