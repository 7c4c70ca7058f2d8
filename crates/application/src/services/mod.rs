mod chat_service;
mod user_service;


pub use chat_service::{
    ChatService, ChatServiceDependencies, JoinRoomRequest, LeaveRoomRequest, PostMessageRequest,
};
pub use user_service::{RegisterUserRequest, UserService, UserServiceDependencies};
