use async_trait::async_trait;
use domain::{DomainResult, Room, RoomId, RoomMember, RoomSummary, User, UserId};

/// 用户存储。
///
/// 注册产生的用户标识一经签发永不复用，范围内也不会删除用户。
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> DomainResult<User>;

    /// 更新已有用户，用户不存在时返回 `UserNotFound`。
    async fn update(&self, user: User) -> DomainResult<User>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
}

/// 房间与成员集合的存储。
///
/// 并发契约：同一房间上的 join/leave/members_of/is_member 彼此线性化，
/// members_of 永远看不到半完成的加入或离开。跨房间操作可以并行。
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// 登记一个新房间。房间创建本身在核心范围之外，
    /// 这个入口只给运维种子数据和测试用。
    async fn create(&self, room: Room) -> DomainResult<Room>;

    /// 按房间创建顺序列出所有房间及实时成员数，不重排序。
    async fn list(&self) -> DomainResult<Vec<RoomSummary>>;

    /// 幂等加入：已是成员时返回 `false` 并保留原 `joined_at`。
    /// 调用方负责先校验用户存在，保证成员集合只含已注册用户。
    async fn join(&self, member: RoomMember) -> DomainResult<bool>;

    /// 幂等离开：不在房间中返回 `false`，不算错误。
    async fn leave(&self, room_id: RoomId, user_id: UserId) -> DomainResult<bool>;

    /// 当前成员集合的快照。
    async fn members_of(&self, room_id: RoomId) -> DomainResult<Vec<UserId>>;

    async fn is_member(&self, room_id: RoomId, user_id: UserId) -> DomainResult<bool>;
}

/// 内存实现（用于测试和单机部署）
pub mod memory {
    use super::*;
    use domain::DomainError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    pub struct MemoryUserRepository {
        users: RwLock<HashMap<UserId, User>>,
    }

    impl Default for MemoryUserRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemoryUserRepository {
        pub fn new() -> Self {
            Self {
                users: RwLock::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MemoryUserRepository {
        async fn create(&self, user: User) -> DomainResult<User> {
            let mut users = self.users.write().await;
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: User) -> DomainResult<User> {
            let mut users = self.users.write().await;
            if !users.contains_key(&user.id) {
                return Err(DomainError::UserNotFound(user.id));
            }
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
            let users = self.users.read().await;
            Ok(users.get(&id).cloned())
        }
    }

    struct RoomState {
        room: Room,
        members: HashMap<UserId, RoomMember>,
    }

    /// 内存房间存储。
    ///
    /// 外层锁只保护房间注册表（创建房间时写入），成员变更走房间级锁，
    /// 所以同一房间的操作线性化，不同房间互不阻塞。
    pub struct MemoryRoomStore {
        inner: RwLock<RoomsIndex>,
    }

    struct RoomsIndex {
        /// 创建顺序，列表展示依赖它
        order: Vec<RoomId>,
        rooms: HashMap<RoomId, Arc<RwLock<RoomState>>>,
    }

    impl Default for MemoryRoomStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemoryRoomStore {
        pub fn new() -> Self {
            Self {
                inner: RwLock::new(RoomsIndex {
                    order: Vec::new(),
                    rooms: HashMap::new(),
                }),
            }
        }

        async fn room_state(&self, room_id: RoomId) -> DomainResult<Arc<RwLock<RoomState>>> {
            let index = self.inner.read().await;
            index
                .rooms
                .get(&room_id)
                .cloned()
                .ok_or(DomainError::RoomNotFound(room_id))
        }
    }

    #[async_trait]
    impl RoomStore for MemoryRoomStore {
        async fn create(&self, room: Room) -> DomainResult<Room> {
            let mut index = self.inner.write().await;
            if !index.rooms.contains_key(&room.id) {
                index.order.push(room.id);
                index.rooms.insert(
                    room.id,
                    Arc::new(RwLock::new(RoomState {
                        room: room.clone(),
                        members: HashMap::new(),
                    })),
                );
            }
            Ok(room)
        }

        async fn list(&self) -> DomainResult<Vec<RoomSummary>> {
            let index = self.inner.read().await;
            let mut summaries = Vec::with_capacity(index.order.len());
            for room_id in &index.order {
                if let Some(state) = index.rooms.get(room_id) {
                    let state = state.read().await;
                    summaries.push(RoomSummary {
                        room: state.room.clone(),
                        member_count: state.members.len(),
                    });
                }
            }
            Ok(summaries)
        }

        async fn join(&self, member: RoomMember) -> DomainResult<bool> {
            let state = self.room_state(member.room_id).await?;
            let mut state = state.write().await;
            if state.members.contains_key(&member.user_id) {
                // 重复加入是无操作，保留首次的 joined_at
                return Ok(false);
            }
            state.members.insert(member.user_id, member);
            Ok(true)
        }

        async fn leave(&self, room_id: RoomId, user_id: UserId) -> DomainResult<bool> {
            let state = self.room_state(room_id).await?;
            let mut state = state.write().await;
            Ok(state.members.remove(&user_id).is_some())
        }

        async fn members_of(&self, room_id: RoomId) -> DomainResult<Vec<UserId>> {
            let state = self.room_state(room_id).await?;
            let state = state.read().await;
            Ok(state.members.keys().copied().collect())
        }

        async fn is_member(&self, room_id: RoomId, user_id: UserId) -> DomainResult<bool> {
            let state = self.room_state(room_id).await?;
            let state = state.read().await;
            Ok(state.members.contains_key(&user_id))
        }
    }
}
