//! 端到端扇出流程测试：注册、进房、发帖、本地分发。

use std::sync::Arc;
use std::time::Duration;

use application::repository::memory::{MemoryRoomStore, MemoryUserRepository};
use application::{
    ChatService, ChatServiceDependencies, Clock, DeliveryRouter, JoinRoomRequest,
    NotificationDispatcher, PendingDeliveries, PostMessageRequest, RegisterUserRequest, RoomStore,
    SystemClock, UserService, UserServiceDependencies,
};
use config::DeliveryConfig;
use domain::{Room, RoomId, UserId};
use infrastructure::LocalNotificationDispatcher;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

struct TestStack {
    chat: ChatService,
    users: UserService,
    dispatcher: Arc<LocalNotificationDispatcher>,
    room_store: Arc<MemoryRoomStore>,
}

fn create_stack(config: &DeliveryConfig) -> TestStack {
    let user_repository = Arc::new(MemoryUserRepository::new());
    let room_store = Arc::new(MemoryRoomStore::new());
    let pending = Arc::new(PendingDeliveries::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let dispatcher = Arc::new(LocalNotificationDispatcher::from_config(config));

    let router = Arc::new(DeliveryRouter::new(
        room_store.clone() as Arc<dyn RoomStore>,
        dispatcher.clone() as Arc<dyn NotificationDispatcher>,
        pending.clone(),
        config,
    ));

    let users = UserService::new(UserServiceDependencies {
        user_repository: user_repository.clone(),
        clock: clock.clone(),
    });

    let chat = ChatService::new(ChatServiceDependencies {
        user_repository,
        room_store: room_store.clone() as Arc<dyn RoomStore>,
        router,
        pending,
        clock,
    });

    TestStack {
        chat,
        users,
        dispatcher,
        room_store,
    }
}

async fn seed_room(store: &MemoryRoomStore, name: &str) -> RoomId {
    let room_id = RoomId::from(Uuid::new_v4());
    let room = Room::new(room_id, name, OffsetDateTime::now_utc()).unwrap();
    store.create(room).await.unwrap();
    room_id
}

async fn register(stack: &TestStack, name: &str) -> UserId {
    stack
        .users
        .register(RegisterUserRequest {
            display_name: name.to_string(),
            delivery_token: String::new(),
        })
        .await
        .unwrap()
        .id
}

async fn join(stack: &TestStack, room_id: RoomId, user_id: UserId) {
    stack
        .chat
        .join_room(JoinRoomRequest {
            room_id: room_id.into(),
            user_id: user_id.into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn connected_member_receives_posted_message() {
    init_tracing();
    let stack = create_stack(&DeliveryConfig::default());

    let alice = register(&stack, "Alice").await;
    let bob = register(&stack, "Bob").await;
    let general = seed_room(&stack.room_store, "general").await;
    join(&stack, general, alice).await;
    join(&stack, general, bob).await;

    // Bob 的会话订阅自己的投递流
    let mut bob_stream = stack.dispatcher.subscribe_user(bob);

    let message = stack
        .chat
        .post_message(PostMessageRequest {
            room_id: general.into(),
            sender_id: alice.into(),
            content: "hi".to_string(),
        })
        .await
        .unwrap();

    let task = tokio::time::timeout(Duration::from_secs(1), bob_stream.recv())
        .await
        .expect("timed out waiting for delivery")
        .expect("delivery stream closed");

    assert_eq!(task.target_user_id, bob);
    assert_eq!(task.message.id, message.id);
    assert_eq!(task.message.content.as_str(), "hi");
    assert_eq!(task.attempt, 0);
}

#[tokio::test]
async fn delivery_stream_only_yields_own_tasks() {
    init_tracing();
    let stack = create_stack(&DeliveryConfig::default());

    let alice = register(&stack, "Alice").await;
    let bob = register(&stack, "Bob").await;
    let carol = register(&stack, "Carol").await;
    let general = seed_room(&stack.room_store, "general").await;
    join(&stack, general, alice).await;
    join(&stack, general, bob).await;
    join(&stack, general, carol).await;

    let mut carol_stream = stack.dispatcher.subscribe_user(carol);

    stack
        .chat
        .post_message(PostMessageRequest {
            room_id: general.into(),
            sender_id: alice.into(),
            content: "hello".to_string(),
        })
        .await
        .unwrap();

    // Carol 只看到发给自己的那一条，Bob 的任务被过滤掉
    let task = tokio::time::timeout(Duration::from_secs(1), carol_stream.recv())
        .await
        .expect("timed out waiting for delivery")
        .expect("delivery stream closed");
    assert_eq!(task.target_user_id, carol);

    let extra = tokio::time::timeout(Duration::from_millis(100), carol_stream.recv()).await;
    assert!(extra.is_err(), "carol received a task meant for someone else");
}

#[tokio::test]
async fn posting_with_no_subscribers_still_succeeds() {
    init_tracing();
    let stack = create_stack(&DeliveryConfig::default());

    let alice = register(&stack, "Alice").await;
    let bob = register(&stack, "Bob").await;
    let general = seed_room(&stack.room_store, "general").await;
    join(&stack, general, alice).await;
    join(&stack, general, bob).await;

    // 没人在线订阅，发帖依然成功
    let message = stack
        .chat
        .post_message(PostMessageRequest {
            room_id: general.into(),
            sender_id: alice.into(),
            content: "anyone here?".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(message.room_id, general);
}

#[tokio::test]
async fn sender_session_gets_no_push_for_own_message() {
    init_tracing();
    let stack = create_stack(&DeliveryConfig::default());

    let alice = register(&stack, "Alice").await;
    let bob = register(&stack, "Bob").await;
    let general = seed_room(&stack.room_store, "general").await;
    join(&stack, general, alice).await;
    join(&stack, general, bob).await;

    // 发送者靠客户端本地回显，不走推送
    let mut alice_stream = stack.dispatcher.subscribe_user(alice);

    stack
        .chat
        .post_message(PostMessageRequest {
            room_id: general.into(),
            sender_id: alice.into(),
            content: "hi".to_string(),
        })
        .await
        .unwrap();

    let echo = tokio::time::timeout(Duration::from_millis(100), alice_stream.recv()).await;
    assert!(echo.is_err(), "sender received their own message as a push");
}
