//! 基础设施层：投递核心的适配器实现。
//!
//! 提供进程内的通知分发器、带重试的投递装饰器和通用重试工具。
//! 存储的内存实现位于应用层的 `repository::memory` 模块。

pub mod dispatch;
pub mod retry;

pub use dispatch::{DeliveryStream, LocalNotificationDispatcher, RetryingDispatcher};
pub use retry::{retry_async, Backoff, RetryConfig};
