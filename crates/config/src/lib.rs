//! 统一配置中心
//!
//! 提供投递核心的全局配置管理，包括：
//! - 投递超时与重试
//! - 本地分发通道容量
//!
//! 配置来源按优先级合并：内置默认值 < `delivery.yaml` < `CHAT_` 前缀环境变量。

use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 消息投递配置
    pub delivery: DeliveryConfig,
}

/// 消息投递配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// 单个目标的投递超时（毫秒）。超时按投递失败处理，不影响发帖调用。
    pub dispatch_timeout_ms: u64,
    /// 本地分发通道容量
    pub channel_capacity: usize,
    /// 带重试的投递器最多尝试次数
    pub retry_max_attempts: u32,
    /// 重试退避基准间隔（毫秒）
    pub retry_base_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout_ms: 3000,
            channel_capacity: 256,
            retry_max_attempts: 3,
            retry_base_delay_ms: 50,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryConfig::default(),
        }
    }
}

impl DeliveryConfig {
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

impl AppConfig {
    /// 加载并校验配置。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Figment::new())
    }

    /// 从给定的 Figment 基础上合并默认值、配置文件和环境变量。
    ///
    /// 测试可以传入预置的 Figment 来注入配置。
    pub fn load_from(base: Figment) -> Result<Self, ConfigError> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file("delivery.yaml"))
            .merge(Env::prefixed("CHAT_").split("__"))
            .merge(base)
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delivery.dispatch_timeout_ms == 0 {
            return Err(ConfigError::InvalidDeliveryConfig(
                "dispatch timeout must be greater than 0".to_string(),
            ));
        }

        if self.delivery.channel_capacity == 0 {
            return Err(ConfigError::InvalidDeliveryConfig(
                "channel capacity must be greater than 0".to_string(),
            ));
        }

        if self.delivery.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidDeliveryConfig(
                "retry attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 配置加载失败
    #[error("配置加载失败: {0}")]
    Load(#[from] figment::Error),

    /// 投递配置不合法
    #[error("投递配置不合法: {0}")]
    InvalidDeliveryConfig(String),
}
