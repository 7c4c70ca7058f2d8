use domain::DomainError;
use thiserror::Error;

use crate::dispatcher::DispatchError;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 领域层错误
    #[error("领域错误: {0}")]
    Domain(#[from] DomainError),

    /// 投递错误
    #[error("投递错误: {0}")]
    Dispatch(#[from] DispatchError),

    /// 基础设施层错误
    #[error("基础设施错误: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    /// 创建基础设施错误
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ApplicationError::Infrastructure(message.into())
    }
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;
