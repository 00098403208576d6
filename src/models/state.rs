//! 请求生命周期状态

use std::sync::Arc;

use crate::error::RequestError;
use crate::models::qa::QaRecord;

/// 生成请求的当前状态
///
/// 只由 `LifecycleController` 持有和修改
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// 尚未提交
    #[default]
    Idle,
    /// 请求进行中
    Loading,
    /// 生成成功
    Success(Arc<QaRecord>),
    /// 生成失败，错误信息即用户可见的提示
    Failed(RequestError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// 成功时返回记录
    pub fn record(&self) -> Option<&Arc<QaRecord>> {
        match self {
            RequestState::Success(record) => Some(record),
            _ => None,
        }
    }

    /// 失败时返回错误
    pub fn error(&self) -> Option<&RequestError> {
        match self {
            RequestState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// 状态名（用于日志）
    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Idle => "Idle",
            RequestState::Loading => "Loading",
            RequestState::Success(_) => "Success",
            RequestState::Failed(_) => "Failed",
        }
    }
}
