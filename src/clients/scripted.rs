//! 预设响应的生成器
//!
//! 按顺序返回预先放入的结果并记录调用次数，用于离线演示与测试

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::clients::generation_client::{GeneratedQa, HealthStatus, QaGenerator};
use crate::error::RequestError;
use crate::models::QaItem;

/// 预设响应的生成器
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<GeneratedQa, RequestError>>>,
    calls: AtomicUsize,
    roles: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个响应
    pub fn push(self, response: Result<GeneratedQa, RequestError>) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
        self
    }

    /// 追加一个成功响应，每组各一道题
    pub fn push_success(self, technical: &str, personal: &str) -> Self {
        self.push(Ok(GeneratedQa {
            technical: vec![QaItem::new(technical, format!("{} answer", technical))],
            personal: vec![QaItem::new(personal, format!("{} answer", personal))],
        }))
    }

    /// 已发出的请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 每次请求携带的岗位
    pub fn roles(&self) -> Vec<String> {
        self.roles.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl QaGenerator for ScriptedGenerator {
    async fn generate(&self, role: &str) -> Result<GeneratedQa, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut roles) = self.roles.lock() {
            roles.push(role.to_string());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(RequestError::service(500, None)))
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            api_key_configured: true,
        })
    }
}
