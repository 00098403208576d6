//! 请求生命周期 - 流程层
//!
//! 核心职责：驱动单个生成请求的状态机
//!
//! ```text
//! Idle / Success / Failed --submit(有效)--> Loading
//! 任意状态 ------------------submit(空)---> Failed(EmptyInput)
//! Loading --成功----------------------------> Success(record)
//! Loading --服务错误 / 网络错误-------------> Failed(message)
//! ```
//!
//! 没有终止状态，控制器可无限次复用。

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::clients::QaGenerator;
use crate::error::RequestError;
use crate::models::{QaRecord, RequestState};
use crate::utils::logging::truncate_text;

/// 状态广播缓冲区大小
const STATE_CHANNEL_CAPACITY: usize = 16;

/// 生命周期控制器
///
/// - 独占持有 `RequestState`
/// - `submit` 需要 `&mut self`，同一控制器上不可能同时存在两个请求
/// - 不取消、不重试、不超时：挂起的请求会让状态停留在 `Loading`
pub struct LifecycleController<G> {
    generator: G,
    state: RequestState,
    state_tx: broadcast::Sender<RequestState>,
}

impl<G: QaGenerator> LifecycleController<G> {
    /// 创建新的控制器，初始状态为 `Idle`
    pub fn new(generator: G) -> Self {
        let (state_tx, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);
        Self {
            generator,
            state: RequestState::Idle,
            state_tx,
        }
    }

    /// 当前状态
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// 当前可导出的记录（仅 `Success` 状态）
    pub fn current_record(&self) -> Option<Arc<QaRecord>> {
        self.state.record().cloned()
    }

    /// 订阅状态变化（包括 `Loading`）
    pub fn subscribe(&self) -> broadcast::Receiver<RequestState> {
        self.state_tx.subscribe()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 提交生成请求
    ///
    /// 空输入直接进入 `Failed(EmptyInput)`，不发起网络请求；
    /// 否则进入 `Loading`，发出恰好一次请求，并根据结果进入 `Success` 或 `Failed`。
    pub async fn submit(&mut self, role: &str) -> &RequestState {
        let role = role.trim();

        if role.is_empty() {
            warn!("⚠️ 岗位为空，不发起请求");
            self.transition(RequestState::Failed(RequestError::EmptyInput));
            return &self.state;
        }

        info!("🤖 正在为「{}」生成面试问答...", truncate_text(role, 60));
        self.transition(RequestState::Loading);

        let next = match self.generator.generate(role).await {
            Ok(generated) => {
                let record = QaRecord::new(role, generated.technical, generated.personal);
                info!(
                    "✓ 生成完成: 技术题 {} 道, 个人题 {} 道",
                    record.technical().len(),
                    record.personal().len()
                );
                RequestState::Success(Arc::new(record))
            }
            Err(err) => {
                warn!("❌ 生成失败 ({}): {}", err.kind(), err);
                RequestState::Failed(err)
            }
        };

        self.transition(next);
        &self.state
    }

    fn transition(&mut self, next: RequestState) {
        debug!("状态变化: {} → {}", self.state.label(), next.label());
        self.state = next;
        // 没有订阅者时发送失败，忽略即可
        let _ = self.state_tx.send(self.state.clone());
    }
}
