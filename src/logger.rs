//! 日志初始化

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// 日志级别调整句柄
///
/// 日志在读取配置之前初始化，配置加载完成后再按 `verbose_logging` 调整级别
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// `verbose` 为真时切换到 debug 级别（`RUST_LOG` 优先）
    pub fn set_verbose(&self, verbose: bool) {
        if let Err(e) = self.filter.reload(build_filter(verbose)) {
            tracing::warn!("⚠️ 调整日志级别失败: {}", e);
        }
    }
}

/// 初始化日志（默认 info 级别，可由 `RUST_LOG` 覆盖）
pub fn init() -> Option<LogHandle> {
    init_with_level(false)
}

/// 初始化日志，`verbose` 为真时默认使用 debug 级别
///
/// 重复调用不会报错，只有第一次调用返回句柄
pub fn init_with_level(verbose: bool) -> Option<LogHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(verbose));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok()
        .map(|_| LogHandle { filter: handle })
}

fn build_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
