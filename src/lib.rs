//! # Interview Q&A
//!
//! 按岗位请求远程服务生成面试问答，并导出为剪贴板文本或分页 PDF
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有文档缓冲区，只暴露写入能力
//! - `PdfWriter` - 基于 printpdf 内置字体的 PDF 写入器
//!
//! ### ② 业务能力层（Clients / Services）
//! - `clients/` - `QaGenerator` 生成能力，`GenerationClient` 为 HTTP 实现
//! - `services/layout` - 分页排版引擎（纯函数）
//! - `services/text_export` - 剪贴板文本生成与解析
//! - `services/pdf_export` - 排版结果 → 绘制指令 → 文档
//! - `services/platform` - 剪贴板 / 文件保存能力
//!
//! ### ③ 流程层（Workflow）
//! - `LifecycleController` - 单请求状态机（Idle → Loading → Success/Failed）
//! - `Dispatcher` - 把用户命令分发给对应的处理函数
//!
//! ### ④ 应用层
//! - `App` - 终端交互循环
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{GenerationClient, QaGenerator};
pub use config::Config;
pub use error::{AppError, AppResult, ExportError, RequestError};
pub use models::{QaItem, QaRecord, RequestState, Section};
pub use services::{layout, to_plain_text, LayoutConfig, Page};
pub use workflow::{Command, Dispatcher, LifecycleController, Outcome};
