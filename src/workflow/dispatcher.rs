//! 命令分发 - 流程层
//!
//! 每个用户动作对应一个命令处理函数，协作者通过构造函数显式传入

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::{HealthStatus, QaGenerator};
use crate::error::{AppResult, ExportError};
use crate::models::{QaRecord, RequestState};
use crate::services::layout::LayoutConfig;
use crate::services::pdf_export::{document_filename, export_pdf};
use crate::services::platform::{Clipboard, FileSaver};
use crate::services::text_export::to_plain_text;
use crate::workflow::lifecycle::LifecycleController;

/// 用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 为岗位生成问答
    Generate(String),
    /// 复制纯文本到剪贴板
    Copy,
    /// 下载 PDF
    Download,
    /// 查询服务健康状态
    Health,
    /// 退出
    Quit,
}

impl Command {
    /// 解析一行输入：`:copy` / `:download` / `:health` / `:quit`，其余视为岗位
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":copy" | ":c" => Command::Copy,
            ":download" | ":d" => Command::Download,
            ":health" | ":h" => Command::Health,
            ":quit" | ":q" => Command::Quit,
            _ => Command::Generate(line.to_string()),
        }
    }
}

/// 命令执行结果
#[derive(Debug)]
pub enum Outcome {
    /// 生成请求结束后的状态（`Success` 或 `Failed`）
    Request(RequestState),
    /// 已复制
    Copied,
    /// 已保存到路径
    Saved(PathBuf),
    Health(HealthStatus),
    Quit,
}

/// 命令分发器
pub struct Dispatcher<G, C, S> {
    controller: LifecycleController<G>,
    clipboard: C,
    saver: S,
    layout: LayoutConfig,
}

impl<G, C, S> Dispatcher<G, C, S>
where
    G: QaGenerator,
    C: Clipboard,
    S: FileSaver,
{
    pub fn new(controller: LifecycleController<G>, clipboard: C, saver: S, layout: LayoutConfig) -> Self {
        Self {
            controller,
            clipboard,
            saver,
            layout,
        }
    }

    pub fn controller(&self) -> &LifecycleController<G> {
        &self.controller
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// 执行一条命令
    ///
    /// 生成失败不算错误，体现在 `Outcome::Request(Failed)` 中；
    /// 导出失败与健康检查失败以 `Err` 返回
    pub async fn handle(&mut self, command: Command) -> AppResult<Outcome> {
        match command {
            Command::Generate(role) => {
                let state = self.controller.submit(&role).await.clone();
                Ok(Outcome::Request(state))
            }
            Command::Copy => {
                let record = self.require_record()?;
                self.clipboard.copy(&to_plain_text(&record)).await?;
                info!("📋 已复制 {} 道题到剪贴板", record.total_items());
                Ok(Outcome::Copied)
            }
            Command::Download => {
                let record = self.require_record()?;
                let bytes = export_pdf(&record, &self.layout)?;
                let path = self
                    .saver
                    .save(&bytes, &document_filename(record.role()))
                    .await?;
                info!("📄 PDF 已保存至: {}", path.display());
                Ok(Outcome::Saved(path))
            }
            Command::Health => {
                let status = self.controller.generator().health().await?;
                Ok(Outcome::Health(status))
            }
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    fn require_record(&self) -> Result<Arc<QaRecord>, ExportError> {
        self.controller.current_record().ok_or_else(|| {
            warn!("⚠️ 当前没有可导出的结果");
            ExportError::NothingToExport
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ScriptedGenerator;
    use crate::error::{AppError, RequestError};
    use crate::services::platform::{DirectorySaver, MemoryClipboard};

    fn dispatcher(
        generator: ScriptedGenerator,
        dir: &std::path::Path,
    ) -> Dispatcher<ScriptedGenerator, MemoryClipboard, DirectorySaver> {
        Dispatcher::new(
            LifecycleController::new(generator),
            MemoryClipboard::new(),
            DirectorySaver::new(dir),
            LayoutConfig::default(),
        )
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(":copy"), Command::Copy);
        assert_eq!(Command::parse(" :d "), Command::Download);
        assert_eq!(Command::parse(":health"), Command::Health);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(
            Command::parse("Data Engineer"),
            Command::Generate("Data Engineer".to_string())
        );
    }

    #[tokio::test]
    async fn test_export_without_record_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(ScriptedGenerator::new(), dir.path());

        let err = dispatcher.handle(Command::Copy).await.unwrap_err();
        assert!(matches!(err, AppError::Export(ExportError::NothingToExport)));
        let err = dispatcher.handle(Command::Download).await.unwrap_err();
        assert!(matches!(err, AppError::Export(ExportError::NothingToExport)));
        assert_eq!(dispatcher.clipboard().copies(), 0);
    }

    #[tokio::test]
    async fn test_generate_copy_download() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ScriptedGenerator::new().push_success("Explain REST", "Why this role?");
        let mut dispatcher = dispatcher(generator, dir.path());

        let outcome = dispatcher
            .handle(Command::Generate("Software Engineer".to_string()))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Request(RequestState::Success(_))));

        dispatcher.handle(Command::Copy).await.unwrap();
        let copied = dispatcher.clipboard().last().unwrap();
        assert!(copied.starts_with("Interview Q&A for: Software Engineer\n"));
        assert!(copied.contains("Q1: Explain REST\n"));

        let outcome = dispatcher.handle(Command::Download).await.unwrap();
        let Outcome::Saved(path) = outcome else {
            panic!("expected saved outcome, got {:?}", outcome);
        };
        assert_eq!(path, dir.path().join("interview-qa-software-engineer.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_download_with_slash_in_role() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ScriptedGenerator::new().push_success("Explain affordances", "Why design?");
        let mut dispatcher = dispatcher(generator, dir.path());

        dispatcher
            .handle(Command::Generate("UI/UX Designer".to_string()))
            .await
            .unwrap();
        let outcome = dispatcher.handle(Command::Download).await.unwrap();
        let Outcome::Saved(path) = outcome else {
            panic!("expected saved outcome, got {:?}", outcome);
        };

        assert_eq!(path, dir.path().join("interview-qa-ui-ux-designer.pdf"));
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_failed_generation_is_an_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ScriptedGenerator::new()
            .push(Err(RequestError::service(500, Some("rate limited".to_string()))));
        let mut dispatcher = dispatcher(generator, dir.path());

        let outcome = dispatcher
            .handle(Command::Generate("Role".to_string()))
            .await
            .unwrap();
        let Outcome::Request(RequestState::Failed(err)) = outcome else {
            panic!("expected failure, got {:?}", outcome);
        };
        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn test_health_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(ScriptedGenerator::new(), dir.path());

        let outcome = dispatcher.handle(Command::Health).await.unwrap();
        assert!(matches!(outcome, Outcome::Health(ref h) if h.status == "healthy"));
        assert!(matches!(dispatcher.handle(Command::Quit).await.unwrap(), Outcome::Quit));
    }
}
