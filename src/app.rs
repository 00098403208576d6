use crate::clients::GenerationClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::RequestState;
use crate::services::platform::{DirectorySaver, SystemClipboard};
use crate::services::text_export::render_display;
use crate::utils::logging::{append_session_entry, init_log_file, log_generation_summary, log_startup};
use crate::workflow::{Command, Dispatcher, LifecycleController, Outcome};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

type TerminalDispatcher = Dispatcher<GenerationClient, SystemClipboard, DirectorySaver>;

/// 应用主结构
pub struct App {
    config: Config,
    dispatcher: TerminalDispatcher,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化会话日志
        init_log_file(&config.session_log_file)
            .with_context(|| format!("无法创建会话日志: {}", config.session_log_file))?;

        log_startup(&config.service_base_url, &config.output_dir);

        let controller = LifecycleController::new(GenerationClient::new(&config.service_base_url));
        let dispatcher = Dispatcher::new(
            controller,
            SystemClipboard::detect(),
            DirectorySaver::new(&config.output_dir),
            config.layout.clone(),
        );

        Ok(Self { config, dispatcher })
    }

    /// 运行交互循环
    ///
    /// 请求进行中时循环在等待结果，不会读取下一条输入
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("请输入岗位或主题（:copy 复制, :download 下载, :health 检查服务, :quit 退出）");

        loop {
            stdout.write_all(b"role> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await.context("读取输入失败")? else {
                break;
            };

            let command = Command::parse(&line);
            match self.dispatcher.handle(command).await {
                Ok(Outcome::Quit) => break,
                Ok(outcome) => self.report(outcome).await?,
                Err(err) => self.report_error(err),
            }
        }

        info!("👋 会话结束，日志已保存至: {}", self.config.session_log_file);
        Ok(())
    }

    async fn report(&self, outcome: Outcome) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        match outcome {
            Outcome::Request(RequestState::Success(record)) => {
                log_generation_summary(&record);
                stdout.write_all(render_display(&record).as_bytes()).await?;
                self.session_entry(&format!(
                    "生成成功: {} ({} 道题)",
                    record.role(),
                    record.total_items()
                ));
            }
            Outcome::Request(RequestState::Failed(err)) => {
                stdout.write_all(format!("❌ {}\n", err).as_bytes()).await?;
                self.session_entry(&format!("生成失败 ({}): {}", err.kind(), err));
            }
            Outcome::Request(state) => {
                warn!("⚠️ 请求结束于意外状态: {}", state.label());
            }
            Outcome::Copied => {
                stdout.write_all("✅ Copied!\n".as_bytes()).await?;
                self.session_entry("已复制到剪贴板");
            }
            Outcome::Saved(path) => {
                stdout
                    .write_all(format!("📄 {}\n", path.display()).as_bytes())
                    .await?;
                self.session_entry(&format!("已保存 PDF: {}", path.display()));
            }
            Outcome::Health(health) => {
                let configured = if health.api_key_configured { "✓" } else { "✗" };
                stdout
                    .write_all(
                        format!("服务状态: {} (API key {})\n", health.status, configured).as_bytes(),
                    )
                    .await?;
            }
            Outcome::Quit => {}
        }
        stdout.flush().await?;
        Ok(())
    }

    fn report_error(&self, err: AppError) {
        error!("❌ {}", err);
        self.session_entry(&format!("错误: {}", err));
    }

    fn session_entry(&self, entry: &str) {
        if let Err(e) = append_session_entry(&self.config.session_log_file, entry) {
            warn!("⚠️ 写入会话日志失败: {}", e);
        }
    }
}
