use anyhow::Result;
use interview_qa::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志（先于配置，配置阶段的警告才能输出）
    let log = logger::init();

    // 加载配置
    let config = Config::load()?;
    if let Some(log) = &log {
        log.set_verbose(config.verbose_logging);
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
