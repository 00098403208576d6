use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和会话日志文件的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::models::QaRecord;

/// 初始化会话日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n面试问答会话日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一条带时间戳的会话记录
pub fn append_session_entry(log_file_path: &str, entry: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        entry
    )?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `service_url`: 生成服务地址
/// - `output_dir`: PDF 保存目录
pub fn log_startup(service_url: &str, output_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 面试问答生成");
    info!("🌐 生成服务: {}", service_url);
    info!("📁 导出目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录生成结果概要
pub fn log_generation_summary(record: &QaRecord) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 岗位: {}", truncate_text(record.role(), 60));
    info!(
        "📊 技术题 {} 道 / 个人题 {} 道",
        record.technical().len(),
        record.personal().len()
    );
    info!("💡 输入 :copy 复制, :download 下载 PDF");
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("面试问答生成", 2), "面试...");
    }

    #[test]
    fn test_session_log_header_and_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        append_session_entry(path, "生成成功: SRE").unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("面试问答会话日志"));
        assert!(content.trim_end().ends_with("生成成功: SRE"));
    }
}
