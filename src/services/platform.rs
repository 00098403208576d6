//! 平台能力 - 业务能力层
//!
//! 剪贴板与文件保存只暴露最小契约：`copy(text)` 与 `save(bytes, filename)`

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::ExportError;

/// 剪贴板能力
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn copy(&self, text: &str) -> Result<(), ExportError>;
}

/// 文件保存能力，返回最终写入的路径
#[allow(async_fn_in_trait)]
pub trait FileSaver {
    async fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, ExportError>;
}

/// 通过系统剪贴板命令写入（pbcopy / wl-copy / xclip / clip）
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    /// 按当前平台选择剪贴板命令
    pub fn detect() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if cfg!(target_os = "windows") {
            ("clip", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            ("wl-copy", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        };
        Self::with_command(program, args)
    }

    /// 使用自定义命令，文本从标准输入写入
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<(), ExportError> {
        debug!("写入剪贴板: {} ({} 字节)", self.program, text.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExportError::Clipboard(format!("无法启动 {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ExportError::Clipboard(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ExportError::Clipboard(e.to_string()))?;
        if !status.success() {
            return Err(ExportError::Clipboard(format!(
                "{} 退出状态: {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// 内存剪贴板（测试和无图形环境使用）
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次写入的内容
    pub fn last(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.last().cloned())
    }

    pub fn copies(&self) -> usize {
        self.contents.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Clipboard for MemoryClipboard {
    async fn copy(&self, text: &str) -> Result<(), ExportError> {
        self.contents
            .lock()
            .map_err(|e| ExportError::Clipboard(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

/// 保存到指定目录
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSaver for DirectorySaver {
    async fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, ExportError> {
        // 只接受单个文件名，不允许借文件名跳出目标目录
        if filename.contains(['/', '\\']) {
            return Err(ExportError::save_failed(
                filename,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "文件名包含路径分隔符"),
            ));
        }

        let path = self.dir.join(filename);
        let path_str = path.display().to_string();

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExportError::save_failed(&path_str, e))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ExportError::save_failed(&path_str, e))?;

        debug!("已保存 {} 字节到 {}", bytes.len(), path_str);
        Ok(path)
    }
}
