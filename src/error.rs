use thiserror::Error;

/// 服务返回非 2xx 且没有错误信息时的兜底提示
pub const GENERIC_SERVICE_ERROR: &str = "Failed to generate Q&A";

/// 无法连接后端时的兜底提示
pub const BACKEND_UNREACHABLE: &str =
    "Failed to connect to backend. Make sure the generation service is running.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 生成请求错误
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 生成请求错误
///
/// `Display` 的内容就是展示给用户的唯一一条提示
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// 输入为空（不会发起网络请求）
    #[error("Please enter a role or topic")]
    EmptyInput,
    /// 服务返回非 2xx
    #[error("{message}")]
    Service { status: u16, message: String },
    /// 服务返回 2xx 但结构不符合约定
    #[error("Malformed response from generation service: {reason}")]
    MalformedResponse { reason: String },
    /// 网络层失败（连接被拒绝等）
    #[error("Failed to connect to backend. Make sure the generation service is running.")]
    Transport { endpoint: String, reason: String },
}

impl RequestError {
    /// 错误种类（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::EmptyInput => "EmptyInput",
            RequestError::Service { .. } | RequestError::MalformedResponse { .. } => {
                "ServiceError"
            }
            RequestError::Transport { .. } => "TransportError",
        }
    }

    /// 根据状态码和服务端 `error` 字段构造服务错误
    pub fn service(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
        RequestError::Service { status, message }
    }

    /// 创建网络层错误
    pub fn transport(endpoint: impl Into<String>, source: impl std::fmt::Display) -> Self {
        RequestError::Transport {
            endpoint: endpoint.into(),
            reason: source.to_string(),
        }
    }
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 当前没有可导出的结果
    #[error("Nothing to export yet. Generate a Q&A set first.")]
    NothingToExport,
    /// 写入剪贴板失败
    #[error("复制到剪贴板失败: {0}")]
    Clipboard(String),
    /// 保存文件失败
    #[error("保存文件失败 ({path}): {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文档生成失败
    #[error("文档生成失败: {0}")]
    Document(String),
    /// 纯文本无法解析
    #[error("无法解析纯文本导出 (第 {line} 行): {reason}")]
    Parse { line: usize, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ExportError {
    /// 创建文件保存错误
    pub fn save_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        ExportError::Save {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
