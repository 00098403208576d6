use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::services::layout::LayoutConfig;

/// 默认配置文件名（存在时才读取）
pub const DEFAULT_CONFIG_FILE: &str = "interview_qa.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 生成服务地址
    pub service_base_url: String,
    /// PDF 保存目录
    pub output_dir: String,
    /// 会话日志文件
    pub session_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 文档排版参数
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:5000".to_string(),
            output_dir: ".".to_string(),
            session_log_file: "qa_session.log".to_string(),
            verbose_logging: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// 默认值 + 环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 完整加载流程：默认值 → 配置文件 → 环境变量
    ///
    /// 配置文件路径取 `QA_CONFIG_FILE`，否则尝试当前目录下的 `interview_qa.toml`
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("QA_CONFIG_FILE").ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let base = if Path::new(&path).exists() {
            Self::from_toml_file(Path::new(&path))?
        } else {
            if explicit.is_some() {
                warn!("⚠️ 配置文件不存在: {}，使用默认配置", path);
            }
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            service_base_url: std::env::var("QA_SERVICE_URL").unwrap_or(self.service_base_url),
            output_dir: std::env::var("QA_OUTPUT_DIR").unwrap_or(self.output_dir),
            session_log_file: std::env::var("QA_SESSION_LOG").unwrap_or(self.session_log_file),
            verbose_logging: parse_env("VERBOSE_LOGGING", self.verbose_logging),
            layout: self.layout,
        }
    }
}

/// 解析环境变量，失败时保留原值并记录警告
fn parse_env<T: std::str::FromStr>(var_name: &str, current: T) -> T {
    match std::env::var(var_name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                let err = ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: std::any::type_name::<T>().to_string(),
                };
                warn!("⚠️ {}", err);
                current
            }
        },
        Err(_) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
service_base_url = "http://qa.internal:8080"

[layout]
wrap_columns = 60
"#
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.service_base_url, "http://qa.internal:8080");
        assert_eq!(config.layout.wrap_columns, 60);
        assert_eq!(config.layout.page_height, LayoutConfig::default().page_height);
        assert_eq!(config.output_dir, ".");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service_base_url = ").unwrap();
        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::from_toml_file(Path::new("/nonexistent/interview_qa.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
    }
}
