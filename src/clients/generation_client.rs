/// 生成服务 API 客户端
///
/// 封装所有与远程问答生成服务相关的调用逻辑
use std::time::Instant;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::RequestError;
use crate::models::QaItem;

/// 生成服务成功响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedQa {
    pub technical: Vec<QaItem>,
    pub personal: Vec<QaItem>,
}

/// 错误响应 `{ "error": string }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub api_key_configured: bool,
}

/// 问答生成能力
///
/// 每次调用对应恰好一次出站请求，不重试
#[allow(async_fn_in_trait)]
pub trait QaGenerator {
    async fn generate(&self, role: &str) -> Result<GeneratedQa, RequestError>;

    /// 查询服务健康状态
    async fn health(&self) -> Result<HealthStatus, RequestError>;
}

/// 基于 HTTP 的生成服务客户端
pub struct GenerationClient {
    http: Client,
    base_url: String,
}

impl GenerationClient {
    /// 创建新的客户端
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// 使用已有的 `reqwest::Client`
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl QaGenerator for GenerationClient {
    async fn generate(&self, role: &str) -> Result<GeneratedQa, RequestError> {
        let endpoint = self.endpoint("generate");
        debug!("POST {}，岗位: {}", endpoint, role);
        let started = Instant::now();

        let response = self
            .http
            .post(&endpoint)
            .json(&json!({ "role": role }))
            .send()
            .await
            .map_err(|e| {
                warn!("生成服务无法连接: {}", e);
                RequestError::transport(&endpoint, e)
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(&endpoint, e))?;

        debug!(
            "生成服务响应: {} ({} 字节, 耗时 {:?})",
            status,
            body.len(),
            started.elapsed()
        );

        if !status.is_success() {
            return Err(RequestError::service(status.as_u16(), error_message(&body)));
        }

        decode_generated(&body)
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        let endpoint = self.endpoint("health");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| RequestError::transport(&endpoint, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(&endpoint, e))?;

        if !status.is_success() {
            return Err(RequestError::service(status.as_u16(), error_message(&body)));
        }

        serde_json::from_slice(&body).map_err(|e| RequestError::MalformedResponse {
            reason: e.to_string(),
        })
    }
}

/// 解析成功响应，缺少字段时返回 `MalformedResponse`
pub fn decode_generated(body: &[u8]) -> Result<GeneratedQa, RequestError> {
    serde_json::from_slice(body).map_err(|e| RequestError::MalformedResponse {
        reason: e.to_string(),
    })
}

/// 从错误响应中取出 `error` 字段
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_generated_success() {
        let body = br#"{
            "technical": [{"question": "Explain REST", "answer": "Stateless HTTP."}],
            "personal": [{"question": "Why this role?", "answer": "Growth."}]
        }"#;
        let qa = decode_generated(body).unwrap();
        assert_eq!(qa.technical[0].question, "Explain REST");
        assert_eq!(qa.personal[0].answer, "Growth.");
    }

    #[test]
    fn test_decode_missing_section_is_malformed() {
        let err = decode_generated(br#"{"technical": []}"#).unwrap_err();
        assert!(matches!(err, RequestError::MalformedResponse { .. }));
        assert_eq!(err.kind(), "ServiceError");
    }

    #[test]
    fn test_decode_missing_answer_is_malformed() {
        let err =
            decode_generated(br#"{"technical": [{"question": "q"}], "personal": []}"#).unwrap_err();
        assert!(matches!(err, RequestError::MalformedResponse { .. }));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(br#"{"error": "rate limited"}"#).as_deref(),
            Some("rate limited")
        );
        assert_eq!(error_message(b"<html>oops</html>"), None);
        assert_eq!(error_message(br#"{"detail": "x"}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GenerationClient::new("http://localhost:5000/");
        assert_eq!(client.endpoint("generate"), "http://localhost:5000/generate");
    }
}
