//! Backend configuration

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 托管后端连接配置
///
/// # 环境变量
///
/// | 环境变量 | 说明 |
/// |----------|------|
/// | BACKEND_URL | 后端项目地址，如 `https://xyz.example.co` |
/// | BACKEND_ANON_KEY | 公开访问密钥 |
/// | BACKEND_TIMEOUT_SECS | 请求超时 (秒)，默认 30 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL (without trailing slash)
    pub url: String,
    /// Access key sent as `apikey` and bearer token
    pub anon_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// 从环境变量加载
    ///
    /// URL 或密钥缺失 (或为空) 时返回 `None`，应用进入只读降级模式。
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var("BACKEND_URL").ok(),
            std::env::var("BACKEND_ANON_KEY").ok(),
            std::env::var("BACKEND_TIMEOUT_SECS").ok(),
        )
    }

    fn from_values(
        url: Option<String>,
        key: Option<String>,
        timeout: Option<String>,
    ) -> Option<Self> {
        let url = url.filter(|v| !v.trim().is_empty())?;
        let key = key.filter(|v| !v.trim().is_empty())?;
        let timeout = timeout
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self::new(url.trim(), key.trim()).with_timeout(timeout))
    }

    /// REST endpoint root (`{url}/rest/v1`)
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_disable_backend() {
        assert!(BackendConfig::from_values(None, Some("k".into()), None).is_none());
        assert!(BackendConfig::from_values(Some("http://x".into()), None, None).is_none());
        assert!(BackendConfig::from_values(Some("  ".into()), Some("k".into()), None).is_none());
    }

    #[test]
    fn test_from_values() {
        let config = BackendConfig::from_values(
            Some("https://demo.example.co/".into()),
            Some("anon".into()),
            Some("5".into()),
        )
        .unwrap();
        assert_eq!(config.url, "https://demo.example.co");
        assert_eq!(config.rest_url(), "https://demo.example.co/rest/v1");
        assert_eq!(config.timeout_secs, 5);
    }
}
