use qr_client::BackendConfig;
use std::path::PathBuf;

/// 默认桌号列表
const DEFAULT_TABLE_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// 服务器配置 - 点餐终端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (本地存储、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BACKEND_URL | - | 托管后端地址，缺失则进入降级模式 |
/// | BACKEND_ANON_KEY | - | 托管后端访问密钥 |
/// | BACKEND_TIMEOUT_SECS | 30 | 后端请求超时 (秒) |
/// | ADMIN_CODE | - | 后厨口令，为空时后厨无法解锁 |
/// | TABLE_OPTIONS | 1,2,3,4,5 | 可选桌号 (逗号分隔) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/qr HTTP_PORT=8080 ADMIN_CODE=2468 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放本地存储文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 托管后端；`None` 表示降级模式 (只读菜单，不能下单)
    pub backend: Option<BackendConfig>,
    /// 后厨口令
    pub admin_code: String,
    /// 落地页可选桌号
    pub table_options: Vec<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            backend: BackendConfig::from_env(),
            admin_code: std::env::var("ADMIN_CODE").unwrap_or_default(),
            table_options: parse_table_options(std::env::var("TABLE_OPTIONS").ok().as_deref()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 本地存储文件路径
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("local.redb")
    }

    /// 是否配置了托管后端
    pub fn backend_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_table_options(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
        .collect();

    if parsed.is_empty() {
        DEFAULT_TABLE_OPTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}
