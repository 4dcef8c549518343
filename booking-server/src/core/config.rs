use std::path::PathBuf;

/// 服务器配置 - 预订平台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/luxstay | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | MEILI_URL | http://localhost:7700 | 搜索索引地址 |
/// | MEILI_MASTER_KEY | (无) | 搜索索引密钥 |
/// | PROPERTY_INDEX | properties | 房源索引名 |
/// | MEDIA_URL_TTL_SECS | 3600 | 签名链接有效期(秒) |
/// | MEDIA_SIGNING_KEY | (随机) | 签名密钥 (hex) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SEARCH_RETRY_ATTEMPTS | 3 | 搜索请求重试次数 |
/// | SEARCH_RETRY_BASE_MS | 100 | 重试退避基准(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/luxstay HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、媒体文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 搜索索引配置 ===
    /// Meilisearch 地址
    pub meili_url: String,
    /// Meilisearch 密钥
    pub meili_master_key: Option<String>,
    /// 房源索引名
    pub property_index: String,

    // === 媒体配置 ===
    /// 签名链接有效期 (秒)
    pub media_url_ttl_secs: u64,
    /// 签名密钥 (hex 编码)；未设置时启动随机生成
    pub media_signing_key: Option<String>,

    // === 弹性配置 ===
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 搜索请求重试次数
    pub search_retry_attempts: u32,
    /// 重试退避基准 (毫秒)，逐次翻倍
    pub search_retry_base_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/luxstay".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            meili_url: std::env::var("MEILI_URL")
                .unwrap_or_else(|_| "http://localhost:7700".into()),
            meili_master_key: std::env::var("MEILI_MASTER_KEY").ok(),
            property_index: std::env::var("PROPERTY_INDEX").unwrap_or_else(|_| "properties".into()),

            media_url_ttl_secs: std::env::var("MEDIA_URL_TTL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3600),
            media_signing_key: std::env::var("MEDIA_SIGNING_KEY").ok(),

            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            search_retry_attempts: std::env::var("SEARCH_RETRY_ATTEMPTS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),
            search_retry_base_ms: std::env::var("SEARCH_RETRY_BASE_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100),
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

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 媒体文件目录 (work_dir/media)
    pub fn media_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("media")
    }

    /// 日志目录 (work_dir/logs)
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.media_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
