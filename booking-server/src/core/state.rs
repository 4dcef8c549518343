use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::warn;

use crate::bookings::BookingService;
use crate::core::Config;
use crate::db::DbService;
use crate::media::MediaService;
use crate::search::SearchService;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 所有服务内部以 Arc 共享，Clone 成本极低。
///
/// # 服务组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | bookings | 预订服务 (冲突检测 + 创建) |
/// | search | 搜索索引服务 (Meilisearch) |
/// | media | 媒体存储与签名链接 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub db: Surreal<Db>,
    /// 预订服务
    pub bookings: BookingService,
    /// 搜索索引服务
    pub search: SearchService,
    /// 媒体服务
    pub media: MediaService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/luxstay.db)
    /// 3. 搜索索引客户端与索引设置
    /// 4. 媒体服务与预订服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("luxstay.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        let search = SearchService::new(config)?;
        // 索引暂不可达时不阻塞启动，请求路径会再次报错
        if let Err(e) = search.ensure_index().await {
            warn!("Search index settings not installed yet: {e}");
        }

        let media = MediaService::new(
            config.media_dir(),
            media_signing_key(config),
            config.media_url_ttl_secs,
        );

        let bookings = BookingService::new(db.clone());

        Ok(Self {
            config: config.clone(),
            db,
            bookings,
            search,
            media,
        })
    }
}

fn media_signing_key(config: &Config) -> Vec<u8> {
    match &config.media_signing_key {
        Some(hex_key) => hex::decode(hex_key).unwrap_or_else(|_| {
            warn!("MEDIA_SIGNING_KEY is not valid hex, using a random key");
            random_key()
        }),
        None => {
            warn!("MEDIA_SIGNING_KEY not set; signed URLs will not survive restarts");
            random_key()
        }
    }
}

fn random_key() -> Vec<u8> {
    use rand::RngCore;

    let mut key = vec![0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}
