//! Search Index Layer
//!
//! # Meilisearch
//!
//! 房源索引。索引设置在启动时安装：
//!
//! - searchable 属性顺序决定字段权重 (title 最高)
//! - filterable / sortable 属性须预先声明
//! - 模糊匹配由 typo tolerance 提供
//!
//! 查询走 [`query::QueryPlan`]；瞬态故障按 [`RetryPolicy`] 重试，
//! 耗尽后以 503 透出。

pub mod query;

use std::sync::Arc;
use std::time::Duration;

use meilisearch_sdk::client::Client;
use meilisearch_sdk::errors::{Error, ErrorCode};
use meilisearch_sdk::settings::{MinWordSizeForTypos, Settings, TypoToleranceSettings};

use shared::models::{PropertyDocument, PropertyHit};
use shared::request::SearchRequest;
use shared::response::SearchResponse;

use crate::core::Config;
use crate::media::MediaService;
use crate::utils::{AppError, AppResult, RetryPolicy};
use query::{QueryPlan, RANGE_FIELDS, SORT, TERM_FIELDS};

/// Fixed result page size
pub const PAGE_SIZE: usize = 10;

/// Searchable fields, highest weight first
const SEARCHABLE: [&str; 4] = ["title", "description", "location", "amenities"];

/// Sortable fields backing the sort policy
const SORTABLE: [&str; 2] = ["rating", "price_per_night"];

const PRIMARY_KEY: &str = "property_id";

/// Search service — property index access
#[derive(Clone)]
pub struct SearchService {
    client: Arc<Client>,
    index_name: String,
    retry: RetryPolicy,
}

impl SearchService {
    /// Build the client; no network traffic happens here
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::new(&config.meili_url, config.meili_master_key.as_deref())
            .map_err(|e| AppError::upstream(format!("Invalid search index config: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            index_name: config.property_index.clone(),
            retry: RetryPolicy::new(
                config.search_retry_attempts,
                Duration::from_millis(config.search_retry_base_ms),
            ),
        })
    }

    /// Install index settings (idempotent)
    pub async fn ensure_index(&self) -> AppResult<()> {
        let settings = index_settings();
        let task = self
            .retry
            .run("ensure_index", is_transient, || {
                let client = &self.client;
                let index_name = &self.index_name;
                let settings = &settings;
                async move { client.index(index_name).set_settings(settings).await }
            })
            .await
            .map_err(map_error)?;

        task.wait_for_completion(&self.client, None, None)
            .await
            .map_err(map_error)?;

        tracing::info!(index = %self.index_name, "Search index settings installed");
        Ok(())
    }

    /// Run a search and shape the hits: attach id and relevance score,
    /// resolve the first media key to a signed URL.
    pub async fn search(
        &self,
        request: &SearchRequest,
        media: &MediaService,
    ) -> AppResult<SearchResponse> {
        let plan = QueryPlan::from_request(request);
        let index = self.client.index(&self.index_name);

        let results = self
            .retry
            .run("search", is_transient, || {
                let plan = &plan;
                let index = &index;
                async move {
                    let mut search = index.search();
                    search
                        .with_hits_per_page(PAGE_SIZE)
                        .with_page(1)
                        .with_sort(&SORT)
                        .with_show_ranking_score(true);
                    if let Some(text) = &plan.text {
                        search.with_query(text);
                    }
                    if let Some(filter) = &plan.filter {
                        search.with_filter(filter);
                    }
                    search.execute::<PropertyDocument>().await
                }
            })
            .await
            .map_err(map_error)?;

        // 精确总数需要分页模式；estimated 仅作兜底
        let total = results
            .total_hits
            .or(results.estimated_total_hits)
            .unwrap_or(0) as u64;

        let properties = results
            .hits
            .into_iter()
            .map(|hit| {
                let document = hit.result;
                let id = document.property_id.clone().unwrap_or_default();
                let image_url = document
                    .image_keys
                    .first()
                    .map(|key| media.signed_url(key));
                PropertyHit {
                    document,
                    id,
                    score: hit.ranking_score,
                    image_url,
                }
            })
            .collect();

        Ok(SearchResponse { properties, total })
    }

    /// Index (or re-index) one listing and wait until it is visible
    pub async fn index_property(&self, document: &PropertyDocument) -> AppResult<()> {
        let documents = std::slice::from_ref(document);
        let task = self
            .retry
            .run("index_property", is_transient, || {
                let client = &self.client;
                let index_name = &self.index_name;
                async move {
                    client
                        .index(index_name)
                        .add_or_update(documents, Some(PRIMARY_KEY))
                        .await
                }
            })
            .await
            .map_err(map_error)?;

        task.wait_for_completion(&self.client, None, None)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    /// Fetch one listing by id
    pub async fn get_property(&self, property_id: &str) -> AppResult<PropertyDocument> {
        self.retry
            .run("get_property", is_transient, || {
                let client = &self.client;
                let index_name = &self.index_name;
                async move {
                    client
                        .index(index_name)
                        .get_document::<PropertyDocument>(property_id)
                        .await
                }
            })
            .await
            .map_err(map_error)
    }

    /// Index reachability, used by the health endpoint
    pub async fn is_healthy(&self) -> bool {
        self.client.health().await.is_ok()
    }
}

fn index_settings() -> Settings {
    let filterable: Vec<&str> = RANGE_FIELDS.into_iter().chain(TERM_FIELDS).collect();

    Settings::new()
        .with_ranking_rules([
            "words",
            "typo",
            "proximity",
            "attribute",
            "sort",
            "exactness",
        ])
        .with_searchable_attributes(SEARCHABLE)
        .with_filterable_attributes(filterable)
        .with_sortable_attributes(SORTABLE)
        .with_typo_tolerance(TypoToleranceSettings {
            enabled: Some(true),
            disable_on_attributes: None,
            disable_on_words: None,
            min_word_size_for_typos: Some(MinWordSizeForTypos {
                one_typo: Some(5),
                two_typos: Some(9),
            }),
        })
}

/// API-level errors are final; anything else is a communication
/// failure worth retrying.
fn is_transient(err: &Error) -> bool {
    !matches!(err, Error::Meilisearch(_))
}

fn map_error(err: Error) -> AppError {
    match &err {
        Error::Meilisearch(e) if matches!(e.error_code, ErrorCode::DocumentNotFound) => {
            AppError::not_found("Property not found")
        }
        Error::Meilisearch(_) => AppError::upstream(err.to_string()),
        _ => AppError::unavailable(err.to_string()),
    }
}
