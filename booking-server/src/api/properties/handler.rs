//! Property API Handlers
//!
//! 房源录入：生成 ID、存储图片、写入搜索索引。

use axum::{
    Json,
    extract::{Path, State},
    extract::rejection::JsonRejection,
};
use chrono::Utc;
use uuid::Uuid;

use shared::models::{PropertyDocument, PropertyHit};
use shared::request::PropertyIndexRequest;
use shared::response::IndexConfirmation;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/properties - 录入并索引房源
pub async fn index_property(
    State(state): State<ServerState>,
    payload: Result<Json<PropertyIndexRequest>, JsonRejection>,
) -> AppResult<Json<IndexConfirmation>> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    let Some(mut property) = request.property else {
        return Err(AppError::validation("Property data is required"));
    };

    let property_id = Uuid::new_v4().to_string();

    // Store uploads first; the indexed document carries only the keys
    let images = std::mem::take(&mut property.images);
    let mut image_keys = Vec::with_capacity(images.len());
    for image in &images {
        let key = state
            .media
            .store_property_image(&property_id, &image.content)?;
        image_keys.push(key);
    }

    let image_urls: Vec<String> = image_keys
        .iter()
        .map(|key| state.media.signed_url(key))
        .collect();

    let now = Utc::now();
    let document = PropertyDocument {
        property_id: Some(property_id.clone()),
        title: property.title,
        description: property.description,
        location: property.location,
        amenities: property.amenities,
        price_per_night: property.price_per_night,
        bedrooms: property.bedrooms,
        bathrooms: property.bathrooms,
        max_guests: property.max_guests,
        rating: property.rating,
        property_type: property.property_type,
        image_keys,
        created_at: Some(now),
        updated_at: Some(now),
    };

    state.search.index_property(&document).await?;

    tracing::info!(property_id = %property_id, images = image_urls.len(), "Property indexed");

    Ok(Json(IndexConfirmation {
        message: "Property indexed successfully".to_string(),
        property_id,
        image_urls,
    }))
}

/// GET /api/properties/{id} - 获取单个房源
pub async fn get_property(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PropertyHit>> {
    let document = state.search.get_property(&id).await?;

    let image_url = document
        .image_keys
        .first()
        .map(|key| state.media.signed_url(key));

    Ok(Json(PropertyHit {
        id: document.property_id.clone().unwrap_or_else(|| id.clone()),
        document,
        score: None,
        image_url,
    }))
}
