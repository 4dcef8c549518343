//! Media Storage & Signed URLs
//!
//! 房源图片落盘到 `work_dir/media/`，对外只发放限时签名链接：
//! `/media/<key>?expires=<unix>&sig=<hmac>`。签名覆盖 `key|expires`，
//! 校验失败 403，过期 410。
//!
//! Uploads arrive as base64 content, are validated as images and
//! recompressed to JPEG before hitting the disk.

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::utils::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// JPEG quality for stored listing photos
const JPEG_QUALITY: u8 = 85;

/// Maximum decoded upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// URL signer — HMAC-SHA256 over `key|expires`
#[derive(Clone)]
pub struct UrlSigner {
    key: Vec<u8>,
}

impl UrlSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    pub fn sign(&self, media_key: &str, expires: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(format!("{media_key}|{expires}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time verification
    pub fn verify(&self, media_key: &str, expires: i64, signature: &str) -> bool {
        let Ok(bytes) = hex::decode(signature) else {
            return false;
        };
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(format!("{media_key}|{expires}").as_bytes());
        mac.verify_slice(&bytes).is_ok()
    }
}

/// Media service — stores listing photos and issues signed links
#[derive(Clone)]
pub struct MediaService {
    root: PathBuf,
    signer: UrlSigner,
    ttl_secs: u64,
}

impl MediaService {
    pub fn new(root: PathBuf, signing_key: impl Into<Vec<u8>>, ttl_secs: u64) -> Self {
        Self {
            root,
            signer: UrlSigner::new(signing_key),
            ttl_secs,
        }
    }

    /// Decode, validate and recompress one uploaded image; returns the
    /// media key it was stored under.
    pub fn store_property_image(&self, property_id: &str, content: &str) -> AppResult<String> {
        let data = BASE64
            .decode(content)
            .map_err(|e| AppError::validation(format!("Invalid image encoding: {e}")))?;

        if data.is_empty() {
            return Err(AppError::validation("Empty image provided"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "Image too large. Maximum size is {} bytes",
                MAX_FILE_SIZE
            )));
        }

        let img = image::load_from_memory(&data)
            .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

        // Save to buffer as JPG with quality setting
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
        }

        let key = format!("properties/{property_id}/{}.jpg", Uuid::new_v4());
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create media dir: {e}")))?;
        }
        std::fs::write(&path, &buffer)
            .map_err(|e| AppError::internal(format!("Failed to save image: {e}")))?;

        tracing::info!(key = %key, size = buffer.len(), "Image stored");

        Ok(key)
    }

    /// Time-limited download link for a stored media key
    pub fn signed_url(&self, media_key: &str) -> String {
        let expires = Utc::now().timestamp() + self.ttl_secs as i64;
        let sig = self.signer.sign(media_key, expires);
        format!("/media/{media_key}?expires={expires}&sig={sig}")
    }

    /// Verify a signed request and read the file
    pub fn open(&self, media_key: &str, expires: i64, signature: &str) -> AppResult<Vec<u8>> {
        if !self.signer.verify(media_key, expires, signature) {
            return Err(AppError::Forbidden);
        }
        if expires < Utc::now().timestamp() {
            return Err(AppError::Expired);
        }
        if !is_clean_key(media_key) {
            return Err(AppError::validation("Invalid media key"));
        }

        std::fs::read(self.root.join(media_key))
            .map_err(|_| AppError::not_found("Media not found"))
    }
}

/// Keys are relative paths without traversal components
fn is_clean_key(key: &str) -> bool {
    let path = Path::new(key);
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
}
