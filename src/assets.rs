//! Texture loading.
//!
//! Every sprite comes from a source that is either an `http(s)://` URL or a
//! local file path. The bytes are decoded with the `image` crate (png, jpeg
//! or webp), re-encoded as PNG and uploaded to the GPU through raylib. Any
//! failure is fatal for startup.

use std::io::{Cursor, Read};

use image::ImageFormat;
use log::info;
use raylib::prelude::*;
use thiserror::Error;

use crate::resources::gameconfig::{ASSET_KEYS, AssetSettings};
use crate::resources::texturestore::TextureStore;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no source configured for '{0}'")]
    Missing(String),
    #[error("failed to fetch {source_ref}: {reason}")]
    Fetch { source_ref: String, reason: String },
    #[error("failed to decode {source_ref}: {reason}")]
    Decode { source_ref: String, reason: String },
    #[error("failed to create texture '{key}': {reason}")]
    Texture { key: String, reason: String },
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read the raw bytes behind a source.
pub fn fetch_bytes(source: &str) -> Result<Vec<u8>, AssetError> {
    let fetch_err = |reason: String| AssetError::Fetch {
        source_ref: source.to_string(),
        reason,
    };
    if !is_url(source) {
        return std::fs::read(source).map_err(|e| fetch_err(e.to_string()));
    }
    let response = ureq::get(source)
        .call()
        .map_err(|e| fetch_err(e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| fetch_err(e.to_string()))?;
    Ok(bytes)
}

/// Decode any supported image format and re-encode it as RGBA PNG.
pub fn to_png(source: &str, bytes: &[u8]) -> Result<Vec<u8>, AssetError> {
    let decode_err = |reason: String| AssetError::Decode {
        source_ref: source.to_string(),
        reason,
    };
    let decoded = image::load_from_memory(bytes).map_err(|e| decode_err(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| decode_err(e.to_string()))?;
    Ok(png)
}

/// Load every texture the game needs.
pub fn load_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    settings: &AssetSettings,
) -> Result<TextureStore, AssetError> {
    let mut store = TextureStore::default();
    for key in ASSET_KEYS {
        let source = settings
            .get(key)
            .ok_or_else(|| AssetError::Missing(key.to_string()))?;
        let png = to_png(source, &fetch_bytes(source)?)?;
        let texture_err = |reason: String| AssetError::Texture {
            key: key.to_string(),
            reason,
        };
        let image =
            Image::load_image_from_mem(".png", &png).map_err(|e| texture_err(e.to_string()))?;
        let texture = rl
            .load_texture_from_image(thread, &image)
            .map_err(|e| texture_err(e.to_string()))?;
        info!(
            "Loaded texture '{}' ({}x{}) from {}",
            key, texture.width, texture.height, source
        );
        store.insert(key, texture);
    }
    Ok(store)
}
