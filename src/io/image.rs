//! Layer loading, compositing and image export

use crate::io::configuration::IMAGE_EXTENSION;
use crate::io::error::{GenerationError, Result, WithContext};
use crate::model::attribute::{Attribute, VariantKey};
use crate::model::member::Member;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};

/// Location of the layer image for one variant
pub fn layer_path(layers_dir: &Path, attribute: &str, variant: &str) -> PathBuf {
    layers_dir
        .join(attribute)
        .join(format!("{variant}.{IMAGE_EXTENSION}"))
}

/// Decoded layer images for every variant, loaded once per run
pub struct LayerCache {
    layers: Vec<Vec<RgbaImage>>,
    labels: Vec<Vec<String>>,
}

impl LayerCache {
    /// Load `<layers_dir>/<attribute>/<variant>.png` for every declared variant
    ///
    /// # Errors
    ///
    /// Returns an error if any layer file is missing or cannot be decoded
    pub fn load(layers_dir: &Path, attributes: &[Attribute]) -> Result<Self> {
        let mut layers = Vec::with_capacity(attributes.len());
        let mut labels = Vec::with_capacity(attributes.len());

        for attribute in attributes {
            let mut images = Vec::with_capacity(attribute.variants.len());
            let mut names = Vec::with_capacity(attribute.variants.len());
            for variant in &attribute.variants {
                let path = layer_path(layers_dir, &attribute.name, &variant.name);
                let img = image::open(&path).map_err(|source| GenerationError::ImageLoad {
                    path: path.clone(),
                    source,
                })?;
                images.push(img.to_rgba8());
                names.push(format!("{}/{}", attribute.name, variant.name));
            }
            layers.push(images);
            labels.push(names);
        }

        Ok(Self { layers, labels })
    }

    /// Build a cache from already decoded layers, indexed `[attribute][variant]`
    pub fn from_layers(layers: Vec<Vec<RgbaImage>>) -> Self {
        let labels = layers
            .iter()
            .enumerate()
            .map(|(a, variants)| {
                (0..variants.len())
                    .map(|v| VariantKey::new(a, v).to_string())
                    .collect()
            })
            .collect();
        Self { layers, labels }
    }

    /// Image of one variant
    pub fn layer(&self, key: VariantKey) -> Option<&RgbaImage> {
        self.layers
            .get(key.attribute)
            .and_then(|variants| variants.get(key.variant))
    }

    fn missing(&self, key: VariantKey) -> GenerationError {
        let label = self
            .labels
            .get(key.attribute)
            .and_then(|names| names.get(key.variant))
            .cloned()
            .unwrap_or_else(|| key.to_string());
        GenerationError::MissingLayer { key: label }
    }

    /// Stack a member's layers in attribute order onto the first layer
    ///
    /// # Errors
    ///
    /// Returns an error if the member is empty or a layer is not loaded
    pub fn composite(&self, member: &Member) -> Result<RgbaImage> {
        let mut keys = member.keys().iter().copied();
        let Some(first) = keys.next() else {
            return Err(GenerationError::InvalidParameter {
                parameter: "member",
                value: "[]".to_string(),
                reason: "a member needs at least one layer to render".to_string(),
            });
        };

        let mut canvas = self.layer(first).ok_or_else(|| self.missing(first))?.clone();
        for key in keys {
            let layer = self.layer(key).ok_or_else(|| self.missing(key))?;
            imageops::overlay(&mut canvas, layer, 0, 0);
        }

        Ok(canvas)
    }
}

/// Save a composite as PNG
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or encoding fails
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    img.save(path).map_err(|e| GenerationError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resize to a `size`×`size` preview and save it; the format follows the extension
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or encoding fails
pub fn save_preview(img: &RgbaImage, path: &Path, size: u32) -> Result<()> {
    let preview = imageops::resize(img, size, size, FilterType::Lanczos3);
    save_image(&preview, path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path("create directory", parent)?;
    }
    Ok(())
}
