/// Image and font loading with per-path caching.
///
/// The first request for an asset reads (and for images, decodes) the file;
/// later requests for the same resolved path return the cached handle.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use log::debug;

/// A font file loaded for one point size.
#[derive(Debug)]
pub struct Font {
    pub path: PathBuf,
    pub size: u32,
    pub data: Vec<u8>,
}

pub struct AssetLoader {
    root: PathBuf,
    images: HashMap<PathBuf, Rc<RgbaImage>>,
    fonts: HashMap<(PathBuf, u32), Rc<Font>>,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Path of `relative` inside the asset root, canonicalised when the file
    /// exists so different spellings share a cache entry.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let joined = self.root.join(relative);
        joined.canonicalize().unwrap_or(joined)
    }

    pub fn image(&mut self, relative: impl AsRef<Path>) -> Result<Rc<RgbaImage>, AssetError> {
        let path = self.resolve(relative);
        if let Some(cached) = self.images.get(&path) {
            return Ok(Rc::clone(cached));
        }

        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
            path: path.clone(),
            source,
        })?;
        let handle = Rc::new(decoded.to_rgba8());
        debug!(
            "loaded image {} ({}x{})",
            path.display(),
            handle.width(),
            handle.height()
        );
        self.images.insert(path, Rc::clone(&handle));
        Ok(handle)
    }

    pub fn font(&mut self, relative: impl AsRef<Path>, size: u32) -> Result<Rc<Font>, AssetError> {
        let path = self.resolve(relative);
        let key = (path.clone(), size);
        if let Some(cached) = self.fonts.get(&key) {
            return Ok(Rc::clone(cached));
        }

        let data = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        if !is_sfnt(&data) {
            return Err(AssetError::UnsupportedFont(path));
        }
        debug!("loaded font {} at {}pt", path.display(), size);
        let handle = Rc::new(Font { path, size, data });
        self.fonts.insert(key, Rc::clone(&handle));
        Ok(handle)
    }
}

/// TrueType, OpenType or font-collection signature.
fn is_sfnt(data: &[u8]) -> bool {
    matches!(
        data.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("not a TrueType/OpenType font: {}", .0.display())]
    UnsupportedFont(PathBuf),
}
