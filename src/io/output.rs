//! Output directory layout and reset

use crate::io::configuration::{
    IMAGE_EXTENSION, IMAGES_DIR, METADATA_DIR, PREVIEW_EXTENSION, PREVIEWS_DIR, TABLE_FILE,
};
use crate::io::error::{Result, WithContext};
use std::path::{Path, PathBuf};

/// Locations of every generated artifact below one root directory
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Describe the layout under `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of metadata documents
    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    /// Directory of full size composites
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Directory of previews
    pub fn previews_dir(&self) -> PathBuf {
        self.root.join(PREVIEWS_DIR)
    }

    /// Trait table path
    pub fn table_path(&self) -> PathBuf {
        self.root.join(TABLE_FILE)
    }

    /// Metadata document of member `id`
    pub fn metadata_path(&self, id: usize) -> PathBuf {
        self.metadata_dir().join(format!("{id}.json"))
    }

    /// Composite image of member `id`
    pub fn image_path(&self, id: usize) -> PathBuf {
        self.images_dir().join(format!("{id}.{IMAGE_EXTENSION}"))
    }

    /// Preview image of member `id`
    pub fn preview_path(&self, id: usize) -> PathBuf {
        self.previews_dir().join(format!("{id}.{PREVIEW_EXTENSION}"))
    }

    /// Remove any previous results and recreate the empty directory tree
    ///
    /// # Errors
    ///
    /// Returns an error if the old tree cannot be removed or a directory cannot be created
    pub fn reset(&self) -> Result<()> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root).with_path("remove directory", &self.root)?;
        }

        for dir in [self.metadata_dir(), self.images_dir(), self.previews_dir()] {
            std::fs::create_dir_all(&dir).with_path("create directory", &dir)?;
        }

        Ok(())
    }
}
