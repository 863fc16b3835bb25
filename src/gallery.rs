//! The ordered list of images under review.
//!
//! A gallery is the image files directly inside one folder, sorted by name,
//! plus a cursor. It is listed once when the editor starts; after that the
//! only change is a save that renames the file under the cursor, which
//! replaces that entry in place so the order the user walks doesn't shift.
//!
//! Hidden files are skipped, and so are files whose extension isn't in
//! `[scan] extensions`.

use crate::config::ScanConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No images found in {0}")]
    Empty(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Gallery {
    folder: PathBuf,
    images: Vec<PathBuf>,
    cursor: usize,
}

impl Gallery {
    /// List the images in `folder`. The cursor starts on the first one.
    pub fn open(folder: &Path, scan: &ScanConfig) -> Result<Self, GalleryError> {
        if !folder.is_dir() {
            return Err(GalleryError::NotADirectory(folder.to_path_buf()));
        }
        // Resolve "." and friends so the folder has a real name to put in filenames.
        let folder = fs::canonicalize(folder)?;
        let images = collect_images(&folder, scan)?;
        if images.is_empty() {
            return Err(GalleryError::Empty(folder));
        }
        log::info!("{} images in {}", images.len(), folder.display());
        Ok(Self {
            folder,
            images,
            cursor: 0,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false: an empty folder fails to open.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Zero-based cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Path {
        &self.images[self.cursor]
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.images.len()
    }

    /// Move to the next image. Returns false (and stays put) at the end.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move to the previous image. Returns false (and stays put) at the start.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Point the current entry at its new path after a rename.
    pub fn replace_current(&mut self, path: PathBuf) {
        self.images[self.cursor] = path;
    }
}

fn collect_images(folder: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>, GalleryError> {
    let mut images: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            !hidden && p.is_file() && scan.matches(p)
        })
        .collect();

    images.sort();
    Ok(images)
}
