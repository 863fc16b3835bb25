//! The image currently under edit.
//!
//! An [`EditSession`] holds two pixel buffers: the working image that
//! mirror/rotate change immediately, and the image as it was loaded (or last
//! saved) for undo. The crop is different: it stays a set of pending
//! [`CropOffsets`] and is only cut out of a copy at save time, so the working
//! image is never cropped in place.
//!
//! ## States
//!
//! | State | Entered by | Left by |
//! |---|---|---|
//! | Clean | load, undo, successful save | mirror, rotate, date set, quick select, non-zero crop |
//! | Dirty | any of the above edits | undo, successful save |
//!
//! A failed save leaves every field as it was, still dirty.
//!
//! ## Save pipeline
//!
//! 1. Work out the destination name from the folder snapshot. A clean
//!    session already carrying that name is left alone.
//! 2. Cut the crop out of a copy of the working image.
//! 3. Re-read the source's EXIF and swap in the current date; orientation
//!    becomes normal since it is already baked into the pixels.
//! 4. Encode, write to a temp file in the folder, and atomically move it
//!    onto the destination.
//! 5. If the name changed, delete the old file. A failed delete is logged
//!    and reported, not fatal: the new file is already in place.
//! 6. The saved pixels and date become the new undo snapshot.

use crate::config::{CropConfig, EditorConfig};
use crate::crop::{CropOffsets, Size};
use crate::dates::{self, CanonicalDate, DateParseError};
use crate::imaging::{BackendError, ImageBackend, ImageMetadata, Quality, RotateDirection};
use crate::naming::{self, FolderSnapshot};
use crate::recent::RecentDates;
use image::DynamicImage;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Image error: {0}")]
    Backend(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Date(#[from] DateParseError),
    #[error("Crop {offsets:?} leaves less than {min_remaining}px of a {width}x{height} image")]
    InvalidCrop {
        offsets: CropOffsets,
        width: u32,
        height: u32,
        min_remaining: u32,
    },
}

/// Where the date shown for the current image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStatus {
    /// Read from the file and unchanged.
    FromMetadata(CanonicalDate),
    /// Replaces a date the file already had.
    Changed { date: CanonicalDate, was: CanonicalDate },
    /// The file had no date.
    New(CanonicalDate),
    /// The file's date has been removed.
    Cleared { was: CanonicalDate },
    Unset,
}

/// Result of [`EditSession::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// Where the image lives now.
    pub path: PathBuf,
    /// False when nothing needed saving.
    pub written: bool,
    /// The previous path, when the save renamed the file.
    pub renamed_from: Option<PathBuf>,
    /// The previous file, when it could not be deleted after a rename.
    pub left_behind: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    path: PathBuf,
    working: DynamicImage,
    original: DynamicImage,
    crop: CropOffsets,
    current_date: Option<CanonicalDate>,
    original_date: Option<CanonicalDate>,
    dirty: bool,
}

impl EditSession {
    /// Decode `path` and read its capture date.
    ///
    /// Unreadable metadata is treated as none; only a decode failure is an error.
    pub fn load(path: &Path, backend: &dyn ImageBackend) -> Result<Self, SessionError> {
        let working = backend.decode(path)?;
        let date = match backend.read_metadata(path) {
            Ok(metadata) => metadata.date,
            Err(e) => {
                log::warn!("no metadata for {}: {e}", path.display());
                None
            }
        };
        log::debug!(
            "loaded {} ({}x{}, date {:?})",
            path.display(),
            working.width(),
            working.height(),
            date
        );
        Ok(Self {
            path: path.to_path_buf(),
            original: working.clone(),
            working,
            crop: CropOffsets::default(),
            current_date: date,
            original_date: date,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The working image, with mirror/rotate applied and the crop still pending.
    pub fn image(&self) -> &DynamicImage {
        &self.working
    }

    pub fn image_size(&self) -> Size {
        Size::new(self.working.width(), self.working.height())
    }

    /// Size the saved image will have.
    pub fn cropped_size(&self) -> Size {
        self.crop.cropped_size(self.image_size())
    }

    pub fn crop(&self) -> CropOffsets {
        self.crop
    }

    pub fn date(&self) -> Option<CanonicalDate> {
        self.current_date
    }

    pub fn original_date(&self) -> Option<CanonicalDate> {
        self.original_date
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn date_status(&self) -> DateStatus {
        match (self.current_date, self.original_date) {
            (Some(date), Some(was)) if date == was => DateStatus::FromMetadata(date),
            (Some(date), Some(was)) => DateStatus::Changed { date, was },
            (Some(date), None) => DateStatus::New(date),
            (None, Some(was)) => DateStatus::Cleared { was },
            (None, None) => DateStatus::Unset,
        }
    }

    pub fn mirror(&mut self) {
        self.working = self.working.fliph();
        self.crop = self.crop.mirrored();
        self.dirty = true;
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        match direction {
            RotateDirection::Clockwise => {
                self.working = self.working.rotate90();
                self.crop = self.crop.rotated_clockwise();
            }
            RotateDirection::CounterClockwise => {
                self.working = self.working.rotate270();
                self.crop = self.crop.rotated_counter_clockwise();
            }
        }
        self.dirty = true;
    }

    /// Replace the pending crop. Rejected if a cropped axis would keep too
    /// little image; an uncropped axis is never checked, so images below the
    /// minimum still accept no crop at all.
    pub fn set_crop(
        &mut self,
        offsets: CropOffsets,
        config: &CropConfig,
    ) -> Result<(), SessionError> {
        let size = self.image_size();
        if !offsets.fits(size, config.min_remaining) {
            return Err(SessionError::InvalidCrop {
                offsets,
                width: size.width,
                height: size.height,
                min_remaining: config.min_remaining,
            });
        }
        self.crop = offsets;
        if !offsets.is_zero() {
            self.dirty = true;
        }
        Ok(())
    }

    /// Zero the crop. Other pending edits keep the session dirty.
    pub fn reset_crop(&mut self) {
        self.crop = CropOffsets::default();
    }

    /// Parse `raw` and make it the current date.
    ///
    /// On a parse error nothing changes.
    pub fn set_date(
        &mut self,
        raw: &str,
        recent: &mut RecentDates,
    ) -> Result<CanonicalDate, SessionError> {
        let date = dates::parse_date(raw)?;
        self.apply_date(date, recent);
        Ok(date)
    }

    /// Use the `n`-th recent date (1-based). Out of range does nothing.
    pub fn quick_select(&mut self, n: usize, recent: &mut RecentDates) -> Option<CanonicalDate> {
        let date = recent.get(n)?;
        self.apply_date(date, recent);
        Some(date)
    }

    fn apply_date(&mut self, date: CanonicalDate, recent: &mut RecentDates) {
        self.current_date = Some(date);
        self.dirty = true;
        recent.push(date);
    }

    /// Back to the loaded (or last saved) state. There is no redo.
    pub fn undo(&mut self) {
        self.working = self.original.clone();
        self.current_date = self.original_date;
        self.crop = CropOffsets::default();
        self.dirty = false;
    }

    /// The path a save would write to right now.
    pub fn destination(&self, folder: &Path) -> Result<PathBuf, SessionError> {
        let snapshot = FolderSnapshot::read(folder)?;
        Ok(naming::next_path(folder, &self.path, self.current_date, &snapshot))
    }

    /// Run the save pipeline described in the [module docs](self).
    pub fn save(
        &mut self,
        folder: &Path,
        backend: &dyn ImageBackend,
        config: &EditorConfig,
    ) -> Result<Saved, SessionError> {
        let dest = self.destination(folder)?;
        if !self.dirty && dest == self.path {
            return Ok(Saved {
                path: dest,
                written: false,
                renamed_from: None,
                left_behind: None,
            });
        }

        let output = self.cropped_image();
        let metadata = match backend.read_metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("saving {} without its old metadata: {e}", self.path.display());
                ImageMetadata::default()
            }
        }
        .with_date(self.current_date);

        let bytes = backend.encode(&output, &metadata, Quality::new(config.output.quality))?;
        let mut tmp = tempfile::Builder::new()
            .prefix(".photo-review-")
            .suffix(".tmp")
            .tempfile_in(folder)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&dest).map_err(|e| SessionError::Io(e.error))?;
        log::info!("saved {}", dest.display());

        let mut renamed_from = None;
        let mut left_behind = None;
        if dest != self.path {
            match fs::remove_file(&self.path) {
                Ok(()) => log::info!("removed {}", self.path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::debug!("{} was already gone", self.path.display());
                }
                Err(e) => {
                    log::warn!("could not remove {}: {e}", self.path.display());
                    left_behind = Some(self.path.clone());
                }
            }
            renamed_from = Some(std::mem::replace(&mut self.path, dest.clone()));
        }

        self.working = output;
        self.original = self.working.clone();
        self.crop = CropOffsets::default();
        self.original_date = self.current_date;
        self.dirty = false;

        Ok(Saved {
            path: dest,
            written: true,
            renamed_from,
            left_behind,
        })
    }

    fn cropped_image(&self) -> DynamicImage {
        if self.crop.is_zero() {
            return self.working.clone();
        }
        let size = self.cropped_size();
        self.working
            .crop_imm(self.crop.left, self.crop.top, size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MOCK_JPEG, MockBackend, RecordedOp};
    use crate::test_helpers::{file_names, review_folder};

    fn touch(path: &Path) {
        fs::write(path, b"source").unwrap();
    }

    fn recent() -> RecentDates {
        RecentDates::new(9)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    #[test]
    fn load_starts_clean_with_file_date() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 80);
        backend.set_date(&path, "1996-05-20");

        let session = EditSession::load(&path, &backend).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.image_size(), Size::new(100, 80));
        assert_eq!(session.date().map(|d| d.to_string()).as_deref(), Some("1996-05-20"));
        assert!(matches!(session.date_status(), DateStatus::FromMetadata(_)));
    }

    #[test]
    fn load_missing_file_errors() {
        let backend = MockBackend::new(10, 10);
        let result = EditSession::load(Path::new("/nonexistent/scan.jpg"), &backend);
        assert!(matches!(result, Err(SessionError::Backend(_))));
    }

    #[test]
    fn mirror_and_rotate_mark_dirty() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 80);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.mirror();
        assert!(session.is_dirty());

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.rotate(RotateDirection::Clockwise);
        assert!(session.is_dirty());
        assert_eq!(session.image_size(), Size::new(80, 100));
    }

    #[test]
    fn rotate_carries_crop_with_the_pixels() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(200, 100);
        let config = CropConfig::default();

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::new(30, 5, 0, 0), &config).unwrap();
        session.rotate(RotateDirection::Clockwise);
        // The old left strip is now at the top.
        assert_eq!(session.crop(), CropOffsets::new(0, 30, 5, 0));
        assert_eq!(session.cropped_size(), Size::new(95, 170));

        session.rotate(RotateDirection::CounterClockwise);
        assert_eq!(session.crop(), CropOffsets::new(30, 5, 0, 0));
    }

    #[test]
    fn set_crop_validates_and_defers() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 100);
        let config = CropConfig::default();

        let mut session = EditSession::load(&path, &backend).unwrap();
        let err = session
            .set_crop(CropOffsets::new(30, 0, 30, 0), &config)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidCrop { .. }));
        assert!(session.crop().is_zero());
        assert!(!session.is_dirty());

        session.set_crop(CropOffsets::new(10, 0, 10, 0), &config).unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.image_size(), Size::new(100, 100));
        assert_eq!(session.cropped_size(), Size::new(80, 100));
    }

    #[test]
    fn tiny_image_accepts_only_no_crop() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(30, 30);
        let config = CropConfig::default();

        let mut session = EditSession::load(&path, &backend).unwrap();
        assert!(session.set_crop(CropOffsets::default(), &config).is_ok());
        assert!(session.set_crop(CropOffsets::new(1, 0, 0, 0), &config).is_err());
    }

    #[test]
    fn zero_crop_does_not_dirty() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 100);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::default(), &CropConfig::default()).unwrap();
        assert!(!session.is_dirty());
    }

    #[test]
    fn reset_crop_keeps_dirty() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 100);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::new(5, 5, 5, 5), &CropConfig::default()).unwrap();
        session.reset_crop();
        assert!(session.crop().is_zero());
        assert!(session.is_dirty());
    }

    #[test]
    fn set_date_updates_recent_and_status() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(10, 10);
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        let date = session.set_date("3/4/05", &mut recent).unwrap();
        assert_eq!(date.to_string(), "2005-03-04");
        assert!(session.is_dirty());
        assert_eq!(recent.get(1), Some(date));
        assert_eq!(session.date_status(), DateStatus::New(date));
    }

    #[test]
    fn bad_date_changes_nothing() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(10, 10);
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        let err = session.set_date("sometime in spring", &mut recent).unwrap_err();
        assert!(matches!(err, SessionError::Date(DateParseError::Unrecognized(_))));
        assert!(!session.is_dirty());
        assert!(session.date().is_none());
        assert!(recent.is_empty());
    }

    #[test]
    fn changed_date_reports_previous() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(10, 10);
        backend.set_date(&path, "1990-01-01");
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_date("2024-01-15", &mut recent).unwrap();
        match session.date_status() {
            DateStatus::Changed { date, was } => {
                assert_eq!(date.to_string(), "2024-01-15");
                assert_eq!(was.to_string(), "1990-01-01");
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn quick_select_uses_recent_dates() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(10, 10);
        let mut recent = recent();
        recent.push("2001-01-01".parse().unwrap());
        recent.push("2002-02-02".parse().unwrap());

        let mut session = EditSession::load(&path, &backend).unwrap();
        assert_eq!(session.quick_select(5, &mut recent), None);
        assert!(!session.is_dirty());

        let picked = session.quick_select(2, &mut recent).unwrap();
        assert_eq!(picked.to_string(), "2001-01-01");
        assert!(session.is_dirty());
        assert_eq!(recent.get(1), Some(picked));
    }

    #[test]
    fn undo_restores_loaded_state() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(120, 90);
        backend.set_date(&path, "1996-05-20");
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        let loaded = session.image().clone();

        session.mirror();
        session.rotate(RotateDirection::Clockwise);
        session.set_crop(CropOffsets::new(3, 4, 5, 6), &CropConfig::default()).unwrap();
        session.set_date("2024-01-15", &mut recent).unwrap();
        session.rotate(RotateDirection::CounterClockwise);
        session.mirror();
        session.mirror();

        session.undo();
        assert_eq!(session.image(), &loaded);
        assert_eq!(session.date(), session.original_date());
        assert!(session.crop().is_zero());
        assert!(!session.is_dirty());
    }

    // =========================================================================
    // Save
    // =========================================================================

    #[test]
    fn save_crops_dates_and_renames() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan_0001.JPG");
        touch(&path);
        let backend = MockBackend::new(100, 100);
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::new(10, 0, 10, 0), &CropConfig::default()).unwrap();
        session.set_date("3/4/05", &mut recent).unwrap();

        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(saved.path, folder.join("2005-03-04 (trip) 1.jpg"));
        assert_eq!(saved.renamed_from.as_deref(), Some(path.as_path()));
        assert_eq!(saved.left_behind, None);
        assert_eq!(file_names(&folder), vec!["2005-03-04 (trip) 1.jpg"]);
        assert_eq!(fs::read(&saved.path).unwrap(), MOCK_JPEG);

        assert!(backend.get_operations().contains(&RecordedOp::Encode {
            width: 80,
            height: 100,
            date: Some("2005-03-04".into()),
            quality: 95,
        }));

        assert!(!session.is_dirty());
        assert_eq!(session.path(), saved.path);
        assert!(session.crop().is_zero());
        assert_eq!(session.image_size(), Size::new(80, 100));
        assert_eq!(session.date_status(), DateStatus::FromMetadata(session.date().unwrap()));
    }

    #[test]
    fn save_twice_writes_once() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 100);
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_date("2024-01-15", &mut recent).unwrap();
        let first = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        let second = session.save(&folder, &backend, &EditorConfig::default()).unwrap();

        assert!(first.written);
        assert!(!second.written);
        assert_eq!(first.path, second.path);
        assert_eq!(backend.encode_count(), 1);
    }

    #[test]
    fn clean_session_still_renames_unnamed_file() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.png");
        touch(&path);
        let backend = MockBackend::new(60, 60);

        let mut session = EditSession::load(&path, &backend).unwrap();
        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(file_names(&folder), vec!["trip 1.png"]);
    }

    #[test]
    fn case_only_name_difference_saves_in_place() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("Trip 1.JPG");
        touch(&path);
        let backend = MockBackend::new(60, 60);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.mirror();
        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(saved.path, path);
        assert_eq!(saved.renamed_from, None);
        assert_eq!(file_names(&folder), vec!["Trip 1.JPG"]);
        assert_eq!(fs::read(&path).unwrap(), MOCK_JPEG);
    }

    #[test]
    fn source_that_cannot_be_removed_is_reported() {
        let (_tmp, folder) = review_folder("trip");
        // A directory decodes under the mock but can't be unlinked as a file.
        let path = folder.join("scan.jpg");
        fs::create_dir(&path).unwrap();
        let backend = MockBackend::new(60, 60);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.mirror();
        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(saved.path, folder.join("trip 1.jpg"));
        assert_eq!(saved.renamed_from.as_deref(), Some(path.as_path()));
        assert_eq!(saved.left_behind.as_deref(), Some(path.as_path()));
        assert!(path.is_dir());
        assert_eq!(fs::read(folder.join("trip 1.jpg")).unwrap(), MOCK_JPEG);
        assert_eq!(session.path(), folder.join("trip 1.jpg").as_path());
    }

    #[test]
    fn source_already_gone_is_not_left_behind() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(60, 60);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.mirror();
        fs::remove_file(&path).unwrap();
        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(saved.renamed_from.as_deref(), Some(path.as_path()));
        assert_eq!(saved.left_behind, None);
        assert_eq!(file_names(&folder), vec!["trip 1.jpg"]);
    }

    #[test]
    fn save_in_place_when_name_already_fits() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("2024-01-15 (trip) 1.jpg");
        touch(&path);
        let backend = MockBackend::new(60, 60);
        backend.set_date(&path, "2024-01-15");

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.mirror();
        let saved = session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        assert!(saved.written);
        assert_eq!(saved.path, path);
        assert_eq!(saved.renamed_from, None);
        assert_eq!(file_names(&folder), vec!["2024-01-15 (trip) 1.jpg"]);
        assert_eq!(fs::read(&path).unwrap(), MOCK_JPEG);
    }

    #[test]
    fn failed_save_touches_nothing() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::failing_encode(100, 100);
        let mut recent = recent();

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::new(10, 0, 10, 0), &CropConfig::default()).unwrap();
        session.set_date("2024-01-15", &mut recent).unwrap();

        let result = session.save(&folder, &backend, &EditorConfig::default());
        assert!(matches!(result, Err(SessionError::Backend(_))));
        assert!(session.is_dirty());
        assert_eq!(session.path(), path);
        assert_eq!(session.crop(), CropOffsets::new(10, 0, 10, 0));
        assert_eq!(file_names(&folder), vec!["scan.jpg"]);
        assert_eq!(fs::read(&path).unwrap(), b"source");
    }

    #[test]
    fn undo_after_save_returns_to_saved_state() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        let backend = MockBackend::new(100, 100);

        let mut session = EditSession::load(&path, &backend).unwrap();
        session.set_crop(CropOffsets::new(0, 20, 0, 0), &CropConfig::default()).unwrap();
        session.save(&folder, &backend, &EditorConfig::default()).unwrap();
        let saved = session.image().clone();

        session.mirror();
        session.undo();
        assert_eq!(session.image(), &saved);
        assert_eq!(session.image_size(), Size::new(100, 80));
    }

    #[test]
    fn destination_is_stable_between_calls() {
        let (_tmp, folder) = review_folder("trip");
        let path = folder.join("scan.jpg");
        touch(&path);
        touch(&folder.join("trip 1.jpg"));
        let backend = MockBackend::new(10, 10);

        let session = EditSession::load(&path, &backend).unwrap();
        let first = session.destination(&folder).unwrap();
        assert_eq!(first, folder.join("trip 2.jpg"));
        assert_eq!(session.destination(&folder).unwrap(), first);
    }
}
