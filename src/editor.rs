//! The review loop's state: gallery, current session, and crop interaction.
//!
//! [`Editor`] ties a [`Gallery`] cursor to the [`EditSession`] for the image
//! under it and keeps everything that outlives one image: the recent-dates
//! list, the config, the viewport the image is shown in, and the crop drag
//! in progress.
//!
//! Navigation never drops edits silently:
//!
//! | Action | Clean session | Dirty session |
//! |---|---|---|
//! | `save` | renames if needed, then next image | save, then next image |
//! | `next` | next image | same as `save` |
//! | `previous` | previous image | save in place, then previous image |
//! | `quit` | exit | ask: save / discard / cancel |
//!
//! Saving the last image stays on it. `previous` on the first image is a
//! boundary, not an error.

use crate::config::EditorConfig;
use crate::crop::{Axis, CropDrag, CropGeometry, CropOffsets, Edge, Point, Size};
use crate::dates::CanonicalDate;
use crate::gallery::{Gallery, GalleryError};
use crate::imaging::{ImageBackend, RotateDirection};
use crate::recent::RecentDates;
use crate::session::{EditSession, Saved, SessionError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

/// Where the cursor ended up after a navigation or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    /// Nothing to do; the cursor didn't move.
    Stayed,
    /// Already on the first image.
    AtFirst,
    /// Already on the last image.
    AtLast,
}

/// What a navigation or save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub saved: Option<Saved>,
    pub navigation: Navigation,
}

/// Answer to "save pending edits before quitting?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitChoice {
    Save,
    Discard,
    Cancel,
}

pub struct Editor<B: ImageBackend> {
    gallery: Gallery,
    session: EditSession,
    recent: RecentDates,
    backend: B,
    config: EditorConfig,
    viewport: Option<Size>,
    drag: CropDrag,
}

impl<B: ImageBackend> Editor<B> {
    /// List `folder` and load its first image.
    pub fn open(folder: &Path, backend: B, config: EditorConfig) -> Result<Self, EditorError> {
        let gallery = Gallery::open(folder, &config.scan)?;
        let session = EditSession::load(gallery.current(), &backend)?;
        let mut recent = RecentDates::new(config.dates.recent_capacity);
        if let Some(date) = session.date() {
            recent.push(date);
        }
        Ok(Self {
            gallery,
            session,
            recent,
            backend,
            config,
            viewport: None,
            drag: CropDrag::new(),
        })
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn recent(&self) -> &RecentDates {
        &self.recent
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn mirror(&mut self) {
        self.drag = CropDrag::new();
        self.session.mirror();
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        self.drag = CropDrag::new();
        self.session.rotate(direction);
    }

    pub fn set_crop(&mut self, offsets: CropOffsets) -> Result<(), EditorError> {
        self.session.set_crop(offsets, &self.config.crop)?;
        Ok(())
    }

    pub fn reset_crop(&mut self) {
        self.session.reset_crop();
    }

    pub fn set_date(&mut self, raw: &str) -> Result<CanonicalDate, EditorError> {
        Ok(self.session.set_date(raw, &mut self.recent)?)
    }

    pub fn quick_select(&mut self, n: usize) -> Option<CanonicalDate> {
        self.session.quick_select(n, &mut self.recent)
    }

    pub fn undo(&mut self) {
        self.drag = CropDrag::new();
        self.session.undo();
    }

    // =========================================================================
    // Saving and navigation
    // =========================================================================

    /// Save, then move to the next image unless this is the last one.
    pub fn save(&mut self) -> Result<Outcome, EditorError> {
        let saved = self.save_in_place()?;
        if !saved.written {
            return Ok(Outcome {
                saved: Some(saved),
                navigation: Navigation::Stayed,
            });
        }
        let navigation = self.step(Gallery::advance, Navigation::AtLast)?;
        Ok(Outcome {
            saved: Some(saved),
            navigation,
        })
    }

    /// Save without moving the cursor.
    pub fn save_in_place(&mut self) -> Result<Saved, EditorError> {
        let saved = self
            .session
            .save(self.gallery.folder(), &self.backend, &self.config)?;
        if saved.written {
            self.gallery.replace_current(saved.path.clone());
        }
        Ok(saved)
    }

    /// Next image. Pending edits are saved first, which moves on by itself.
    pub fn next(&mut self) -> Result<Outcome, EditorError> {
        if self.session.is_dirty() {
            return self.save();
        }
        let navigation = self.step(Gallery::advance, Navigation::AtLast)?;
        Ok(Outcome {
            saved: None,
            navigation,
        })
    }

    /// Previous image. Pending edits are saved in place first; a failed
    /// save keeps the cursor where it is.
    pub fn previous(&mut self) -> Result<Outcome, EditorError> {
        let saved = if self.session.is_dirty() {
            Some(self.save_in_place()?)
        } else {
            None
        };
        let navigation = self.step(Gallery::retreat, Navigation::AtFirst)?;
        Ok(Outcome { saved, navigation })
    }

    /// Whether quitting needs a [`QuitChoice`].
    pub fn has_pending_edits(&self) -> bool {
        self.session.is_dirty()
    }

    /// Returns true when the editor may exit.
    pub fn quit(&mut self, choice: QuitChoice) -> Result<bool, EditorError> {
        if !self.session.is_dirty() {
            return Ok(true);
        }
        match choice {
            QuitChoice::Save => {
                self.save_in_place()?;
                Ok(true)
            }
            QuitChoice::Discard => Ok(true),
            QuitChoice::Cancel => Ok(false),
        }
    }

    /// Move the cursor with `motion` and load the image there. If the load
    /// fails, the cursor goes back to the image that is still loaded.
    fn step(
        &mut self,
        motion: fn(&mut Gallery) -> bool,
        boundary: Navigation,
    ) -> Result<Navigation, EditorError> {
        let from = self.gallery.position();
        if !motion(&mut self.gallery) {
            return Ok(boundary);
        }
        match EditSession::load(self.gallery.current(), &self.backend) {
            Ok(session) => {
                if let Some(date) = session.date() {
                    self.recent.push(date);
                }
                self.session = session;
                self.drag = CropDrag::new();
                Ok(Navigation::Moved)
            }
            Err(e) => {
                while self.gallery.position() > from {
                    self.gallery.retreat();
                }
                while self.gallery.position() < from {
                    self.gallery.advance();
                }
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Crop interaction
    // =========================================================================

    /// Set the area the image is displayed in.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Layout of the current image in the viewport, once one is set.
    pub fn geometry(&self) -> Option<CropGeometry> {
        CropGeometry::new(
            self.session.image_size(),
            self.viewport?,
            &self.config.crop,
        )
    }

    /// Which way the cursor would resize if pressed at `pointer`.
    pub fn hover(&self, pointer: Point) -> Option<Axis> {
        self.geometry()?
            .hit_test(&self.session.crop(), pointer)
            .map(Edge::axis)
    }

    pub fn pointer_down(&mut self, pointer: Point) -> Option<Edge> {
        let geometry = self.geometry()?;
        self.drag
            .pointer_down(&geometry, &self.session.crop(), pointer)
    }

    /// Follow the pointer with the grabbed edge. Returns the new offsets
    /// while a drag is in progress.
    pub fn pointer_move(&mut self, pointer: Point) -> Result<Option<CropOffsets>, EditorError> {
        let Some(geometry) = self.geometry() else {
            return Ok(None);
        };
        let Some(offsets) = self
            .drag
            .pointer_move(&geometry, &self.session.crop(), pointer)
        else {
            return Ok(None);
        };
        self.session.set_crop(offsets, &self.config.crop)?;
        Ok(Some(offsets))
    }

    pub fn pointer_up(&mut self) -> Option<Edge> {
        self.drag.pointer_up()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}
