//! # Photo Review
//!
//! A keyboard-driven editor for reviewing a folder of scanned photographs.
//! Each image is shown in turn; the user fixes orientation, trims scanner
//! borders, assigns a capture date from whatever they can read off the
//! print, and moves on. Saving writes a JPEG with the date in its EXIF and a
//! name that sorts chronologically: `2005-03-04 (Holiday) 7.jpg`.
//!
//! # Architecture
//!
//! ```text
//! Gallery ──current──▶ EditSession ──save──▶ naming::next_path
//!    ▲                     │                       │
//!    └──replace_current────┘◀──── tempfile + persist
//! ```
//!
//! The [`editor::Editor`] owns one [`gallery::Gallery`] (the ordered file
//! list and a cursor) and at most one [`session::EditSession`] (the loaded
//! image plus its pending edits). Navigation saves dirty edits before it
//! moves, so nothing is lost by pressing "next".
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dates`] | Free-form date text → canonical `YYYY-MM-DD` |
//! | [`crop`] | Crop offsets, display mapping, edge hit-testing and dragging |
//! | [`naming`] | Collision-free `DATE (FOLDER) N.ext` destination names |
//! | [`session`] | One image's pending edits, undo, and atomic save |
//! | [`gallery`] | Sorted image list for a folder and the cursor into it |
//! | [`recent`] | Most-recently-used dates for quick selection |
//! | [`editor`] | Ties gallery, session and pointer state into user actions |
//! | [`commands`] | One-line command parser for the interactive loop |
//! | [`imaging`] | Decode, EXIF read/write, JPEG encode behind [`imaging::ImageBackend`] |
//! | [`config`] | `photo-review.toml` loading and validation |
//! | [`output`] | Status and outcome formatting for the terminal |
//!
//! # Design Decisions
//!
//! ## Crop Offsets Live in Image Space
//!
//! The pending crop is stored as pixels to remove from each edge of the
//! working image. Display coordinates are derived on demand from the current
//! viewport, so resizing the window never shifts the crop.
//!
//! ## Saves Are Atomic
//!
//! The encoded JPEG is written to a temporary file in the destination folder
//! and renamed into place. A failed encode or write leaves the source file
//! and the session untouched; the user can retry or undo.
//!
//! ## Dates at Noon
//!
//! A scanned print only ever gives a day, so the time component written to
//! EXIF is fixed at `12:00:00`. Noon keeps the date stable under any
//! timezone shift a viewer might apply.

pub mod commands;
pub mod config;
pub mod crop;
pub mod dates;
pub mod editor;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod recent;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
