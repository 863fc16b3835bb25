//! Terminal output for the review loop.
//!
//! # Status Display
//!
//! After every command the editor prints the state of the image under
//! review. The first line identifies the file and its position; indented
//! lines follow for the date, size, pending crop, and recent dates:
//!
//! ```text
//! scan_0003.jpg (3/12) [modified]
//!     Date: 2005-03-04 (was: 1996-05-20)
//!     Size: 80x100 (from 100x100)
//!     Crop: left 10, top 0, right 10, bottom 0
//!     Recent: 1:2005-03-04  2:1996-05-20
//! ```
//!
//! Saves and navigation report what happened on disk:
//!
//! ```text
//! Saved 2005-03-04 (trip) 1.jpg (was scan_0003.jpg)
//! Saved 2005-03-04 (trip) 2.jpg, last image
//! This is the first image
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::crop::{Axis, CropGeometry, CropOffsets};
use crate::editor::{Navigation, Outcome};
use crate::gallery::Gallery;
use crate::recent::RecentDates;
use crate::session::{DateStatus, EditSession, Saved};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn date_line(status: DateStatus) -> String {
    match status {
        DateStatus::FromMetadata(date) => format!("{date} (from EXIF)"),
        DateStatus::Changed { date, was } => format!("{date} (was: {was})"),
        DateStatus::New(date) => format!("{date} (new)"),
        DateStatus::Cleared { was } => format!("(none, was: {was})"),
        DateStatus::Unset => "(none)".to_string(),
    }
}

fn crop_line(crop: &CropOffsets) -> String {
    format!(
        "left {}, top {}, right {}, bottom {}",
        crop.left, crop.top, crop.right, crop.bottom
    )
}

/// Recent dates numbered for quick select: `1:2005-03-04  2:1996-05-20`.
pub fn format_recent(recent: &RecentDates) -> String {
    recent
        .iter()
        .enumerate()
        .map(|(i, date)| format!("{}:{date}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

// ============================================================================
// Status
// ============================================================================

pub fn format_status(
    gallery: &Gallery,
    session: &EditSession,
    recent: &RecentDates,
) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!(
        "{} ({}/{})",
        file_name(session.path()),
        gallery.position() + 1,
        gallery.len()
    );
    if session.is_dirty() {
        header.push_str(" [modified]");
    }
    lines.push(header);

    lines.push(format!("{}Date: {}", indent(1), date_line(session.date_status())));

    let size = session.image_size();
    let crop = session.crop();
    if crop.is_zero() {
        lines.push(format!("{}Size: {}x{}", indent(1), size.width, size.height));
    } else {
        let cropped = session.cropped_size();
        lines.push(format!(
            "{}Size: {}x{} (from {}x{})",
            indent(1),
            cropped.width,
            cropped.height,
            size.width,
            size.height
        ));
        lines.push(format!("{}Crop: {}", indent(1), crop_line(&crop)));
    }

    if !recent.is_empty() {
        lines.push(format!("{}Recent: {}", indent(1), format_recent(recent)));
    }
    lines
}

pub fn print_status(gallery: &Gallery, session: &EditSession, recent: &RecentDates) {
    print_lines(&format_status(gallery, session, recent));
}

// ============================================================================
// Save and navigation
// ============================================================================

fn saved_line(saved: &Saved) -> String {
    match &saved.renamed_from {
        Some(old) => format!("Saved {} (was {})", file_name(&saved.path), file_name(old)),
        None => format!("Saved {}", file_name(&saved.path)),
    }
}

pub fn format_outcome(outcome: &Outcome) -> Vec<String> {
    let mut lines = Vec::new();
    let written = outcome.saved.as_ref().filter(|s| s.written);

    match (written, outcome.navigation) {
        (Some(saved), Navigation::AtLast) => lines.push(format!("{}, last image", saved_line(saved))),
        (Some(saved), _) => lines.push(saved_line(saved)),
        (None, _) if outcome.saved.is_some() => lines.push("No changes to save".to_string()),
        (None, _) => {}
    }

    if let Some(stale) = written.and_then(|s| s.left_behind.as_ref()) {
        lines.push(format!(
            "{}Warning: could not remove {}",
            indent(1),
            file_name(stale)
        ));
    }

    match outcome.navigation {
        Navigation::AtFirst => lines.push("This is the first image".to_string()),
        Navigation::AtLast if written.is_none() => lines.push("This is the last image".to_string()),
        _ => {}
    }
    lines
}

pub fn print_outcome(outcome: &Outcome) {
    print_lines(&format_outcome(outcome));
}

// ============================================================================
// Crop interaction
// ============================================================================

/// Where the image and its crop lines sit on screen.
pub fn format_geometry(geometry: &CropGeometry, crop: &CropOffsets) -> Vec<String> {
    let display = geometry.display_size();
    let origin = geometry.origin();
    let b = geometry.boundaries(crop);
    vec![
        format!(
            "Display: {}x{} at ({}, {}), scale {:.3}",
            display.width,
            display.height,
            origin.x,
            origin.y,
            geometry.scale()
        ),
        format!(
            "{}Crop lines: left x={}, top y={}, right x={}, bottom y={}",
            indent(1),
            b.left_x,
            b.top_y,
            b.right_x,
            b.bottom_y
        ),
    ]
}

pub fn format_hover(axis: Option<Axis>) -> String {
    match axis {
        Some(Axis::Horizontal) => "<-> drag to resize horizontally".to_string(),
        Some(Axis::Vertical) => "^/v drag to resize vertically".to_string(),
        None => "no crop edge here".to_string(),
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CropConfig, ScanConfig};
    use crate::crop::Size;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::review_folder;
    use std::path::PathBuf;

    fn fixture(names: &[&str], date: Option<&str>) -> (tempfile::TempDir, Gallery, EditSession) {
        let (tmp, folder) = review_folder("trip");
        for name in names {
            std::fs::write(folder.join(name), b"x").unwrap();
        }
        let gallery = Gallery::open(&folder, &ScanConfig::default()).unwrap();
        let backend = MockBackend::new(100, 100);
        if let Some(date) = date {
            backend.set_date(gallery.current(), date);
        }
        let session = EditSession::load(gallery.current(), &backend).unwrap();
        (tmp, gallery, session)
    }

    fn saved(name: &str, written: bool, renamed_from: Option<&str>) -> Saved {
        Saved {
            path: PathBuf::from("/p/trip").join(name),
            written,
            renamed_from: renamed_from.map(|n| PathBuf::from("/p/trip").join(n)),
            left_behind: None,
        }
    }

    // =========================================================================
    // Status
    // =========================================================================

    #[test]
    fn status_for_clean_undated_image() {
        let (_tmp, gallery, session) = fixture(&["a.jpg", "b.jpg"], None);
        let lines = format_status(&gallery, &session, &RecentDates::new(9));
        assert_eq!(
            lines,
            vec!["a.jpg (1/2)", "    Date: (none)", "    Size: 100x100"]
        );
    }

    #[test]
    fn status_shows_edits_crop_and_recent() {
        let (_tmp, gallery, mut session) = fixture(&["a.jpg"], Some("1996-05-20"));
        let mut recent = RecentDates::new(9);
        recent.push("1996-05-20".parse().unwrap());
        session.set_date("3/4/05", &mut recent).unwrap();
        session
            .set_crop(CropOffsets::new(10, 0, 10, 0), &CropConfig::default())
            .unwrap();

        let lines = format_status(&gallery, &session, &recent);
        assert_eq!(
            lines,
            vec![
                "a.jpg (1/1) [modified]",
                "    Date: 2005-03-04 (was: 1996-05-20)",
                "    Size: 80x100 (from 100x100)",
                "    Crop: left 10, top 0, right 10, bottom 0",
                "    Recent: 1:2005-03-04  2:1996-05-20",
            ]
        );
    }

    #[test]
    fn date_lines_for_every_status() {
        let d = "2024-01-15".parse().unwrap();
        let w = "1990-01-01".parse().unwrap();
        assert_eq!(date_line(DateStatus::FromMetadata(d)), "2024-01-15 (from EXIF)");
        assert_eq!(
            date_line(DateStatus::Changed { date: d, was: w }),
            "2024-01-15 (was: 1990-01-01)"
        );
        assert_eq!(date_line(DateStatus::New(d)), "2024-01-15 (new)");
        assert_eq!(date_line(DateStatus::Cleared { was: w }), "(none, was: 1990-01-01)");
        assert_eq!(date_line(DateStatus::Unset), "(none)");
    }

    // =========================================================================
    // Outcomes
    // =========================================================================

    #[test]
    fn outcome_saved_and_moved() {
        let outcome = Outcome {
            saved: Some(saved("trip 1.jpg", true, Some("scan.jpg"))),
            navigation: Navigation::Moved,
        };
        assert_eq!(format_outcome(&outcome), vec!["Saved trip 1.jpg (was scan.jpg)"]);
    }

    #[test]
    fn outcome_saved_last_image() {
        let outcome = Outcome {
            saved: Some(saved("trip 4.jpg", true, None)),
            navigation: Navigation::AtLast,
        };
        assert_eq!(format_outcome(&outcome), vec!["Saved trip 4.jpg, last image"]);
    }

    #[test]
    fn outcome_nothing_to_save() {
        let outcome = Outcome {
            saved: Some(saved("trip 1.jpg", false, None)),
            navigation: Navigation::Stayed,
        };
        assert_eq!(format_outcome(&outcome), vec!["No changes to save"]);
    }

    #[test]
    fn outcome_boundaries() {
        let first = Outcome {
            saved: None,
            navigation: Navigation::AtFirst,
        };
        assert_eq!(format_outcome(&first), vec!["This is the first image"]);

        let last = Outcome {
            saved: None,
            navigation: Navigation::AtLast,
        };
        assert_eq!(format_outcome(&last), vec!["This is the last image"]);

        let moved = Outcome {
            saved: None,
            navigation: Navigation::Moved,
        };
        assert!(format_outcome(&moved).is_empty());
    }

    #[test]
    fn outcome_warns_about_leftover_source() {
        let mut s = saved("trip 1.jpg", true, Some("scan.jpg"));
        s.left_behind = s.renamed_from.clone();
        let outcome = Outcome {
            saved: Some(s),
            navigation: Navigation::Moved,
        };
        assert_eq!(
            format_outcome(&outcome),
            vec![
                "Saved trip 1.jpg (was scan.jpg)",
                "    Warning: could not remove scan.jpg",
            ]
        );
    }

    // =========================================================================
    // Crop interaction
    // =========================================================================

    #[test]
    fn geometry_lines() {
        let geometry =
            CropGeometry::new(Size::new(400, 200), Size::new(800, 600), &CropConfig::default())
                .unwrap();
        let lines = format_geometry(&geometry, &CropOffsets::new(10, 20, 30, 40));
        assert_eq!(
            lines,
            vec![
                "Display: 400x200 at (200, 200), scale 1.000",
                "    Crop lines: left x=210, top y=220, right x=570, bottom y=360",
            ]
        );
    }

    #[test]
    fn hover_text() {
        assert_eq!(
            format_hover(Some(Axis::Horizontal)),
            "<-> drag to resize horizontally"
        );
        assert_eq!(
            format_hover(Some(Axis::Vertical)),
            "^/v drag to resize vertically"
        );
        assert_eq!(format_hover(None), "no crop edge here");
    }

    #[test]
    fn recent_list_is_numbered() {
        let mut recent = RecentDates::new(9);
        recent.push("2001-01-01".parse().unwrap());
        recent.push("2002-02-02".parse().unwrap());
        assert_eq!(format_recent(&recent), "1:2002-02-02  2:2001-01-01");
    }
}
