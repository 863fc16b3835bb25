//! Interactive commands, one per input line.
//!
//! | Line | Action |
//! |---|---|
//! | `m` | Mirror horizontally |
//! | `r` / `R` | Rotate clockwise / counter-clockwise |
//! | `d <text>` | Set the date from free-form text |
//! | `1`–`9` | Use a recent date |
//! | `crop L T R B` | Set the crop offsets in image pixels |
//! | `c` | Reset the crop |
//! | `n` / `p` | Next / previous image (saves pending edits) |
//! | `s` | Save and move on |
//! | `u` | Undo all unsaved edits |
//! | `q` | Quit |
//! | `view W H` | Set the display viewport |
//! | `down X Y`, `move X Y`, `up` | Pointer events for dragging crop edges |
//! | `hover X Y` | Which resize handle is under the pointer |
//! | `info` | Show the status again |
//! | `?` | List commands |

use crate::crop::{CropOffsets, Point, Size};
use crate::editor::QuitChoice;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0} (? for help)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mirror,
    RotateClockwise,
    RotateCounterClockwise,
    Date(String),
    QuickDate(usize),
    Crop(CropOffsets),
    ResetCrop,
    Next,
    Previous,
    Save,
    Undo,
    Quit,
    View(Size),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Hover(Point),
    Info,
    Help,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word {
            "" => return Err(CommandError::Empty),
            "m" | "mirror" => Command::Mirror,
            "r" | "rotate" => Command::RotateClockwise,
            "R" | "rotate-ccw" => Command::RotateCounterClockwise,
            "d" | "date" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("d <date>"));
                }
                Command::Date(rest.to_string())
            }
            "c" | "reset-crop" => Command::ResetCrop,
            "crop" => {
                let [left, top, right, bottom] = numbers::<u32, 4>(&args)
                    .ok_or(CommandError::Usage("crop <left> <top> <right> <bottom>"))?;
                Command::Crop(CropOffsets::new(left, top, right, bottom))
            }
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "s" | "save" => Command::Save,
            "u" | "undo" => Command::Undo,
            "q" | "quit" => Command::Quit,
            "view" => {
                let [w, h] = numbers::<u32, 2>(&args)
                    .ok_or(CommandError::Usage("view <width> <height>"))?;
                Command::View(Size::new(w, h))
            }
            "down" => Command::PointerDown(point(&args, "down <x> <y>")?),
            "move" => Command::PointerMove(point(&args, "move <x> <y>")?),
            "up" => Command::PointerUp,
            "hover" => Command::Hover(point(&args, "hover <x> <y>")?),
            "info" => Command::Info,
            "?" | "help" => Command::Help,
            digit if digit.len() == 1 && matches!(digit.as_bytes()[0], b'1'..=b'9') => {
                Command::QuickDate(usize::from(digit.as_bytes()[0] - b'0'))
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn numbers<T: FromStr, const N: usize>(args: &[&str]) -> Option<[T; N]> {
    if args.len() != N {
        return None;
    }
    let parsed = args
        .iter()
        .map(|a| a.parse::<T>().ok())
        .collect::<Option<Vec<T>>>()?;
    parsed.try_into().ok()
}

fn point(args: &[&str], usage: &'static str) -> Result<Point, CommandError> {
    let [x, y] = numbers::<i32, 2>(args).ok_or(CommandError::Usage(usage))?;
    Ok(Point::new(x, y))
}

/// Answer to the unsaved-edits prompt. Anything unrecognised cancels.
pub fn parse_quit_choice(line: &str) -> QuitChoice {
    match line.trim().to_lowercase().as_str() {
        "s" | "save" | "y" | "yes" => QuitChoice::Save,
        "d" | "discard" | "n" | "no" => QuitChoice::Discard,
        _ => QuitChoice::Cancel,
    }
}

/// Help text listing every command.
pub fn help_lines() -> Vec<String> {
    [
        "m            mirror horizontally",
        "r / R        rotate clockwise / counter-clockwise",
        "d <date>     set date (e.g. 2024-01-15, 3/4/05, 15 Jan 2024)",
        "1-9          use a recent date",
        "crop L T R B crop pixels from each edge",
        "c            reset crop",
        "n / p        next / previous image (saves pending edits)",
        "s            save and move on",
        "u            undo unsaved edits",
        "view W H     set display size for pointer commands",
        "down X Y     press on a crop edge",
        "move X Y     drag the pressed edge",
        "up           release",
        "hover X Y    show which edge is under the pointer",
        "info         show status",
        "q            quit",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
