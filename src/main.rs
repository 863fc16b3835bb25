use clap::{Parser, Subcommand};
use photo_review::commands::{self, Command};
use photo_review::config;
use photo_review::crop::Size;
use photo_review::editor::{Editor, EditorError, QuitChoice};
use photo_review::gallery::GalleryError;
use photo_review::imaging::{RotateDirection, RustBackend};
use photo_review::output;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-review")]
#[command(about = "Review scanned photos: orient, crop, date and rename")]
#[command(long_about = "\
Review scanned photos: orient, crop, date and rename

Images in FOLDER are shown one at a time in name order. Commands are read
from stdin, one per line (? lists them). Saving writes a JPEG named after
the date and the folder, with the date stored in EXIF:

  Holiday/
  ├── scan_0001.jpg   →  2005-03-04 (Holiday) 1.jpg
  ├── scan_0002.jpg   →  2005-03-04 (Holiday) 2.jpg
  └── scan_0003.tif   →  Holiday 1.jpg        (no date)

Dates are typed the way they appear on the print: 2005-03-04, 3/4/05,
4 Mar 2005, 20050304.

Run 'photo-review gen-config' to generate a documented photo-review.toml.")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Folder of scanned images
    folder: Option<PathBuf>,

    /// Config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display size for pointer commands, e.g. 1280x800
    #[arg(long, value_parser = parse_viewport)]
    viewport: Option<Size>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Print a stock photo-review.toml with all options documented
    GenConfig,
}

fn parse_viewport(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let height = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    Ok(Size::new(width, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(CliCommand::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }
    let Some(folder) = cli.folder else {
        return Err("missing FOLDER (see --help)".into());
    };

    let config = config::load_config(cli.config.as_deref())?;
    let mut editor = match Editor::open(&folder, RustBackend::new(), config) {
        Ok(editor) => editor,
        Err(EditorError::Gallery(e @ GalleryError::Empty(_))) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(viewport) = cli.viewport {
        editor.resize(viewport);
    }

    run(&mut editor)?;
    Ok(())
}

/// What the loop does after a command.
enum Flow {
    Continue,
    Exit,
}

fn run(editor: &mut Editor<RustBackend>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print_status(editor);
    loop {
        prompt("> ")?;
        let Some(line) = lines.next().transpose()? else {
            if editor.has_pending_edits() {
                log::warn!(
                    "Input closed; discarding unsaved edits to {}",
                    editor.session().path().display()
                );
            }
            return Ok(());
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(commands::CommandError::Empty) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let choice = if command == Command::Quit && editor.has_pending_edits() {
            prompt("Unsaved changes: [s]ave, [d]iscard, [c]ancel? ")?;
            let answer = lines.next().transpose()?.unwrap_or_default();
            Some(commands::parse_quit_choice(&answer))
        } else {
            None
        };

        match dispatch(editor, command, choice) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}

fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

fn print_status(editor: &Editor<RustBackend>) {
    output::print_status(editor.gallery(), editor.session(), editor.recent());
}

fn dispatch(
    editor: &mut Editor<RustBackend>,
    command: Command,
    quit_choice: Option<QuitChoice>,
) -> Result<Flow, EditorError> {
    match command {
        Command::Mirror => editor.mirror(),
        Command::RotateClockwise => editor.rotate(RotateDirection::Clockwise),
        Command::RotateCounterClockwise => editor.rotate(RotateDirection::CounterClockwise),
        Command::Date(text) => {
            editor.set_date(&text)?;
        }
        Command::QuickDate(n) => {
            if editor.quick_select(n).is_none() {
                println!("No recent date {n}");
                return Ok(Flow::Continue);
            }
        }
        Command::Crop(offsets) => editor.set_crop(offsets)?,
        Command::ResetCrop => editor.reset_crop(),
        Command::Next => output::print_outcome(&editor.next()?),
        Command::Previous => output::print_outcome(&editor.previous()?),
        Command::Save => output::print_outcome(&editor.save()?),
        Command::Undo => editor.undo(),
        Command::Quit => {
            if editor.quit(quit_choice.unwrap_or(QuitChoice::Discard))? {
                return Ok(Flow::Exit);
            }
        }
        Command::View(size) => {
            editor.resize(size);
            if let Some(geometry) = editor.geometry() {
                output::print_lines(&output::format_geometry(&geometry, &editor.session().crop()));
            }
            return Ok(Flow::Continue);
        }
        Command::Hover(point) => {
            println!("{}", output::format_hover(editor.hover(point)));
            return Ok(Flow::Continue);
        }
        Command::PointerDown(point) => {
            if editor.pointer_down(point).is_none() {
                println!("{}", output::format_hover(None));
            }
            return Ok(Flow::Continue);
        }
        Command::PointerMove(point) => {
            editor.pointer_move(point)?;
            return Ok(Flow::Continue);
        }
        Command::PointerUp => {
            if editor.pointer_up().is_none() {
                return Ok(Flow::Continue);
            }
        }
        Command::Info => {}
        Command::Help => {
            output::print_lines(&commands::help_lines());
            return Ok(Flow::Continue);
        }
    }
    print_status(editor);
    Ok(Flow::Continue)
}
