mod app;
mod color;
mod config;
mod grid;
mod input;
mod particle;
mod render;
mod settings;
mod simulation;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::SandboxConfig;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "falling-sand")]
#[command(about = "Falling-sand cellular automaton sandbox in the terminal")]
struct Args {
    /// Config file (JSON). Defaults to <config dir>/falling-sand/config.json if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to this path and exit
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,

    /// Pixels per grid cell (1-16)
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Milliseconds per tick (5-500)
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Window width in pixels, 1-4096 (default: fill the terminal)
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels, 1-4096 (default: fill the terminal, two pixels per row)
    #[arg(long)]
    height: Option<u32>,

    /// Log file (filtered by RUST_LOG, default level info)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Load the config file (explicit or default location) and apply CLI overrides
    fn resolve_config(&self) -> Result<SandboxConfig> {
        let mut config = match &self.config {
            Some(path) => SandboxConfig::load_from_file(path)?,
            None => match SandboxConfig::default_path().filter(|p| p.exists()) {
                Some(path) => SandboxConfig::load_from_file(&path)?,
                None => SandboxConfig::default(),
            },
        };

        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        Ok(config.clamped())
    }
}

/// Route log output to a file; stderr belongs to the terminal UI
fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(|| dirs::cache_dir().map(|p| p.join("falling-sand").join("falling-sand.log"))) else {
        return;
    };
    // The UI has not started yet, so stderr is still readable
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Logging disabled: cannot open {}: {}", path.display(), err);
            return;
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone());

    let config = args.resolve_config()?;
    log::info!(
        "Config: cell size {}, tick {} ms, seed {:?}",
        config.cell_size,
        config.tick_ms,
        config.seed
    );

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let res = run_then_restore(|| run_session(config), restore_terminal);
    if let Err(err) = &res {
        log::error!("Terminal error: {:#}", err);
    }
    res
}

/// Run `session`, then `restore` whether or not the session failed. A
/// session error takes precedence over a restore error.
fn run_then_restore<T>(
    session: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    let res = session();
    let restored = restore().context("failed to restore terminal");
    let value = res?;
    restored?;
    Ok(value)
}

/// Everything that happens while raw mode is on
fn run_session(config: SandboxConfig) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let size = terminal.size()?;
    let canvas = ui::canvas_area(Rect::new(0, 0, size.width, size.height));
    let mut app = App::new(config, canvas);

    let res = run_app(&mut terminal, &mut app);
    log::info!("Exiting after {} ticks", app.simulation.ticks());
    res.context("terminal I/O failed")
}

/// Leave raw mode, mouse capture and the alternate screen. Every step runs
/// even when an earlier one fails; the first failure is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let frame_duration = Duration::from_millis(app.config.tick_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Wait up to one frame for input, then drain whatever else is queued
        let mut timeout = frame_duration;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = input::map_key(key) {
                        app.handle_event(input);
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    app.resize(ui::canvas_area(Rect::new(0, 0, width, height)));
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CELL_SIZE_RANGE, TICK_MS_RANGE, WINDOW_PX_RANGE};
    use std::cell::Cell;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "falling-sand",
            "--config",
            "/nonexistent/falling-sand.json",
        ]);
        assert!(args.resolve_config().is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SandboxConfig {
            cell_size: 2,
            tick_ms: 30,
            ..SandboxConfig::default()
        }
        .save_to_file(&path)
        .unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let args = Args::parse_from([
            "falling-sand",
            "--config",
            path_arg.as_str(),
            "--tick-ms",
            "1",
            "--seed",
            "9",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.cell_size, 2);
        assert_eq!(config.tick_ms, TICK_MS_RANGE.0);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_cell_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SandboxConfig::default().save_to_file(&path).unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let args = Args::parse_from(["falling-sand", "--config", path_arg.as_str(), "--cell-size", "99"]);
        assert_eq!(args.resolve_config().unwrap().cell_size, CELL_SIZE_RANGE.1);
    }

    #[test]
    fn test_window_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SandboxConfig::default().save_to_file(&path).unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let args = Args::parse_from([
            "falling-sand",
            "--config",
            path_arg.as_str(),
            "--width",
            "4000000000",
            "--height",
            "0",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.width, Some(WINDOW_PX_RANGE.1));
        assert_eq!(config.height, Some(WINDOW_PX_RANGE.0));
    }

    #[test]
    fn test_restore_runs_after_failed_session() {
        let restored = Cell::new(false);
        let res: Result<()> = run_then_restore(
            || Err(anyhow::anyhow!("terminal size unavailable")),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(restored.get());
        assert_eq!(res.unwrap_err().to_string(), "terminal size unavailable");
    }

    #[test]
    fn test_restore_failure_is_reported() {
        let res = run_then_restore(
            || Ok(7),
            || Err(io::Error::new(io::ErrorKind::Other, "not a tty")),
        );
        assert_eq!(res.unwrap_err().to_string(), "failed to restore terminal");

        // The session error wins when both fail
        let res: Result<()> = run_then_restore(
            || Err(anyhow::anyhow!("draw failed")),
            || Err(io::Error::new(io::ErrorKind::Other, "not a tty")),
        );
        assert_eq!(res.unwrap_err().to_string(), "draw failed");

        assert_eq!(run_then_restore(|| Ok(7), || Ok(())).unwrap(), 7);
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("falling-sand.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());

        // A regular file where a directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        assert!(open_log_file(&blocker.join("falling-sand.log")).is_err());
    }
}
