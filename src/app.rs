use crate::config::SandboxConfig;
use crate::input::{InputEvent, PointerState};
use crate::simulation::Simulation;
use crossterm::event::MouseEvent;
use ratatui::layout::Rect;

/// Main application state
pub struct App {
    pub simulation: Simulation,
    pub config: SandboxConfig,
    pub pointer: PointerState,
    pub paused: bool,
    pub should_quit: bool,
    /// Terminal area the pixel canvas is drawn into
    pub canvas: Rect,
}

impl App {
    pub fn new(config: SandboxConfig, canvas: Rect) -> Self {
        let (width, height) = config.window_size(canvas.width as u32, canvas.height as u32 * 2);
        let simulation = match config.seed {
            Some(seed) => Simulation::with_seed(width, height, config.cell_size, seed),
            None => Simulation::new(width, height, config.cell_size),
        };
        log::info!(
            "Sandbox {}x{} px, {}x{} cells (cell size {})",
            width,
            height,
            simulation.grid.cols(),
            simulation.grid.rows(),
            simulation.grid.cell_size()
        );
        Self {
            simulation,
            config,
            pointer: PointerState::default(),
            paused: false,
            should_quit: false,
            canvas,
        }
    }

    /// One tick: paint with the brush while the button is held, then run
    /// an update pass unless paused
    pub fn tick(&mut self) {
        if self.pointer.held {
            if let Some((x, y)) = self.pointer.position {
                self.simulation.apply_brush_at_pixel(x, y);
            }
        }
        if !self.paused {
            self.simulation.update();
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.should_quit = true,
            InputEvent::TogglePause => self.toggle_pause(),
            other => self.simulation.handle_event(other),
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.pointer.apply_mouse(event, self.canvas);
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Follow a terminal resize. A fixed configured size is kept as is.
    pub fn resize(&mut self, canvas: Rect) {
        self.canvas = canvas;
        let (width, height) = self
            .config
            .window_size(canvas.width as u32, canvas.height as u32 * 2);
        self.simulation.resize(width, height);
    }
}
