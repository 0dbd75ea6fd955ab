use crate::color::Rgb;
use crate::grid::Grid;
use crate::input::InputEvent;
use crate::particle::ParticleKind;
use crate::render::Canvas;
use crate::settings::{Action, ToolSettings};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Sandbox simulation state: the grid, the brush tool, and the random
/// source every color sample and tie-break draws from
pub struct Simulation {
    pub grid: Grid,
    pub tool: ToolSettings,
    ticks: u64,
    rng: Xoshiro256StarStar,
}

impl Simulation {
    /// New simulation seeded from OS entropy
    pub fn new(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        Self::with_rng(width_px, height_px, cell_size, Xoshiro256StarStar::from_entropy())
    }

    /// New simulation with a fixed seed for reproducible runs
    pub fn with_seed(width_px: u32, height_px: u32, cell_size: u32, seed: u64) -> Self {
        Self::with_rng(width_px, height_px, cell_size, Xoshiro256StarStar::seed_from_u64(seed))
    }

    fn with_rng(width_px: u32, height_px: u32, cell_size: u32, rng: Xoshiro256StarStar) -> Self {
        Self {
            grid: Grid::new(width_px, height_px, cell_size),
            tool: ToolSettings::default(),
            ticks: 0,
            rng,
        }
    }

    /// Number of completed update passes
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one update pass over the whole grid.
    ///
    /// Rows are scanned from the bottom up so a particle that just fell is
    /// never reached again in the same pass. Columns go left to right and
    /// the grid is mutated in place, so later cells see neighbors that
    /// already moved this pass (sideways movers can be revisited).
    pub fn update(&mut self) {
        let rows = self.grid.rows() as isize;
        let cols = self.grid.cols() as isize;

        for row in (0..rows).rev() {
            for col in 0..cols {
                let Some(particle) = self.grid.get(row, col) else {
                    continue;
                };
                let (new_row, new_col) = particle.update(&self.grid, row, col, &mut self.rng);
                if (new_row, new_col) == (row, col) {
                    continue;
                }
                // Rules only target empty cells, and empty cells are in bounds
                debug_assert!(self.grid.in_bounds(new_row, new_col));
                if !self.grid.in_bounds(new_row, new_col) {
                    log::warn!(
                        "{} at ({}, {}) targeted out-of-bounds ({}, {}); kept in place",
                        particle.kind().name(),
                        row,
                        col,
                        new_row,
                        new_col
                    );
                    continue;
                }
                self.grid.set_cell(new_row, new_col, particle);
                self.grid.erase(row, col);
            }
        }

        self.ticks += 1;
    }

    /// Apply the brush to the `n x n` block whose top-left cell is
    /// (row, col). Cells outside the grid are skipped.
    pub fn apply_brush(&mut self, row: isize, col: isize) {
        let size = self.tool.brush as isize;
        for r in row..row + size {
            for c in col..col + size {
                match self.tool.action {
                    Action::Create => self.grid.add(r, c, self.tool.particle, &mut self.rng),
                    Action::Erase => self.grid.erase(r, c),
                }
            }
        }
    }

    /// Apply the brush anchored at the cell under a window pixel
    pub fn apply_brush_at_pixel(&mut self, x: u32, y: u32) {
        let (row, col) = self.grid.cell_at_pixel(x, y);
        self.apply_brush(row, col);
    }

    /// Clear every cell. Dimensions, tool and tick count are kept.
    pub fn reset(&mut self) {
        let cleared = self.grid.population();
        self.grid = Grid::new_like(&self.grid);
        log::info!("Grid reset, {} particles cleared", cleared);
    }

    /// Rebuild an empty grid for a new window size
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        let cell_size = self.grid.cell_size();
        let resized = Grid::new(width_px, height_px, cell_size);
        if resized.rows() != self.grid.rows() || resized.cols() != self.grid.cols() {
            log::info!(
                "Resizing grid to {}x{} cells ({}x{} px)",
                resized.cols(),
                resized.rows(),
                width_px,
                height_px
            );
            self.grid = resized;
        }
    }

    /// Apply a tool or grid event. Pause and quit belong to the app and are
    /// ignored here.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Reset => self.reset(),
            InputEvent::Select(kind) => {
                self.tool.select(kind);
                log::debug!("Selected {} (brush {})", kind.name(), self.tool.brush);
            }
            InputEvent::SetAction(action) => {
                self.tool.set_action(action);
                log::debug!("Brush mode: {}", action.name());
            }
            InputEvent::TogglePause | InputEvent::Quit => {}
        }
    }

    /// Occupied cells per particle kind
    pub fn census(&self) -> [(ParticleKind, usize); 3] {
        ParticleKind::ALL.map(|kind| (kind, self.grid.count(kind)))
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, default_color: Rgb) {
        self.grid.draw(canvas, default_color);
    }

    /// Brush cursor: a square with top-left at the pointer pixel
    pub fn draw_cursor<C: Canvas + ?Sized>(&self, canvas: &mut C, x: u32, y: u32) {
        let size = self.tool.brush * self.grid.cell_size();
        canvas.fill_rect(x, y, size, size, self.tool.cursor_color());
    }
}
