use crate::color::Rgb;
use crate::particle::{Particle, ParticleKind};
use crate::render::Canvas;
use rand::Rng;

/// Fixed-size 2D cell grid. Every cell is empty or holds one particle.
///
/// Coordinates are signed so movement rules can probe neighbors at the
/// edges; anything outside `[0, rows) x [0, cols)` is out of bounds.
/// Out-of-bounds reads report no particle and out-of-bounds writes are
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: u32,
    cells: Vec<Option<Particle>>,
}

impl Grid {
    /// Grid covering a `width_px x height_px` window with square cells of
    /// `cell_size` pixels (integer division; partial cells are dropped)
    pub fn new(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let rows = (height_px / cell_size) as usize;
        let cols = (width_px / cell_size) as usize;
        Self {
            rows,
            cols,
            cell_size,
            cells: vec![None; rows * cols],
        }
    }

    /// Empty grid with the same dimensions and cell size as `other`
    pub fn new_like(other: &Grid) -> Self {
        Self {
            rows: other.rows,
            cols: other.cols,
            cell_size: other.cell_size,
            cells: vec![None; other.rows * other.cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Storage index for (row, col), or None when out of bounds
    fn index(&self, row: isize, col: isize) -> Option<usize> {
        if row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols {
            Some(row as usize * self.cols + col as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        self.index(row, col).is_some()
    }

    /// True only for in-bounds unoccupied cells. Out of bounds counts as
    /// occupied, which keeps particles from leaving the grid.
    pub fn is_empty(&self, row: isize, col: isize) -> bool {
        self.index(row, col)
            .map(|idx| self.cells[idx].is_none())
            .unwrap_or(false)
    }

    pub fn get(&self, row: isize, col: isize) -> Option<Particle> {
        self.index(row, col).and_then(|idx| self.cells[idx])
    }

    pub fn set_cell(&mut self, row: isize, col: isize, particle: Particle) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = Some(particle);
        }
    }

    /// Create a fresh particle of `kind`, but never over an existing one
    pub fn add<R: Rng + ?Sized>(&mut self, row: isize, col: isize, kind: ParticleKind, rng: &mut R) {
        if let Some(idx) = self.index(row, col) {
            if self.cells[idx].is_none() {
                self.cells[idx] = Some(Particle::new(kind, rng));
            }
        }
    }

    pub fn erase(&mut self, row: isize, col: isize) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = None;
        }
    }

    /// Number of occupied cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Number of cells holding a particle of `kind`
    pub fn count(&self, kind: ParticleKind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|particle| particle.kind() == kind)
            .count()
    }

    /// Cell under a window pixel position. May be out of bounds.
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> (isize, isize) {
        ((y / self.cell_size) as isize, (x / self.cell_size) as isize)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, default_color: Rgb) {
        let size = self.cell_size;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let color = self.cells[row * self.cols + col]
                    .map(|particle| particle.color())
                    .unwrap_or(default_color);
                canvas.fill_rect(col as u32 * size, row as u32 * size, size, size, color);
            }
        }
    }
}
