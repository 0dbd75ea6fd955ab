use crate::color::Rgb;
use crate::grid::Grid;
use rand::seq::SliceRandom;
use rand::Rng;

const WATER_COLORS: [Rgb; 4] = [
    Rgb::new(65, 107, 223),
    Rgb::new(93, 151, 231),
    Rgb::new(62, 164, 240),
    Rgb::new(0, 112, 255),
];

const ROCK_COLORS: [Rgb; 3] = [
    Rgb::new(128, 128, 128),
    Rgb::new(146, 141, 133),
    Rgb::new(135, 135, 135),
];

/// Particle variants. The set is closed; every rule below matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleKind {
    /// Falls, then slides diagonally into piles
    #[default]
    Sand,
    /// Falls, slides diagonally, then spreads sideways
    Water,
    /// Static
    Rock,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] = [ParticleKind::Sand, ParticleKind::Water, ParticleKind::Rock];

    pub fn name(&self) -> &str {
        match self {
            ParticleKind::Sand => "Sand",
            ParticleKind::Water => "Water",
            ParticleKind::Rock => "Rock",
        }
    }

    /// Brush edge length in cells used when this kind is selected
    pub fn brush_size(&self) -> u32 {
        match self {
            ParticleKind::Sand | ParticleKind::Water => 2,
            ParticleKind::Rock => 3,
        }
    }

    /// Fixed cursor color shown while creating this kind
    pub fn cursor_color(&self) -> Rgb {
        match self {
            ParticleKind::Sand => Rgb::new(180, 140, 60),
            ParticleKind::Water => Rgb::new(93, 151, 231),
            ParticleKind::Rock => Rgb::new(135, 135, 135),
        }
    }

    /// Draw a fresh color for a new particle of this kind
    pub fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        match self {
            ParticleKind::Sand => {
                let hue = rng.gen_range(0.10..=0.12);
                let saturation = rng.gen_range(0.5..=0.7);
                let value = rng.gen_range(0.6..=0.9);
                Rgb::from_hsv(hue, saturation, value)
            }
            ParticleKind::Water => *WATER_COLORS.choose(rng).unwrap_or(&WATER_COLORS[0]),
            ParticleKind::Rock => *ROCK_COLORS.choose(rng).unwrap_or(&ROCK_COLORS[0]),
        }
    }
}

/// A grid occupant. It has no identity of its own; the cell holding it is
/// its only location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    kind: ParticleKind,
    color: Rgb,
}

impl Particle {
    /// New particle with a freshly sampled color
    pub fn new<R: Rng + ?Sized>(kind: ParticleKind, rng: &mut R) -> Self {
        Self {
            kind,
            color: kind.sample_color(rng),
        }
    }

    #[cfg(test)]
    pub fn with_color(kind: ParticleKind, color: Rgb) -> Self {
        Self { kind, color }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Target cell for this particle at (row, col) given the current grid.
    /// Returns (row, col) unchanged when it stays put.
    pub fn update<R: Rng + ?Sized>(&self, grid: &Grid, row: isize, col: isize, rng: &mut R) -> (isize, isize) {
        match self.kind {
            ParticleKind::Sand => fall(grid, row, col, rng, false),
            ParticleKind::Water => fall(grid, row, col, rng, true),
            ParticleKind::Rock => (row, col),
        }
    }
}

/// Shared falling rule: straight down, then the two diagonals below in a
/// fresh random order, then (liquids only) sideways in that same order
fn fall<R: Rng + ?Sized>(grid: &Grid, row: isize, col: isize, rng: &mut R, spreads: bool) -> (isize, isize) {
    let below = row + 1;
    if grid.is_empty(below, col) {
        return (below, col);
    }

    let mut offsets = [-1isize, 1];
    offsets.shuffle(rng);

    if let Some(&dc) = offsets.iter().find(|&&dc| grid.is_empty(below, col + dc)) {
        return (below, col + dc);
    }

    if spreads {
        if let Some(&dc) = offsets.iter().find(|&&dc| grid.is_empty(row, col + dc)) {
            return (row, col + dc);
        }
    }

    (row, col)
}
