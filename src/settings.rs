use crate::color::Rgb;
use crate::particle::ParticleKind;

/// What the brush does to the cells under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Add particles to empty cells
    #[default]
    Create,
    /// Clear cells
    Erase,
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Create => "Create",
            Action::Erase => "Erase",
        }
    }
}

/// Current brush tool: selected particle kind, action, and brush size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSettings {
    pub particle: ParticleKind,
    pub action: Action,
    /// Brush edge length in cells
    pub brush: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        let particle = ParticleKind::default();
        Self {
            particle,
            action: Action::default(),
            brush: particle.brush_size(),
        }
    }
}

impl ToolSettings {
    /// Select a particle kind; the brush size follows the kind
    pub fn select(&mut self, particle: ParticleKind) {
        self.particle = particle;
        self.brush = particle.brush_size();
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    /// Overlay color for the brush cursor
    pub fn cursor_color(&self) -> Rgb {
        match self.action {
            Action::Erase => Rgb::WHITE,
            Action::Create => self.particle.cursor_color(),
        }
    }
}
