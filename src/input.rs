use crate::particle::ParticleKind;
use crate::settings::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Discrete input events understood by the sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Clear the grid
    Reset,
    Select(ParticleKind),
    SetAction(Action),
    TogglePause,
    Quit,
}

/// Map a key press to an input event
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(InputEvent::Reset),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Select(ParticleKind::Sand)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::Select(ParticleKind::Water)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Select(ParticleKind::Rock)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::SetAction(Action::Create)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(InputEvent::SetAction(Action::Erase)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::TogglePause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Continuous pointer state, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    /// Last known position; None until the mouse is first seen over the canvas
    pub position: Option<(u32, u32)>,
    /// Left button held
    pub held: bool,
}

impl PointerState {
    /// Update from a terminal mouse event. `canvas` is the terminal area the
    /// pixel buffer is drawn into; each terminal row holds two pixel rows.
    pub fn apply_mouse(&mut self, event: MouseEvent, canvas: Rect) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.held = true,
            MouseEventKind::Up(MouseButton::Left) => self.held = false,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {}
            _ => return,
        }
        self.position = to_canvas_pixel(event.column, event.row, canvas);
    }
}

fn to_canvas_pixel(column: u16, row: u16, canvas: Rect) -> Option<(u32, u32)> {
    let inside = column >= canvas.x
        && column < canvas.x + canvas.width
        && row >= canvas.y
        && row < canvas.y + canvas.height;
    inside.then(|| ((column - canvas.x) as u32, (row - canvas.y) as u32 * 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(InputEvent::Reset));
        assert_eq!(
            map_key(key(KeyCode::Char('s'))),
            Some(InputEvent::Select(ParticleKind::Sand))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('W'))),
            Some(InputEvent::Select(ParticleKind::Water))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('r'))),
            Some(InputEvent::Select(ParticleKind::Rock))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('c'))),
            Some(InputEvent::SetAction(Action::Create))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('e'))),
            Some(InputEvent::SetAction(Action::Erase))
        );
        assert_eq!(map_key(key(KeyCode::Char('p'))), Some(InputEvent::TogglePause));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits_instead_of_create() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(InputEvent::Quit));
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_s), None);
    }

    #[test]
    fn test_pointer_press_drag_release() {
        let canvas = Rect::new(10, 1, 20, 10);
        let mut pointer = PointerState::default();

        pointer.apply_mouse(mouse(MouseEventKind::Moved, 12, 3), canvas);
        assert_eq!(pointer.position, Some((2, 4)));
        assert!(!pointer.held);

        pointer.apply_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 1), canvas);
        assert_eq!(pointer.position, Some((5, 0)));
        assert!(pointer.held);

        pointer.apply_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 16, 2), canvas);
        assert_eq!(pointer.position, Some((6, 2)));
        assert!(pointer.held);

        pointer.apply_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 16, 2), canvas);
        assert!(!pointer.held);
    }

    #[test]
    fn test_pointer_outside_canvas() {
        let canvas = Rect::new(10, 1, 20, 10);
        let mut pointer = PointerState::default();
        pointer.apply_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5), canvas);
        assert!(pointer.held);
        assert_eq!(pointer.position, None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let canvas = Rect::new(0, 0, 20, 10);
        let mut pointer = PointerState::default();
        pointer.apply_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 3, 3), canvas);
        pointer.apply_mouse(mouse(MouseEventKind::ScrollDown, 3, 3), canvas);
        assert_eq!(pointer, PointerState::default());
    }
}
