use crate::app::App;
use crate::color::Rgb;
use crate::render::PixelBuffer;
use crate::settings::Action;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

fn split(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);
    (layout[0], layout[1])
}

/// Terminal area the pixel canvas occupies (inside the canvas border)
pub fn canvas_area(frame_area: Rect) -> Rect {
    let (_, canvas) = split(frame_area);
    styled_block("").inner(canvas)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let (sidebar, canvas) = split(frame.area());
    render_sidebar(frame, sidebar, app);
    render_canvas(frame, canvas, app);
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(5), // Tool
            Constraint::Min(4),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_tool_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn rgb_swatch(color: Rgb) -> Span<'static> {
    Span::styled("██", Style::default().fg(color.into()))
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Falling Sand ");
    let sim = &app.simulation;

    let (status_text, status_color) = if app.paused {
        ("PAUSED", HIGHLIGHT_COLOR)
    } else {
        ("RUNNING", Color::Green)
    };

    let mut content = vec![
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(Span::styled(
            format!("Tick {}", sim.ticks()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];
    for (kind, count) in sim.census() {
        content.push(Line::from(vec![
            rgb_swatch(kind.cursor_color()),
            Span::styled(format!(" {:<6}{:>8}", kind.name(), count), Style::default().fg(TEXT_COLOR)),
        ]));
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_tool_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Tool ");
    let tool = &app.simulation.tool;

    let mode_color = match tool.action {
        Action::Create => TEXT_COLOR,
        Action::Erase => HIGHLIGHT_COLOR,
    };

    let content = vec![
        Line::from(vec![
            rgb_swatch(tool.cursor_color()),
            Span::styled(format!(" {}", tool.particle.name()), Style::default().fg(TEXT_COLOR)),
        ]),
        Line::from(Span::styled(
            format!("Mode: {}", tool.action.name()),
            Style::default().fg(mode_color),
        )),
        Line::from(Span::styled(
            format!("Brush: {}x{}", tool.brush, tool.brush),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &'static str, desc: &'static str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Mouse", "paint"),
        make_control("S", "sand"),
        make_control("W", "water"),
        make_control("R", "rock"),
        make_control("C", "create mode"),
        make_control("E", "erase mode"),
        make_control("Space", "clear grid"),
        make_control("P", "pause/resume"),
        make_control("Q", "quit"),
    ];

    frame.render_widget(Paragraph::new(content).block(styled_block(" Controls ")), area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut pixels = PixelBuffer::for_terminal(inner.width, inner.height, Rgb::BLACK);
    app.simulation.draw(&mut pixels, app.config.background);
    if let Some((x, y)) = app.pointer.position {
        app.simulation.draw_cursor(&mut pixels, x, y);
    }

    frame.render_widget(pixels.half_blocks(), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_canvas_area_excludes_sidebar_and_border() {
        let area = canvas_area(Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(SIDEBAR_WIDTH + 1, 1, 100 - SIDEBAR_WIDTH - 2, 28));
    }

    #[test]
    fn test_render_draws_grid_into_canvas() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let canvas = canvas_area(Rect::new(0, 0, 60, 20));
        let mut app = App::new(
            SandboxConfig {
                seed: Some(1),
                ..SandboxConfig::default()
            },
            canvas,
        );
        app.simulation.handle_event(crate::input::InputEvent::Select(
            crate::particle::ParticleKind::Rock,
        ));
        app.simulation.apply_brush(0, 0);

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let cell = &buffer[(canvas.x, canvas.y)];
        assert_eq!(cell.symbol(), "▀");
        // Top-left pixel is rock, never the empty-cell background
        assert_ne!(cell.fg, Color::from(Rgb::BACKGROUND));
        let empty = &buffer[(canvas.x + 10, canvas.y + 5)];
        assert_eq!(empty.fg, Color::from(Rgb::BACKGROUND));
    }
}
