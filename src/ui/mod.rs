//! UI rendering for the status dashboard.
//!
//! ```text
//! ╔══════════════════════════════════════════════════════╗
//! ║ BirdEdge Monitor  http://birdclient.local  12:00:05  ║
//! ║ ┌ Status ──────────────────────────────────────────┐ ║
//! ║ │ Hostname            birdclient-1a2b              │ ║
//! ║ │ ...                                              │ ║
//! ║ └──────────────────────────────────────────────────┘ ║
//! ║ ┌ WiFi ────────────────────────────────────────────┐ ║
//! ║ │ SSID              ▸ BirdEdge_                    │ ║
//! ║ │ Password            ••••••••                     │ ║
//! ║ └──────────────────────────────────────────────────┘ ║
//! ║ Tab next · Ctrl+S save WiFi · Ctrl+R restart · Esc   ║
//! ╚══════════════════════════════════════════════════════╝
//! ```

pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::display::Binding;
use theme::*;

/// Width of the caption column.
const CAPTION_WIDTH: usize = 20;

/// Field whose input is masked unless revealed.
const PASSWORD_FIELD: &str = "wifi_pass";

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, size);

    let inner = inner_rect(size, 1);
    let label_rows = app.labels().len() as u16;
    let input_rows = app.inputs().len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Header
            Constraint::Min(label_rows + 2),    // Status labels
            Constraint::Length(input_rows + 2), // WiFi form
            Constraint::Length(1),              // Footer
        ])
        .split(inner);

    render_header(frame, chunks[0], app);
    render_status_panel(frame, chunks[1], app);
    render_wifi_form(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);
}

/// Get inner rect with margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let updated = match app.last_update {
        Some(at) => format!("updated {}", at.format("%H:%M:%S")),
        None => "waiting for device".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            "BirdEdge Monitor",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.base_url.clone(), Style::default().fg(COLOR_CAPTION)),
        Span::raw("  "),
        Span::styled(updated, Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn caption(binding: &Binding) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", binding.title, width = CAPTION_WIDTH),
        Style::default().fg(COLOR_CAPTION),
    )
}

fn render_status_panel(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .labels()
        .into_iter()
        .map(|binding| {
            let value = binding.target.value();
            let style = if binding.field == "streaming" && value == "true" {
                Style::default().fg(COLOR_ACTIVE)
            } else {
                Style::default().fg(COLOR_ACCENT)
            };
            Line::from(vec![caption(binding), Span::raw("  "), Span::styled(value, style)])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel("Status")), area);
}

fn render_wifi_form(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .inputs()
        .into_iter()
        .enumerate()
        .map(|(i, binding)| {
            let focused = i == app.focus;
            let mut value = binding.target.value();
            if binding.field == PASSWORD_FIELD && !app.show_password {
                value = mask(&value);
            }
            if focused {
                value.push('_');
            }

            let (marker, style) = if focused {
                ("▸ ", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(COLOR_CAPTION))
            };
            Line::from(vec![caption(binding), Span::raw(marker), Span::styled(value, style)])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel("WiFi")), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.visible_notice() {
        Some(notice) => {
            let color = if notice.is_error { COLOR_ERROR } else { COLOR_ACTIVE };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None if app.busy => Line::from(Span::styled("Sending…", Style::default().fg(COLOR_DIM))),
        None => Line::from(Span::styled(
            "Tab next field · Ctrl+S save WiFi · Ctrl+R restart · Ctrl+P show password · Esc quit",
            Style::default().fg(COLOR_DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Replace every character with a bullet.
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}
