use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::chat::{Message, Origin};
use crate::tui::app::App;

const BRAND: Color = Color::Rgb(37, 99, 235);
const MUTED: Color = Color::Rgb(150, 150, 150);

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Transcript
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status bar
            ]
            .as_ref() as &[Constraint],
        )
        .split(frame.area());

    render_header(frame, chunks[0], app);

    if app.panel_open {
        render_chat(frame, chunks[1], app);
        render_input(frame, chunks[2], app);
    } else {
        render_closed_panel(frame, chunks[1]);
    }

    render_status_bar(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled("🤖 ", Style::default().fg(BRAND)),
        Span::styled(
            "AI Assistant",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Ask me about {}", app.assistant_name),
            Style::default().fg(Color::Gray),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Lines for one transcript entry
fn message_lines(message: &Message, show_timestamps: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let (tag, color) = match message.origin {
        Origin::User => ("You", BRAND),
        Origin::Assistant => ("Assistant", Color::Green),
    };
    let mut role_line = vec![Span::styled(
        format!("[{}] ", tag),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if message.is_welcome {
        role_line.push(Span::styled(
            " New ",
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if show_timestamps {
        role_line.push(Span::styled(
            format!(" {}", message.created_at.format("%H:%M")),
            Style::default().fg(MUTED),
        ));
    }
    lines.push(Line::from(role_line));

    let text_style = if message.is_welcome {
        Style::default().add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };
    for line in message.text.lines() {
        lines.push(Line::from(Span::styled(line.to_string(), text_style)));
    }

    lines.push(Line::from(""));
    lines
}

fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = app
        .session
        .transcript()
        .messages()
        .iter()
        .flat_map(|m| message_lines(m, app.show_timestamps))
        .collect();

    if app.session.is_awaiting() {
        lines.push(Line::from(vec![
            Span::styled(
                "[Assistant] ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "● ● ●",
                Style::default().fg(MUTED).add_modifier(Modifier::SLOW_BLINK),
            ),
        ]));
    }

    // Stick to the bottom unless the user scrolled up
    let viewport = area.height.saturating_sub(2);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll = total
        .saturating_sub(viewport)
        .saturating_sub(app.scroll_offset);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Chat ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BRAND)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_closed_panel(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new("Chat hidden. Press Tab to open it again.")
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(hint, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let awaiting = app.session.is_awaiting();
    let (text, style, title) = if awaiting {
        (
            String::new(),
            Style::default().fg(Color::DarkGray),
            " Waiting for the assistant... ",
        )
    } else {
        let title = if app.session.can_submit() {
            " Message (Enter to send) "
        } else {
            " Message "
        };
        if app.session.input().is_empty() {
            (
                "Ask me anything...".to_string(),
                Style::default().fg(Color::DarkGray),
                title,
            )
        } else {
            (
                app.session.input().to_string(),
                Style::default().fg(Color::White),
                title,
            )
        }
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if awaiting { Color::DarkGray } else { BRAND }))
            .title(title),
    );
    frame.render_widget(input, area);

    if !awaiting {
        let cursor_x = cursor_column(area, app.session.input());
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Column of the input cursor, clamped inside the box borders
fn cursor_column(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let last = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(typed).min(last)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (mode, mode_color) = if app.session.is_awaiting() {
        ("AWAITING", Color::Yellow)
    } else {
        ("IDLE", Color::Green)
    };

    let status_text = app.status_message.clone().unwrap_or_else(|| "Ready".to_string());

    let spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .bg(mode_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(status_text),
        Span::raw(" | "),
        Span::styled("Tab: show/hide chat", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled("Esc/Ctrl+C: quit", Style::default().fg(Color::DarkGray)),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)])
        .style(Style::default().bg(Color::Black))
        .block(Block::default());

    frame.render_widget(status_bar, area);
}
