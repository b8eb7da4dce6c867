use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::UserBrowser;
use super::layout::{app_layout, list_rows, panel_layout};
use crate::formatting::utils::{extract_first_name, truncate};
use crate::models::NormalizedUser;

/// Rows the list panel can show for a terminal of `area` size.
pub fn list_viewport(area: Rect) -> Rect {
    let layout = app_layout(area);
    list_rows(panel_layout(layout.main).list)
}

pub fn draw(frame: &mut Frame, app: &UserBrowser) {
    let layout = app_layout(frame.size());
    let panels = panel_layout(layout.main);

    draw_header(frame, layout.header, app);
    draw_user_list(frame, panels.list, app);
    if panels.detail.width > 0 {
        draw_detail(frame, panels.detail, app);
    }
    draw_footer(frame, layout.footer, app);
}

fn bordered() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn draw_header(frame: &mut Frame, area: Rect, app: &UserBrowser) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(area);

    let header = Paragraph::new(" User Directory ")
        .style(Style::default().bg(Color::Black).fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(bordered());
    frame.render_widget(header, chunks[0]);

    let info = format!(" Loaded: {} / {} ", app.loaded(), app.total());
    let info_widget = Paragraph::new(info)
        .style(Style::default().bg(Color::Black).fg(Color::Yellow))
        .block(bordered());
    frame.render_widget(info_widget, chunks[1]);
}

fn user_line(user: &NormalizedUser, width: usize) -> Line<'static> {
    let name_width = width.saturating_sub(8).min(30);
    Line::from(vec![
        Span::styled(format!("{:>5} ", user.id), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<width$} ", truncate(&user.name, name_width), width = name_width),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            truncate(&user.email, width.saturating_sub(name_width + 7)),
            Style::default().fg(Color::Cyan),
        ),
    ])
}

fn sentinel_line(app: &UserBrowser) -> Line<'static> {
    if app.is_exhausted() {
        Line::from(Span::styled(
            "── end of list ──",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "⟳ loading more…",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
    }
}

fn draw_user_list(frame: &mut Frame, area: Rect, app: &UserBrowser) {
    let rows = list_rows(area);
    let width = usize::from(rows.width);
    let users = app.users();
    let visible = usize::from(rows.height);

    let items: Vec<ListItem> = (app.scroll_offset..=app.sentinel_index())
        .take(visible)
        .map(|index| {
            let line = match users.get(index) {
                Some(user) => user_line(user, width),
                None => sentinel_line(app),
            };
            let item = ListItem::new(line);
            if index == app.selected_index {
                item.style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(bordered().title(" Users "));
    frame.render_widget(list, area);
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &UserBrowser) {
    let (title, lines) = match app.selected_user() {
        Some(user) => (
            format!(" {} ", extract_first_name(&user.name)),
            vec![
                Line::from(Span::styled(user.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(vec![Span::styled("ID:      ", Style::default().fg(Color::DarkGray)), Span::raw(user.id.clone())]),
                Line::from(vec![Span::styled("Email:   ", Style::default().fg(Color::DarkGray)), Span::raw(user.email.clone())]),
                Line::from(vec![Span::styled("Picture: ", Style::default().fg(Color::DarkGray)), Span::raw(user.picture.clone())]),
            ],
        ),
        None => (
            " Detail ".to_string(),
            vec![Line::from(Span::styled(
                "Scroll here to load the next page",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
    };

    let detail = Paragraph::new(lines)
        .block(bordered().title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &UserBrowser) {
    let text = match &app.status_message {
        Some(message) => format!("{}  |  [q] Quit  [j/k] Nav  [G] Bottom  [m] More", message),
        None => "[q/Esc] Quit  [j/k] Nav  [PgUp/PgDn] Page  [g/G] Top/Bottom  [m] Load more".to_string(),
    };

    let footer = Paragraph::new(text)
        .style(Style::default().bg(Color::Black).fg(Color::Green))
        .block(bordered())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
