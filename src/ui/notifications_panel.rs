//! Notifications screen: kind filter sidebar plus the full list.

use super::helpers::{relative_time, truncate_to_width};
use crate::bills::KindFilter;
use crate::theme::ThemeColors;
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph},
    Frame,
};

impl super::App {
    pub fn render_notifications(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(30)])
            .split(area);

        self.render_filter_sidebar(frame, chunks[0], &colors);
        self.render_notification_list(frame, chunks[1], &colors);
    }

    fn render_filter_sidebar(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let lines: Vec<Line> = KindFilter::ORDER
            .iter()
            .map(|filter| {
                let selected = *filter == self.notify_filter;
                let marker = if selected { "▸ " } else { "  " };
                let style = if selected {
                    Style::default()
                        .fg(colors.accent_violet)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.text_secondary)
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(colors.accent_violet)),
                    Span::styled(
                        format!("{:<9}", filter.label()),
                        style,
                    ),
                    Span::styled(
                        format!("{:>3}", self.feed.count(*filter)),
                        Style::default().fg(colors.text_muted),
                    ),
                ])
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_default))
                    .title(
                        Line::from(Span::styled(
                            " FILTER ",
                            Style::default().fg(colors.border_default),
                        ))
                        .alignment(Alignment::Center),
                    )
                    .title_bottom(
                        Line::from(Span::styled(
                            " f: cycle ",
                            Style::default().fg(colors.text_muted),
                        ))
                        .alignment(Alignment::Center),
                    ),
            ),
            area,
        );
    }

    fn render_notification_list(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let now = Utc::now();
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .feed
            .filtered(self.notify_filter)
            .iter()
            .map(|n| {
                let title_style = if n.read {
                    Style::default().fg(colors.text_muted)
                } else {
                    Style::default()
                        .fg(colors.text_primary)
                        .add_modifier(Modifier::BOLD)
                };
                let unread_dot = if n.read { "  " } else { "● " };
                let msg_width = inner_width.saturating_sub(4).max(8);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(unread_dot, Style::default().fg(colors.accent_violet)),
                        Span::styled(
                            format!("{} ", n.kind.icon()),
                            Style::default().fg(super::notification_color(n.kind, colors)),
                        ),
                        Span::styled(n.title.clone(), title_style),
                        Span::styled(
                            format!("  {}", relative_time(n.timestamp, now)),
                            Style::default().fg(colors.text_muted),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", truncate_to_width(&n.message, msg_width)),
                        Style::default().fg(colors.text_secondary),
                    )),
                    Line::from(""),
                ])
            })
            .collect();

        let title = format!(
            " NOTIFICATIONS · {} ({} unread) ",
            self.notify_filter.label(),
            self.feed.unread_count()
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_focus))
                    .title(
                        Line::from(Span::styled(
                            title,
                            Style::default()
                                .fg(colors.border_focus)
                                .add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Center),
                    )
                    .title_bottom(
                        Line::from(Span::styled(
                            " ↑↓: select │ m: mark read │ M: mark all ",
                            Style::default().fg(colors.text_muted),
                        ))
                        .alignment(Alignment::Center),
                    ),
            )
            .highlight_style(Style::default().bg(colors.bg_highlight))
            .highlight_symbol("▌ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.notify_list_state);
    }
}
