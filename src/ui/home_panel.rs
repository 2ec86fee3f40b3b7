//! Home screen: hero copy, stat cards, the animated globe, features grid.

use super::helpers::{format_amount, stat_card, truncate_to_width};
use crate::surface::paint_frame;
use crate::theme::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Constant shown on the "saved this month" card; the demo has no real
/// savings calculation behind it.
pub const SAVED_THIS_MONTH: f64 = 127.40;

/// Feature showcase: (icon, title, blurb, badge)
const FEATURES: [(&str, &str, &str, Option<&str>); 9] = [
    (
        "⚡",
        "Instant Payments",
        "Settle any bill in one tap",
        None,
    ),
    (
        "🔄",
        "Smart AutoPay",
        "Set it once, never miss a due date",
        Some("POPULAR"),
    ),
    (
        "🔔",
        "Due-Date Alerts",
        "Reminders before bills come due",
        None,
    ),
    (
        "📊",
        "Spending Insights",
        "See where every dollar goes",
        None,
    ),
    (
        "🔐",
        "Bank-Grade Security",
        "Encrypted end to end",
        None,
    ),
    (
        "💳",
        "All Billers, One App",
        "Utilities, streaming, rent and more",
        None,
    ),
    (
        "🌐",
        "Wallet Connect",
        "Pay straight from your crypto wallet",
        Some("NEW"),
    ),
    (
        "🏆",
        "Rewards",
        "Earn points on every payment",
        Some("SOON"),
    ),
    (
        "👥",
        "Shared Bills",
        "Split rent and utilities with roommates",
        Some("SOON"),
    ),
];

impl super::App {
    pub fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),              // hero
                Constraint::Length(5),              // stat cards
                Constraint::Min(10),                // globe
                Constraint::Length(FEATURE_ROWS_H), // features grid
            ])
            .split(area);

        self.render_hero(frame, chunks[0], &colors);
        self.render_stat_cards(frame, chunks[1], &colors);
        self.render_globe(frame, chunks[2], &colors);
        render_features(frame, chunks[3], &colors);
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let hero = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Every bill. ",
                    Style::default()
                        .fg(colors.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "One pulse.",
                    Style::default()
                        .fg(colors.accent_violet)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "Pay, schedule and track all your bills from one place.",
                Style::default().fg(colors.text_secondary),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(hero, area);
    }

    fn render_stat_cards(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let counts = self.bills.counts();
        frame.render_widget(
            stat_card(
                "total this month",
                format_amount(self.bills.monthly_total()),
                colors.accent_violet,
                colors,
            ),
            cards[0],
        );
        frame.render_widget(
            stat_card(
                "pending bills",
                counts.pending.to_string(),
                colors.warning,
                colors,
            ),
            cards[1],
        );
        frame.render_widget(
            stat_card(
                "on autopay",
                format_amount(self.bills.autopay_total()),
                colors.accent_blue,
                colors,
            ),
            cards[2],
        );
        frame.render_widget(
            stat_card(
                "saved this month",
                format_amount(SAVED_THIS_MONTH),
                colors.success,
                colors,
            ),
            cards[3],
        );
    }

    /// Paint one animation frame and blit it centred into the panel.
    fn render_globe(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let surface = paint_frame(&mut self.globe, super::BG_PIXEL);
        let mut lines = surface.to_lines();

        // Crop vertically when the panel is shorter than the surface
        let panel_rows = area.height as usize;
        if lines.len() > panel_rows {
            let skip = (lines.len() - panel_rows) / 2;
            lines = lines.into_iter().skip(skip).take(panel_rows).collect();
        }

        let para = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg_primary));
        frame.render_widget(para, area);
    }
}

const FEATURE_COLS: u16 = 3;
const FEATURE_ROWS: u16 = 3;
const FEATURE_ROWS_H: u16 = FEATURE_ROWS * 4;

fn render_features(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4); FEATURE_ROWS as usize])
        .split(area);

    for (row_idx, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(33); FEATURE_COLS as usize])
            .split(*row);

        for (col_idx, cell) in cols.iter().enumerate() {
            let idx = row_idx * FEATURE_COLS as usize + col_idx;
            let (icon, title, blurb, badge) = FEATURES[idx];
            let accent = colors.feature_color(idx);
            let inner_width = cell.width.saturating_sub(4) as usize;

            let mut title_spans = vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(
                    title.to_string(),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(badge) = badge {
                title_spans.push(Span::styled(
                    format!(" {}", badge),
                    Style::default()
                        .fg(colors.bg_primary)
                        .bg(accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }

            let card = Paragraph::new(vec![
                Line::from(title_spans),
                Line::from(Span::styled(
                    truncate_to_width(blurb, inner_width).into_owned(),
                    Style::default().fg(colors.text_muted),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_muted)),
            );
            frame.render_widget(card, *cell);
        }
    }
}
