//! Dashboard screen: stat cards, pay-all, filter bar, bill list,
//! notifications side panel.

use super::helpers::{format_amount, format_due_date, stat_card, truncate_to_width, BillView};
use crate::bills::{Bill, BillStatus, StatusFilter};
use crate::theme::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph},
    Frame,
};

impl super::App {
    pub fn render_dashboard(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // stat cards
                Constraint::Length(3), // pay-all + filters
                Constraint::Min(8),    // bills + side panel
            ])
            .split(area);

        self.render_dashboard_stats(frame, chunks[0], &colors);
        self.render_actions_row(frame, chunks[1], &colors);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(chunks[2]);

        match self.bill_view {
            BillView::Cards => self.render_bill_cards(frame, body[0], &colors),
            BillView::Table => self.render_bill_table(frame, body[0], &colors),
        }
        self.render_side_panel(frame, body[1], &colors);
    }

    fn render_dashboard_stats(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
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
                "due now",
                format_amount(self.bills.pending_total()),
                colors.warning,
                colors,
            ),
            cards[0],
        );
        frame.render_widget(
            stat_card(
                "pending bills",
                counts.pending.to_string(),
                colors.error,
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
                "monthly total",
                format_amount(self.bills.monthly_total()),
                colors.accent_violet,
                colors,
            ),
            cards[3],
        );
    }

    /// Pay-all affordance plus the status filter bar.
    fn render_actions_row(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(area);

        let counts = self.bills.counts();
        let (label, style) = if self.paying_all {
            (
                "Processing...".to_string(),
                Style::default().fg(colors.text_muted),
            )
        } else if counts.pending == 0 {
            (
                "✓ All Bills Paid".to_string(),
                Style::default().fg(colors.success),
            )
        } else {
            (
                format!(
                    "[P]ay all {} · {}",
                    counts.pending,
                    format_amount(self.bills.pending_total())
                ),
                Style::default()
                    .fg(colors.accent_violet)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, style)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(colors.border_default)),
                ),
            chunks[0],
        );

        let mut spans = Vec::with_capacity(StatusFilter::ORDER.len() * 2);
        for filter in StatusFilter::ORDER {
            let selected = filter == self.filter;
            let style = if selected {
                Style::default()
                    .fg(colors.bg_primary)
                    .bg(colors.accent_violet)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_secondary)
            };
            spans.push(Span::styled(
                format!(" {} ({}) ", filter.label(), counts.for_filter(filter)),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_muted))
                    .title(Span::styled(
                        " [f]ilter │ [v]iew ",
                        Style::default().fg(colors.text_muted),
                    )),
            ),
            chunks[1],
        );
    }

    fn render_bill_cards(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .bills
            .filtered(self.filter)
            .iter()
            .map(|bill| {
                let name_width = inner_width.saturating_sub(24).max(8);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(format!("{} ", bill.icon)),
                        Span::styled(
                            format!(
                                "{:<width$}",
                                truncate_to_width(&bill.service_name, name_width),
                                width = name_width
                            ),
                            Style::default()
                                .fg(colors.text_primary)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("{:>9}", format_amount(bill.amount)),
                            Style::default().fg(colors.accent_yellow),
                        ),
                        Span::raw("  "),
                        status_badge(bill.status, colors),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format!("   due {}", format_due_date(bill.due_date)),
                            Style::default().fg(colors.text_muted),
                        ),
                        Span::styled(
                            format!("  {}", bill.category),
                            Style::default().fg(colors.text_muted),
                        ),
                    ]),
                    Line::from(""),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(self.bills_block(colors))
            .highlight_style(Style::default().bg(colors.bg_highlight))
            .highlight_symbol("▌ ")
            .highlight_spacing(HighlightSpacing::Always);
        frame.render_stateful_widget(list, area, &mut self.bill_list_state);
    }

    fn render_bill_table(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let inner_width = area.width.saturating_sub(4) as usize;
        let name_width = inner_width.saturating_sub(36).max(8);
        let items: Vec<ListItem> = self
            .bills
            .filtered(self.filter)
            .iter()
            .map(|bill| ListItem::new(bill_row(bill, name_width, colors)))
            .collect();

        let list = List::new(items)
            .block(self.bills_block(colors))
            .highlight_style(Style::default().bg(colors.bg_highlight))
            .highlight_symbol("▌ ")
            .highlight_spacing(HighlightSpacing::Always);
        frame.render_stateful_widget(list, area, &mut self.bill_list_state);
    }

    fn bills_block(&self, colors: &ThemeColors) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_focus))
            .title(
                Line::from(Span::styled(
                    format!(" BILLS · {} ", self.filter.label()),
                    Style::default()
                        .fg(colors.border_focus)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title_bottom(
                Line::from(Span::styled(
                    " ↑↓: select │ p: pay │ a: autopay ",
                    Style::default().fg(colors.text_muted),
                ))
                .alignment(Alignment::Center),
            )
    }

    /// Recent notifications plus the quick-actions stub.
    fn render_side_panel(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(6)])
            .split(area);

        let inner_width = chunks[0].width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .feed
            .items()
            .iter()
            .take(chunks[0].height.saturating_sub(2) as usize)
            .map(|n| {
                let style = if n.read {
                    Style::default().fg(colors.text_muted)
                } else {
                    Style::default().fg(colors.text_primary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", n.kind.icon()),
                        Style::default().fg(super::notification_color(n.kind, colors)),
                    ),
                    Span::styled(
                        truncate_to_width(&n.title, inner_width.saturating_sub(2)).into_owned(),
                        style,
                    ),
                ]))
            })
            .collect();

        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_default))
                    .title(
                        Line::from(Span::styled(
                            format!(" ALERTS ({} unread) ", self.feed.unread_count()),
                            Style::default().fg(colors.border_default),
                        ))
                        .alignment(Alignment::Center),
                    ),
            ),
            chunks[0],
        );

        let actions = Paragraph::new(vec![
            Line::from(Span::styled(
                "＋ Add bill",
                Style::default().fg(colors.text_muted),
            )),
            Line::from(Span::styled(
                "⤓ Export history",
                Style::default().fg(colors.text_muted),
            )),
            Line::from(Span::styled(
                "⚙ Payment methods",
                Style::default().fg(colors.text_muted),
            )),
            Line::from(Span::styled(
                "(coming soon)",
                Style::default().fg(colors.border_muted),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border_muted))
                .title(
                    Line::from(Span::styled(
                        " QUICK ACTIONS ",
                        Style::default().fg(colors.border_muted),
                    ))
                    .alignment(Alignment::Center),
                ),
        );
        frame.render_widget(actions, chunks[1]);
    }
}

fn status_badge(status: BillStatus, colors: &ThemeColors) -> Span<'static> {
    let color = match status {
        BillStatus::Pending => colors.warning,
        BillStatus::Paid => colors.success,
        BillStatus::Autopay => colors.accent_blue,
    };
    Span::styled(
        format!("{:<7}", status.label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Single table row: icon, name, due date, amount, status.
fn bill_row(bill: &Bill, name_width: usize, colors: &ThemeColors) -> Line<'static> {
    let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(80, 78, 108)));
    Line::from(vec![
        Span::raw(format!("{} ", bill.icon)),
        Span::styled(
            format!(
                "{:<width$}",
                truncate_to_width(&bill.service_name, name_width),
                width = name_width
            ),
            Style::default().fg(colors.text_primary),
        ),
        sep.clone(),
        Span::styled(
            format_due_date(bill.due_date),
            Style::default().fg(colors.text_secondary),
        ),
        sep.clone(),
        Span::styled(
            format!("{:>9}", format_amount(bill.amount)),
            Style::default().fg(colors.accent_yellow),
        ),
        sep,
        status_badge(bill.status, colors),
    ])
}
