//! AutoPay setup modal.

use super::helpers::{centered_rect, format_amount};
use crate::bills::{AutoPaySettings, Bill, Frequency};
use crate::theme::ThemeColors;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(PartialEq, Eq, Clone, Copy)]
enum Field {
    Date,
    Frequency,
    MaxLimit,
}

impl Field {
    fn next(&self) -> Self {
        match self {
            Field::Date => Field::Frequency,
            Field::Frequency => Field::MaxLimit,
            Field::MaxLimit => Field::Date,
        }
    }

    fn previous(&self) -> Self {
        match self {
            Field::Date => Field::MaxLimit,
            Field::Frequency => Field::Date,
            Field::MaxLimit => Field::Frequency,
        }
    }
}

/// Outcome of a key press while the modal is open.
pub enum ModalAction {
    None,
    Cancelled,
    /// Enter with a valid date; carries the bill id and the settings.
    Saved(Box<str>, AutoPaySettings),
}

pub struct AutoPayModal {
    pub open: bool,
    bill_id: Box<str>,
    bill_name: String,
    bill_amount: f64,
    field: Field,
    date_input: String,
    frequency: Frequency,
    limit_input: String,
}

impl AutoPayModal {
    pub fn new() -> Self {
        Self {
            open: false,
            bill_id: "".into(),
            bill_name: String::new(),
            bill_amount: 0.0,
            field: Field::Date,
            date_input: String::new(),
            frequency: Frequency::Monthly,
            limit_input: String::new(),
        }
    }

    pub fn open_for(&mut self, bill: &Bill) {
        self.open = true;
        self.bill_id = bill.id.clone();
        self.bill_name = bill.service_name.clone();
        self.bill_amount = bill.amount;
        self.field = Field::Date;
        self.date_input.clear();
        self.frequency = Frequency::Monthly;
        self.limit_input.clear();
    }

    fn settings(&self) -> AutoPaySettings {
        AutoPaySettings {
            payment_date: self.date_input.clone(),
            frequency: self.frequency,
            max_limit: self.limit_input.parse().ok(),
        }
    }

    pub fn handle_key_event(&mut self, code: KeyCode) -> ModalAction {
        match code {
            KeyCode::Esc => {
                self.open = false;
                return ModalAction::Cancelled;
            }
            KeyCode::Enter => {
                // Date is the one required field
                if !self.date_input.trim().is_empty() {
                    self.open = false;
                    return ModalAction::Saved(self.bill_id.clone(), self.settings());
                }
            }
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.previous(),
            KeyCode::Left | KeyCode::Right => {
                if self.field == Field::Frequency {
                    self.frequency = self.frequency.next();
                }
            }
            KeyCode::Backspace => match self.field {
                Field::Date => {
                    self.date_input.pop();
                }
                Field::MaxLimit => {
                    self.limit_input.pop();
                }
                Field::Frequency => {}
            },
            KeyCode::Char(c) => match self.field {
                Field::Date if c.is_ascii_digit() || c == '-' || c == '/' => {
                    if self.date_input.len() < 10 {
                        self.date_input.push(c);
                    }
                }
                Field::MaxLimit if c.is_ascii_digit() || c == '.' => {
                    if self.limit_input.len() < 8 {
                        self.limit_input.push(c);
                    }
                }
                Field::Frequency if c == ' ' => self.frequency = self.frequency.next(),
                _ => {}
            },
            _ => {}
        }
        ModalAction::None
    }

    pub fn render(&self, frame: &mut Frame, colors: &ThemeColors) {
        if !self.open {
            return;
        }
        let area = centered_rect(46, 14, frame.area());
        frame.render_widget(Clear, area);

        let field_line = |label: &str, value: String, active: bool| -> Line<'static> {
            let marker = if active { "▸ " } else { "  " };
            let value_style = if active {
                Style::default()
                    .fg(colors.accent_violet)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_primary)
            };
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(colors.accent_violet)),
                Span::styled(format!("{:<14}", label), Style::default().fg(colors.text_muted)),
                Span::styled(value, value_style),
            ])
        };

        let date_display = if self.date_input.is_empty() {
            "(required)".to_string()
        } else {
            self.date_input.clone()
        };
        let limit_display = if self.limit_input.is_empty() {
            "none".to_string()
        } else {
            format!("${}", self.limit_input)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} · {}", self.bill_name, format_amount(self.bill_amount)),
                Style::default()
                    .fg(colors.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            field_line("Payment date", date_display, self.field == Field::Date),
            field_line(
                "Frequency",
                format!("◂ {} ▸", self.frequency.label()),
                self.field == Field::Frequency,
            ),
            field_line("Max limit", limit_display, self.field == Field::MaxLimit),
            Line::from(""),
        ];

        // Summary
        lines.push(Line::from(Span::styled(
            format!(
                "Pays {} {} starting {}",
                format_amount(self.bill_amount),
                self.frequency.label().to_lowercase(),
                if self.date_input.is_empty() {
                    "—"
                } else {
                    self.date_input.as_str()
                },
            ),
            Style::default().fg(colors.text_secondary),
        )));
        if let Ok(limit) = self.limit_input.parse::<f64>() {
            lines.push(Line::from(Span::styled(
                format!("Skips any charge above {}", format_amount(limit)),
                Style::default().fg(colors.text_secondary),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_focus))
            .title(
                Line::from(Span::styled(
                    " SET UP AUTOPAY ",
                    Style::default()
                        .fg(colors.accent_violet)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title_bottom(
                Line::from(Span::styled(
                    " Tab: field │ ◂▸: frequency │ Enter: save │ Esc: cancel ",
                    Style::default().fg(colors.text_muted),
                ))
                .alignment(Alignment::Center),
            );

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(colors.bg_card)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::{BillBook, BillStatus};

    fn modal_for_first_bill() -> AutoPayModal {
        let book = BillBook::mock();
        let mut modal = AutoPayModal::new();
        modal.open_for(&book.bills()[0]);
        modal
    }

    #[test]
    fn test_enter_without_date_does_not_save() {
        let mut modal = modal_for_first_bill();
        assert!(matches!(
            modal.handle_key_event(KeyCode::Enter),
            ModalAction::None
        ));
        assert!(modal.open);
    }

    #[test]
    fn test_enter_with_date_saves_settings() {
        let mut modal = modal_for_first_bill();
        for c in "2024-02-01".chars() {
            modal.handle_key_event(KeyCode::Char(c));
        }
        // frequency field: cycle once to Quarterly
        modal.handle_key_event(KeyCode::Tab);
        modal.handle_key_event(KeyCode::Right);
        // max limit
        modal.handle_key_event(KeyCode::Tab);
        for c in "50".chars() {
            modal.handle_key_event(KeyCode::Char(c));
        }

        match modal.handle_key_event(KeyCode::Enter) {
            ModalAction::Saved(id, settings) => {
                assert_eq!(&*id, "1");
                assert_eq!(settings.payment_date, "2024-02-01");
                assert_eq!(settings.frequency, Frequency::Quarterly);
                assert_eq!(settings.max_limit, Some(50.0));
            }
            _ => panic!("expected save"),
        }
        assert!(!modal.open);
    }

    #[test]
    fn test_esc_cancels_without_touching_bill() {
        let book = BillBook::mock();
        let mut modal = AutoPayModal::new();
        modal.open_for(&book.bills()[0]);
        assert!(matches!(
            modal.handle_key_event(KeyCode::Esc),
            ModalAction::Cancelled
        ));
        assert!(!modal.open);
        assert_eq!(book.bills()[0].status, BillStatus::Pending);
    }

    #[test]
    fn test_rejected_characters_ignored() {
        let mut modal = modal_for_first_bill();
        modal.handle_key_event(KeyCode::Char('x'));
        modal.handle_key_event(KeyCode::Char('5'));
        match modal.handle_key_event(KeyCode::Enter) {
            ModalAction::Saved(_, settings) => assert_eq!(settings.payment_date, "5"),
            _ => panic!("expected save"),
        }
    }
}
