//! Roadmap screen: five journey steps on a central progress line, revealed
//! as they scroll into view.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Rows per step in the rendered column.
pub const STEP_HEIGHT: u16 = 4;

pub const STEPS: [(&str, &str, StepStatus); 5] = [
    (
        "Connect your accounts",
        "Link billers and payment methods in minutes",
        StepStatus::Completed,
    ),
    (
        "See every bill in one place",
        "A single dashboard for due dates and amounts",
        StepStatus::Completed,
    ),
    (
        "Pay with one tap",
        "Settle individual bills or everything at once",
        StepStatus::Current,
    ),
    (
        "Put it on autopilot",
        "AutoPay schedules with frequency and limits",
        StepStatus::Upcoming,
    ),
    (
        "Get rewarded",
        "Earn points on every on-time payment",
        StepStatus::Upcoming,
    ),
];

/// How many steps have scrolled into view. A step counts as soon as its
/// first row enters the viewport.
pub fn steps_in_view(scroll: u16, viewport_rows: u16) -> usize {
    if viewport_rows == 0 {
        return 0;
    }
    let last_visible_row = scroll as usize + viewport_rows as usize;
    STEPS
        .iter()
        .enumerate()
        .filter(|(i, _)| i * (STEP_HEIGHT as usize) < last_visible_row)
        .count()
}

impl super::App {
    pub fn render_roadmap(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let viewport_rows = area.height.saturating_sub(2);

        // Reveal is sticky: once seen, a step stays revealed
        self.revealed_steps = self
            .revealed_steps
            .max(steps_in_view(self.roadmap_scroll, viewport_rows));

        let total_rows = STEPS.len() as u16 * STEP_HEIGHT;
        self.roadmap_max_scroll = total_rows.saturating_sub(viewport_rows);

        let mut lines: Vec<Line> = Vec::with_capacity(total_rows as usize);
        for (i, (title, blurb, status)) in STEPS.iter().enumerate() {
            let revealed = i < self.revealed_steps;
            let (marker, marker_color) = match status {
                StepStatus::Completed => ("✓", colors.success),
                StepStatus::Current => ("●", colors.accent_violet),
                StepStatus::Upcoming => ("○", colors.text_muted),
            };

            if revealed {
                let title_style = match status {
                    StepStatus::Current => Style::default()
                        .fg(colors.accent_violet)
                        .add_modifier(Modifier::BOLD),
                    StepStatus::Completed => Style::default()
                        .fg(colors.text_primary)
                        .add_modifier(Modifier::BOLD),
                    StepStatus::Upcoming => Style::default().fg(colors.text_secondary),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("   {} ", marker), Style::default().fg(marker_color)),
                    Span::styled(format!("Step {} · ", i + 1), Style::default().fg(colors.text_muted)),
                    Span::styled(title.to_string(), title_style),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("   │   {}", blurb),
                    Style::default().fg(colors.text_muted),
                )));
            } else {
                // Not scrolled into view yet
                lines.push(Line::from(Span::styled(
                    format!("   {} ", marker),
                    Style::default().fg(colors.border_muted),
                )));
                lines.push(Line::from(Span::styled(
                    "   │",
                    Style::default().fg(colors.border_muted),
                )));
            }
            lines.push(Line::from(Span::styled(
                "   │",
                Style::default().fg(colors.border_muted),
            )));
            lines.push(Line::from(""));
        }

        // Walker advances down the line once the journey is underway
        if self.revealed_steps > 2 {
            let walker_row = (self.revealed_steps - 1) * STEP_HEIGHT as usize + 2;
            if let Some(line) = lines.get_mut(walker_row) {
                *line = Line::from(vec![
                    Span::styled("   │ ", Style::default().fg(colors.border_muted)),
                    Span::styled("🚶", Style::default().fg(colors.accent_cyan)),
                ]);
            }
        }

        let para = Paragraph::new(lines)
            .scroll((self.roadmap_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.border_focus))
                    .title(
                        Line::from(Span::styled(
                            " YOUR JOURNEY ",
                            Style::default()
                                .fg(colors.border_focus)
                                .add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Center),
                    )
                    .title_bottom(
                        Line::from(Span::styled(
                            " ↑↓: scroll ",
                            Style::default().fg(colors.text_muted),
                        ))
                        .alignment(Alignment::Center),
                    ),
            );
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_reveal_with_scroll() {
        // tiny viewport: only the first two steps' top rows fit
        assert_eq!(steps_in_view(0, 5), 2);
        // scrolling brings more into view
        assert_eq!(steps_in_view(4, 5), 3);
        // far enough down, everything has been seen
        assert_eq!(steps_in_view(16, 5), 5);
    }

    #[test]
    fn test_tall_viewport_reveals_all() {
        assert_eq!(steps_in_view(0, 40), 5);
    }

    #[test]
    fn test_zero_viewport_reveals_nothing() {
        assert_eq!(steps_in_view(0, 0), 0);
    }
}
