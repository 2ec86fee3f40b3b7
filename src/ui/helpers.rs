//! Helper functions and shared types for UI rendering

use crate::theme::ThemeColors;
use chrono::{DateTime, NaiveDate, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::borrow::Cow;
use std::time::{Duration, Instant};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Toasts expire after 4 seconds.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    Home,
    Dashboard,
    Notifications,
    Roadmap,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::Notifications => "Notifications",
            Screen::Roadmap => "Roadmap",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Screen::Home => Screen::Dashboard,
            Screen::Dashboard => Screen::Notifications,
            Screen::Notifications => Screen::Roadmap,
            Screen::Roadmap => Screen::Home,
        }
    }
}

/// Dashboard bill layout toggle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BillView {
    Cards,
    Table,
}

impl BillView {
    pub fn toggle(&self) -> Self {
        match self {
            BillView::Cards => BillView::Table,
            BillView::Table => BillView::Cards,
        }
    }
}

#[derive(Clone, Copy)]
pub enum ToastKind {
    Success,
    Info,
}

/// Transient confirmation shown bottom-right, pruned after TOAST_TTL.
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub created: Instant,
}

impl Toast {
    pub fn new(text: String, kind: ToastKind) -> Self {
        Self {
            text,
            kind,
            created: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= TOAST_TTL
    }

    /// Cell width of the rendered toast box, padding included. Display
    /// width, not byte length, since toast texts carry multi-byte glyphs.
    pub fn display_width(&self) -> u16 {
        (self.text.width() + 4).min(u16::MAX as usize) as u16
    }
}

/// Helper: stat card with label and bold value
pub fn stat_card(
    label: &str,
    value: String,
    color: Color,
    colors: &ThemeColors,
) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(colors.text_muted),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_muted)),
    )
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Relative-day timestamp for notification rows.
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    if delta.num_days() >= 1 {
        format!("{}d ago", delta.num_days())
    } else if delta.num_hours() >= 1 {
        format!("{}h ago", delta.num_hours())
    } else if delta.num_minutes() >= 1 {
        format!("{}m ago", delta.num_minutes())
    } else {
        "just now".into()
    }
}

/// Truncate to a display width (not char count) and add an ellipsis if cut.
/// Returns Cow to avoid allocation when no truncation needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.width() <= max_width {
        return Cow::Borrowed(s);
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

/// Centered popup rect for modals.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_screen_cycle_wraps() {
        let mut s = Screen::Home;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, Screen::Home);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        // wide chars count double
        assert_eq!(truncate_to_width("日本語テスト", 5), "日本…");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 14, 12, 0, 0).unwrap();
        let two_days = Utc.with_ymd_and_hms(2024, 1, 12, 10, 0, 0).unwrap();
        let two_hours = Utc.with_ymd_and_hms(2024, 1, 14, 10, 0, 0).unwrap();
        assert_eq!(relative_time(two_days, now), "2d ago");
        assert_eq!(relative_time(two_hours, now), "2h ago");
        assert_eq!(relative_time(now, now), "just now");
    }

    #[test]
    fn test_toast_width_counts_cells_not_bytes() {
        // "·" is 2 bytes but 1 cell wide
        let toast = Toast::new("3 bills paid · $186.79".into(), ToastKind::Success);
        assert_eq!(toast.display_width(), 22 + 4);
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(50, 20, area);
        assert_eq!(r, Rect::new(25, 10, 50, 20));
        // clamped to the area when too big
        let r = centered_rect(200, 80, area);
        assert_eq!(r, Rect::new(0, 0, 100, 40));
    }

    #[test]
    fn test_format_due_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_due_date(d), "Jan 15, 2024");
    }
}
