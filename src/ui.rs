//! App state machine and event loop.

use crate::bills::{BillBook, BillStatus, KindFilter, NotificationFeed, NotificationKind, StatusFilter};
use crate::globe::Globe;
use crate::theme::{Rgb, Theme, ThemeColors};
use crate::timers::{TimerEvent, TimerHub, PAY_ALL_DELAY, WALLET_DELAY};
use crate::wallet::{Wallet, WalletState, DEMO_ADDRESS};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, ListState, Paragraph},
    Frame,
};
use std::io;
use std::sync::mpsc;
use std::time::Instant;

mod bills_panel;
mod helpers;
mod home_panel;
mod modal;
mod notifications_panel;
mod roadmap_panel;

use helpers::{format_amount, BillView, Screen, Toast, ToastKind};
use modal::{AutoPayModal, ModalAction};

/// Surface background, kept equal to the theme's bg_primary.
pub(crate) const BG_PIXEL: Rgb = [16, 16, 28];

pub(crate) fn notification_color(kind: NotificationKind, colors: &ThemeColors) -> Color {
    match kind {
        NotificationKind::Upcoming => colors.info,
        NotificationKind::Overdue => colors.error,
        NotificationKind::Success => colors.success,
        NotificationKind::Warning => colors.warning,
    }
}

pub struct App {
    theme: Theme,
    screen: Screen,
    globe: Globe,
    bills: BillBook,
    feed: NotificationFeed,
    wallet: Wallet,
    timers: TimerHub,
    wake_rx: mpsc::Receiver<()>,

    // Dashboard state
    filter: StatusFilter,
    bill_view: BillView,
    bill_list_state: ListState,
    paying_all: bool,
    modal: AutoPayModal,

    // Notifications state
    notify_filter: KindFilter,
    notify_list_state: ListState,

    // Roadmap state
    roadmap_scroll: u16,
    roadmap_max_scroll: u16,
    revealed_steps: usize,

    toasts: Vec<Toast>,
    terminal_size: Rect,
    should_redraw: bool,
    exit: bool,
}

impl App {
    pub fn new() -> Self {
        let (wake_tx, wake_rx) = mpsc::channel();
        let timers = TimerHub::new(wake_tx);

        let bills = BillBook::mock();
        let feed = NotificationFeed::mock();
        log::info!("loaded {} bills, {} notifications", bills.len(), feed.len());

        let mut bill_list_state = ListState::default();
        if !bills.is_empty() {
            bill_list_state.select(Some(0));
        }
        let mut notify_list_state = ListState::default();
        if !feed.is_empty() {
            notify_list_state.select(Some(0));
        }

        Self {
            theme: Theme,
            screen: Screen::Home,
            // Real side comes from the first resize in run()
            globe: Globe::new(80.0),
            bills,
            feed,
            wallet: Wallet::new(),
            timers,
            wake_rx,
            filter: StatusFilter::All,
            bill_view: BillView::Cards,
            bill_list_state,
            paying_all: false,
            modal: AutoPayModal::new(),
            notify_filter: KindFilter::All,
            notify_list_state,
            roadmap_scroll: 0,
            roadmap_max_scroll: 0,
            revealed_steps: 0,
            toasts: Vec::new(),
            terminal_size: Rect::default(),
            should_redraw: true,
            exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> io::Result<()> {
        let size = terminal.size()?;
        self.terminal_size = Rect::new(0, 0, size.width, size.height);
        self.globe.resize(size.width as f64);
        self.should_redraw = true;

        while !self.exit {
            // ~60 Hz while the globe is on screen, relaxed otherwise.
            // Timer threads wake us through the channel.
            let poll_ms = if self.screen == Screen::Home { 16 } else { 30 };
            if event::poll(std::time::Duration::from_millis(poll_ms))? {
                while event::poll(std::time::Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) => {
                            if key.kind == KeyEventKind::Press {
                                self.handle_key_event(key.code, key.modifiers);
                                self.should_redraw = true;
                                if self.exit {
                                    return Ok(());
                                }
                            }
                        }
                        Event::Resize(w, h) => {
                            self.terminal_size = Rect::new(0, 0, w, h);
                            self.globe.resize(w as f64);
                            log::debug!("resized to {}x{}", w, h);
                            self.should_redraw = true;
                        }
                        _ => {}
                    }
                }
            }

            // Drain wake signals from timer threads (non-blocking)
            while self.wake_rx.try_recv().is_ok() {}

            for ev in self.timers.drain() {
                self.apply_timer_event(ev);
                self.should_redraw = true;
            }

            let now = Instant::now();
            let live_toasts = self.toasts.len();
            self.toasts.retain(|t| !t.expired(now));
            if self.toasts.len() != live_toasts {
                self.should_redraw = true;
            }

            // The globe animates every frame while Home is visible
            if self.screen == Screen::Home {
                self.should_redraw = true;
            }

            if self.should_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.should_redraw = false;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.exit = true;
            return;
        }

        if self.modal.open {
            if let ModalAction::Saved(id, settings) = self.modal.handle_key_event(code) {
                if self.bills.enable_autopay(&id) {
                    log::info!("autopay enabled for bill {}", id);
                    self.toast(
                        format!("AutoPay on · {} from {}", settings.frequency.label(), settings.payment_date),
                        ToastKind::Success,
                    );
                }
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('1') => self.screen = Screen::Home,
            KeyCode::Char('2') => self.screen = Screen::Dashboard,
            KeyCode::Char('3') => self.screen = Screen::Notifications,
            KeyCode::Char('4') => self.screen = Screen::Roadmap,
            KeyCode::Tab => self.screen = self.screen.next(),
            KeyCode::Char('w') => self.toggle_wallet(),
            _ => match self.screen {
                Screen::Home => {}
                Screen::Dashboard => self.handle_dashboard_key(code),
                Screen::Notifications => self.handle_notifications_key(code),
                Screen::Roadmap => self.handle_roadmap_key(code),
            },
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.select_bill(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_bill(-1),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.reset_bill_selection();
            }
            KeyCode::Char('v') => self.bill_view = self.bill_view.toggle(),
            KeyCode::Char('p') => self.pay_selected(),
            KeyCode::Char('a') => self.open_autopay_modal(),
            KeyCode::Char('P') => self.start_pay_all(),
            _ => {}
        }
    }

    fn handle_notifications_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.select_notification(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_notification(-1),
            KeyCode::Char('f') => {
                self.notify_filter = self.notify_filter.next();
                let len = self.feed.filtered(self.notify_filter).len();
                self.notify_list_state
                    .select(if len == 0 { None } else { Some(0) });
            }
            KeyCode::Char('m') => self.mark_selected_read(),
            KeyCode::Char('M') => self.feed.mark_all_read(),
            _ => {}
        }
    }

    fn handle_roadmap_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.roadmap_scroll = (self.roadmap_scroll + 1).min(self.roadmap_max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.roadmap_scroll = self.roadmap_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn select_bill(&mut self, delta: i64) {
        let len = self.bills.filtered(self.filter).len();
        if len == 0 {
            self.bill_list_state.select(None);
            return;
        }
        let current = self.bill_list_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.bill_list_state.select(Some(next));
    }

    fn reset_bill_selection(&mut self) {
        let len = self.bills.filtered(self.filter).len();
        self.bill_list_state
            .select(if len == 0 { None } else { Some(0) });
    }

    fn select_notification(&mut self, delta: i64) {
        let len = self.feed.filtered(self.notify_filter).len();
        if len == 0 {
            self.notify_list_state.select(None);
            return;
        }
        let current = self.notify_list_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.notify_list_state.select(Some(next));
    }

    /// (id, name, amount, status) of the selected bill under the active filter.
    fn selected_bill(&self) -> Option<(Box<str>, String, f64, BillStatus)> {
        let filtered = self.bills.filtered(self.filter);
        self.bill_list_state
            .selected()
            .and_then(|i| filtered.get(i))
            .map(|b| (b.id.clone(), b.service_name.clone(), b.amount, b.status))
    }

    /// Pay the selected bill immediately (optimistic, no timer).
    fn pay_selected(&mut self) {
        let Some((id, name, amount, status)) = self.selected_bill() else {
            return;
        };
        if status != BillStatus::Pending {
            return;
        }
        if self.bills.pay(&id) {
            log::info!("paid bill {} ({})", id, name);
            self.toast(
                format!("Paid {} · {}", name, format_amount(amount)),
                ToastKind::Success,
            );
        }
    }

    fn open_autopay_modal(&mut self) {
        let filtered = self.bills.filtered(self.filter);
        let Some(bill) = self.bill_list_state.selected().and_then(|i| filtered.get(i)) else {
            return;
        };
        let bill = (*bill).clone();
        self.modal.open_for(&bill);
    }

    /// Settle every pending bill now; the 3s timer only delays the
    /// confirmation, carrying the count and total captured here.
    fn start_pay_all(&mut self) {
        if self.paying_all {
            return;
        }
        let (count, total) = self.bills.pay_all();
        if count == 0 {
            return;
        }
        self.paying_all = true;
        log::info!("settling {} bills ({})", count, format_amount(total));
        self.timers
            .after(PAY_ALL_DELAY, TimerEvent::PayAllSettled { count, total });
    }

    fn toggle_wallet(&mut self) {
        if self.wallet.is_connected() || self.wallet.is_connecting() {
            self.wallet.disconnect();
            self.toast("Wallet disconnected".into(), ToastKind::Info);
        } else if self.wallet.begin_connect() {
            log::info!("wallet handshake started");
            self.timers.after(WALLET_DELAY, TimerEvent::WalletConnected);
        }
    }

    fn mark_selected_read(&mut self) {
        let filtered = self.feed.filtered(self.notify_filter);
        let Some(id) = self
            .notify_list_state
            .selected()
            .and_then(|i| filtered.get(i))
            .map(|n| n.id.clone())
        else {
            return;
        };
        self.feed.mark_read(&id);
    }

    fn apply_timer_event(&mut self, ev: TimerEvent) {
        match ev {
            TimerEvent::WalletConnected => {
                // Ignored if the user already disconnected
                if self.wallet.finish_connect() {
                    log::info!("wallet connected");
                    self.toast(
                        format!("Wallet connected · {}", DEMO_ADDRESS),
                        ToastKind::Success,
                    );
                }
            }
            TimerEvent::PayAllSettled { count, total } => {
                self.paying_all = false;
                self.toast(
                    format!("{} bills paid · {}", count, format_amount(total)),
                    ToastKind::Success,
                );
            }
        }
    }

    fn toast(&mut self, text: String, kind: ToastKind) {
        self.toasts.push(Toast::new(text, kind));
    }

    fn render(&mut self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(colors.bg_primary)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_tabs(frame, chunks[0], &colors);
        match self.screen {
            Screen::Home => self.render_home(frame, chunks[1]),
            Screen::Dashboard => self.render_dashboard(frame, chunks[1]),
            Screen::Notifications => self.render_notifications(frame, chunks[1]),
            Screen::Roadmap => self.render_roadmap(frame, chunks[1]),
        }
        self.render_status_bar(frame, chunks[2], &colors);
        self.render_toasts(frame, area, &colors);
        self.modal.render(frame, &colors);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let screens = [
            Screen::Home,
            Screen::Dashboard,
            Screen::Notifications,
            Screen::Roadmap,
        ];
        let mut spans = vec![Span::styled(
            " ⚡ Pulse ",
            Style::default()
                .fg(colors.accent_violet)
                .add_modifier(Modifier::BOLD),
        )];
        for (i, screen) in screens.iter().enumerate() {
            let style = if *screen == self.screen {
                Style::default()
                    .fg(colors.bg_primary)
                    .bg(colors.accent_violet)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_secondary)
            };
            let mut label = format!(" {} {} ", i + 1, screen.label());
            if *screen == Screen::Notifications {
                let unread = self.feed.unread_count();
                if unread > 0 {
                    label = format!(" {} {} ({}) ", i + 1, screen.label(), unread);
                }
            }
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let wallet = match self.wallet.state() {
            WalletState::Connecting => {
                Span::styled("⛓ connecting… ", Style::default().fg(colors.warning))
            }
            WalletState::Connected => Span::styled(
                format!("⛓ {} ", self.wallet.address().unwrap_or(DEMO_ADDRESS)),
                Style::default().fg(colors.success),
            ),
            WalletState::Disconnected => {
                Span::styled("w: connect wallet ", Style::default().fg(colors.text_muted))
            }
        };

        let hints = match self.screen {
            Screen::Home => " 1-4/Tab: screens │ q: quit ",
            Screen::Dashboard => " ↑↓ p a P f v │ w: wallet │ q: quit ",
            Screen::Notifications => " ↑↓ m M f │ q: quit ",
            Screen::Roadmap => " ↑↓: scroll │ q: quit ",
        };

        let line = Line::from(vec![
            Span::styled(hints, Style::default().fg(colors.text_muted)),
            Span::raw("  "),
            wallet,
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
    }

    /// Bottom-right toast stack, newest at the bottom.
    fn render_toasts(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        const MAX_VISIBLE: usize = 3;
        let visible: Vec<&Toast> = self.toasts.iter().rev().take(MAX_VISIBLE).collect();
        for (i, toast) in visible.iter().enumerate() {
            let width = toast.display_width().min(area.width);
            let y = area
                .height
                .saturating_sub(2)
                .saturating_sub(i as u16);
            if y == 0 {
                break;
            }
            let rect = Rect::new(area.width.saturating_sub(width), y, width, 1);
            let color = match toast.kind {
                ToastKind::Success => colors.success,
                ToastKind::Info => colors.info,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {} ", toast.text),
                    Style::default()
                        .fg(colors.bg_primary)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Right),
                rect,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, c: char) {
        app.handle_key_event(KeyCode::Char(c), KeyModifiers::NONE);
    }

    #[test]
    fn test_screen_switching() {
        let mut app = App::new();
        press(&mut app, '2');
        assert_eq!(app.screen, Screen::Dashboard);
        press(&mut app, '4');
        assert_eq!(app.screen, Screen::Roadmap);
        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_q_exits() {
        let mut app = App::new();
        press(&mut app, 'q');
        assert!(app.exit);
    }

    #[test]
    fn test_pay_selected_only_settles_pending() {
        let mut app = App::new();
        press(&mut app, '2');
        // first bill under All is Netflix (pending)
        app.pay_selected();
        assert_eq!(app.bills.bills()[0].status, BillStatus::Paid);
        assert_eq!(app.toasts.len(), 1);
        // paying again is a no-op
        app.pay_selected();
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_pay_all_flow() {
        let mut app = App::new();
        app.start_pay_all();
        assert!(app.paying_all);
        assert_eq!(app.bills.counts().pending, 0);
        // pressing again while processing does nothing
        app.start_pay_all();

        app.apply_timer_event(TimerEvent::PayAllSettled {
            count: 3,
            total: 186.79,
        });
        assert!(!app.paying_all);
        assert_eq!(app.toasts.len(), 1);
        assert!(app.toasts[0].text.contains("3 bills"));

        // nothing left to settle
        app.start_pay_all();
        assert!(!app.paying_all);
    }

    #[test]
    fn test_wallet_late_completion_ignored() {
        let mut app = App::new();
        app.toggle_wallet();
        assert!(app.wallet.is_connecting());
        // user disconnects before the 2s handshake resolves
        app.toggle_wallet();
        app.apply_timer_event(TimerEvent::WalletConnected);
        assert!(!app.wallet.is_connected());
        // only the disconnect toast, no "connected" one
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_wallet_connect_flow() {
        let mut app = App::new();
        app.toggle_wallet();
        app.apply_timer_event(TimerEvent::WalletConnected);
        assert!(app.wallet.is_connected());
        assert!(app.toasts.iter().any(|t| t.text.contains(DEMO_ADDRESS)));
    }

    #[test]
    fn test_filter_cycle_resets_selection() {
        let mut app = App::new();
        press(&mut app, '2');
        app.select_bill(3);
        assert_eq!(app.bill_list_state.selected(), Some(3));
        press(&mut app, 'f');
        assert_eq!(app.filter, StatusFilter::Pending);
        assert_eq!(app.bill_list_state.selected(), Some(0));
    }

    #[test]
    fn test_autopay_through_modal() {
        let mut app = App::new();
        press(&mut app, '2');
        press(&mut app, 'a');
        assert!(app.modal.open);
        for c in "2024-02-01".chars() {
            app.handle_key_event(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key_event(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.modal.open);
        assert_eq!(app.bills.bills()[0].status, BillStatus::Autopay);
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_mark_read_keys() {
        let mut app = App::new();
        press(&mut app, '3');
        press(&mut app, 'm');
        assert_eq!(app.feed.unread_count(), 3);
        press(&mut app, 'M');
        assert_eq!(app.feed.unread_count(), 0);
    }

    #[test]
    fn test_selection_clamps_at_ends() {
        let mut app = App::new();
        press(&mut app, '2');
        app.select_bill(-1);
        assert_eq!(app.bill_list_state.selected(), Some(0));
        app.select_bill(100);
        assert_eq!(app.bill_list_state.selected(), Some(5));
    }
}
