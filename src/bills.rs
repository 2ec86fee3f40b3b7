//! Bill and notification records plus the reducer-style operations the
//! dashboard drives. All data is in-memory mock data embedded at build time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MOCK_BILLS: &str = include_str!("../data/mock_bills.json");
const MOCK_NOTIFICATIONS: &str = include_str!("../data/mock_notifications.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
    Autopay,
}

impl BillStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Paid => "PAID",
            BillStatus::Autopay => "AUTOPAY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Box<str>,
    pub service_name: String,
    pub icon: String,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: BillStatus,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Bill {
    /// Pending and past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == BillStatus::Pending && self.due_date < today
    }
}

/// Status filter buckets shown in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Paid,
    Autopay,
}

impl StatusFilter {
    pub const ORDER: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Paid,
        StatusFilter::Autopay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Bills",
            StatusFilter::Pending => "Pending",
            StatusFilter::Paid => "Paid",
            StatusFilter::Autopay => "AutoPay",
        }
    }

    pub fn matches(&self, status: BillStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == BillStatus::Pending,
            StatusFilter::Paid => status == BillStatus::Paid,
            StatusFilter::Autopay => status == BillStatus::Autopay,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Paid,
            StatusFilter::Paid => StatusFilter::Autopay,
            StatusFilter::Autopay => StatusFilter::All,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub paid: usize,
    pub autopay: usize,
}

impl StatusCounts {
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Pending => self.pending,
            StatusFilter::Paid => self.paid,
            StatusFilter::Autopay => self.autopay,
        }
    }
}

/// AutoPay schedule captured by the modal. Display-only in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Frequency::Monthly => Frequency::Quarterly,
            Frequency::Quarterly => Frequency::Yearly,
            Frequency::Yearly => Frequency::Monthly,
        }
    }
}

/// Schedule captured by the AutoPay modal. Display-only in the demo; saving
/// it flips the bill to autopay and nothing recurs.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPaySettings {
    pub payment_date: String,
    pub frequency: Frequency,
    pub max_limit: Option<f64>,
}

/// The user's bill list with the three dashboard state transitions.
pub struct BillBook {
    bills: Vec<Bill>,
}

impl BillBook {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self { bills }
    }

    /// Load the embedded sample records.
    pub fn mock() -> Self {
        let bills = serde_json::from_str(MOCK_BILLS).unwrap_or_else(|e| {
            log::error!("embedded bill data failed to parse: {}", e);
            Vec::new()
        });
        Self { bills }
    }

    #[inline]
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bills.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Mark the bill with `id` as paid. Returns false when no bill matches.
    pub fn pay(&mut self, id: &str) -> bool {
        let mut changed = false;
        for bill in &mut self.bills {
            if &*bill.id == id {
                bill.status = BillStatus::Paid;
                changed = true;
            }
        }
        changed
    }

    /// Switch the bill with `id` to autopay. Returns false when no bill
    /// matches.
    pub fn enable_autopay(&mut self, id: &str) -> bool {
        let mut changed = false;
        for bill in &mut self.bills {
            if &*bill.id == id {
                bill.status = BillStatus::Autopay;
                changed = true;
            }
        }
        changed
    }

    /// Settle every pending bill. Returns the number of bills settled and
    /// their combined amount.
    pub fn pay_all(&mut self) -> (usize, f64) {
        let mut count = 0;
        let mut total = 0.0;
        for bill in &mut self.bills {
            if bill.status == BillStatus::Pending {
                bill.status = BillStatus::Paid;
                count += 1;
                total += bill.amount;
            }
        }
        (count, total)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            all: self.bills.len(),
            ..StatusCounts::default()
        };
        for bill in &self.bills {
            match bill.status {
                BillStatus::Pending => counts.pending += 1,
                BillStatus::Paid => counts.paid += 1,
                BillStatus::Autopay => counts.autopay += 1,
            }
        }
        counts
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Bill> {
        self.bills
            .iter()
            .filter(|b| filter.matches(b.status))
            .collect()
    }

    pub fn monthly_total(&self) -> f64 {
        self.bills.iter().map(|b| b.amount).sum()
    }

    pub fn pending_total(&self) -> f64 {
        self.status_total(BillStatus::Pending)
    }

    pub fn autopay_total(&self) -> f64 {
        self.status_total(BillStatus::Autopay)
    }

    fn status_total(&self, status: BillStatus) -> f64 {
        self.bills
            .iter()
            .filter(|b| b.status == status)
            .map(|b| b.amount)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Upcoming,
    Overdue,
    Success,
    Warning,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Upcoming => "UPCOMING",
            NotificationKind::Overdue => "OVERDUE",
            NotificationKind::Success => "SUCCESS",
            NotificationKind::Warning => "WARNING",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Upcoming => "◷",
            NotificationKind::Overdue => "⊘",
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "⚠",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Box<str>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub bill_id: Option<Box<str>>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Kind filter on the notifications screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Kind(NotificationKind),
}

impl KindFilter {
    pub const ORDER: [KindFilter; 5] = [
        KindFilter::All,
        KindFilter::Kind(NotificationKind::Upcoming),
        KindFilter::Kind(NotificationKind::Overdue),
        KindFilter::Kind(NotificationKind::Success),
        KindFilter::Kind(NotificationKind::Warning),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KindFilter::All => "All",
            KindFilter::Kind(NotificationKind::Upcoming) => "Upcoming",
            KindFilter::Kind(NotificationKind::Overdue) => "Overdue",
            KindFilter::Kind(NotificationKind::Success) => "Success",
            KindFilter::Kind(NotificationKind::Warning) => "Warning",
        }
    }

    pub fn matches(&self, kind: NotificationKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Kind(k) => *k == kind,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }
}

/// Notification list with read-state tracking.
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    /// Load the embedded sample records.
    pub fn mock() -> Self {
        let items = serde_json::from_str(MOCK_NOTIFICATIONS).unwrap_or_else(|e| {
            log::error!("embedded notification data failed to parse: {}", e);
            Vec::new()
        });
        Self { items }
    }

    #[inline]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filtered(&self, filter: KindFilter) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| filter.matches(n.kind))
            .collect()
    }

    pub fn count(&self, filter: KindFilter) -> usize {
        self.items.iter().filter(|n| filter.matches(n.kind)).count()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: &str) {
        for item in &mut self.items {
            if &*item.id == id {
                item.read = true;
            }
        }
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> BillBook {
        BillBook::mock()
    }

    #[test]
    fn test_mock_data_loads() {
        let book = sample_book();
        assert_eq!(book.len(), 6);
        let feed = NotificationFeed::mock();
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn test_pay_marks_bill_paid() {
        let mut book = sample_book();
        assert!(book.pay("1"));
        let bill = book.bills().iter().find(|b| &*b.id == "1").unwrap();
        assert_eq!(bill.status, BillStatus::Paid);
        assert!(!book.pay("missing"));
    }

    #[test]
    fn test_enable_autopay() {
        let mut book = sample_book();
        assert!(book.enable_autopay("3"));
        let bill = book.bills().iter().find(|b| &*b.id == "3").unwrap();
        assert_eq!(bill.status, BillStatus::Autopay);
    }

    #[test]
    fn test_pay_all_settles_only_pending() {
        let mut book = sample_book();
        let (count, total) = book.pay_all();
        assert_eq!(count, 3);
        assert!((total - 186.79).abs() < 1e-9);
        assert_eq!(book.counts().pending, 0);
        // paid and autopay bills untouched
        assert_eq!(book.counts().autopay, 2);
        // second run settles nothing
        assert_eq!(book.pay_all(), (0, 0.0));
    }

    #[test]
    fn test_counts_and_filters() {
        let book = sample_book();
        let counts = book.counts();
        assert_eq!(counts.all, 6);
        assert_eq!(counts.pending, 3);
        assert_eq!(counts.paid, 1);
        assert_eq!(counts.autopay, 2);
        assert_eq!(book.filtered(StatusFilter::All).len(), 6);
        assert_eq!(book.filtered(StatusFilter::Pending).len(), 3);
        assert_eq!(book.filtered(StatusFilter::Autopay).len(), 2);
    }

    #[test]
    fn test_totals() {
        let book = sample_book();
        assert!((book.monthly_total() - 271.76).abs() < 1e-9);
        assert!((book.pending_total() - 186.79).abs() < 1e-9);
        assert!((book.autopay_total() - 24.98).abs() < 1e-9);
    }

    #[test]
    fn test_overdue_predicate() {
        let book = sample_book();
        let netflix = book.bills().iter().find(|b| &*b.id == "1").unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        assert!(netflix.is_overdue(after));
        assert!(!netflix.is_overdue(before));
        // paid bills are never overdue
        let internet = book.bills().iter().find(|b| &*b.id == "4").unwrap();
        assert!(!internet.is_overdue(after));
    }

    #[test]
    fn test_status_filter_cycle() {
        let mut filter = StatusFilter::All;
        for _ in 0..StatusFilter::ORDER.len() {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_notification_filters_and_read_state() {
        let mut feed = NotificationFeed::mock();
        assert_eq!(feed.count(KindFilter::All), 4);
        assert_eq!(feed.count(KindFilter::Kind(NotificationKind::Overdue)), 1);
        assert_eq!(feed.unread_count(), 4);

        feed.mark_read("2");
        assert_eq!(feed.unread_count(), 3);
        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_kind_filter_cycle_wraps() {
        let mut filter = KindFilter::All;
        for _ in 0..KindFilter::ORDER.len() {
            filter = filter.next();
        }
        assert_eq!(filter, KindFilter::All);
    }
}
