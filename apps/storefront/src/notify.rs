//! # Notifications
//!
//! User-facing acknowledgments (toasts) for cart events.
//!
//! ## Event to Toast
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartEvent            kind      title                 description       │
//! │  ─────────            ────      ─────                 ───────────       │
//! │  ItemAdded            success   <name>                Đã thêm vào ...   │
//! │  QuantityUpdated      info      <name>                Đã cập nhật (N)   │
//! │  LineRemoved          plain     Đã xóa món ...        <name>            │
//! │  CartCleared          plain     Đã làm trống ...      Bạn có thể ...    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sinks are fire-and-forget: `notify` has no return value and the store
//! never waits on the outcome.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use bunbo_core::CartEvent;

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Plain,
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique per toast so a front end can dedupe and dismiss.
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Notification {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description,
        }
    }

    /// Builds the toast shown for a cart event.
    pub fn from_event(event: &CartEvent) -> Self {
        match event {
            CartEvent::ItemAdded { name } => Notification::new(
                NotificationKind::Success,
                name.clone(),
                Some("Đã thêm vào giỏ hàng.".to_string()),
            ),
            CartEvent::QuantityUpdated { name, quantity } => Notification::new(
                NotificationKind::Info,
                name.clone(),
                Some(format!("Đã cập nhật số lượng ({quantity}) trong giỏ hàng.")),
            ),
            CartEvent::LineRemoved { name } => Notification::new(
                NotificationKind::Plain,
                "Đã xóa món khỏi giỏ hàng",
                Some(name.clone()),
            ),
            CartEvent::CartCleared => Notification::new(
                NotificationKind::Plain,
                "Đã làm trống giỏ hàng",
                Some("Bạn có thể tiếp tục chọn món khác.".to_string()),
            ),
        }
    }
}

/// Receives toasts from the cart store.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink: logs each toast as an `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        info!(
            id = %notification.id,
            kind = ?notification.kind,
            description = notification.description.as_deref().unwrap_or(""),
            "{}",
            notification.title
        );
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Keeps every toast in memory, for tests and for front ends that drain
/// toasts after each command.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_added_toast() {
        let n = Notification::from_event(&CartEvent::ItemAdded {
            name: "Bún bò đặc biệt".to_string(),
        });
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.title, "Bún bò đặc biệt");
        assert_eq!(n.description.as_deref(), Some("Đã thêm vào giỏ hàng."));
    }

    #[test]
    fn test_quantity_updated_toast_carries_quantity() {
        let n = Notification::from_event(&CartEvent::QuantityUpdated {
            name: "Chả cua".to_string(),
            quantity: 4,
        });
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(
            n.description.as_deref(),
            Some("Đã cập nhật số lượng (4) trong giỏ hàng.")
        );
    }

    #[test]
    fn test_removed_and_cleared_toasts() {
        let n = Notification::from_event(&CartEvent::LineRemoved {
            name: "Trà đá".to_string(),
        });
        assert_eq!(n.kind, NotificationKind::Plain);
        assert_eq!(n.title, "Đã xóa món khỏi giỏ hàng");
        assert_eq!(n.description.as_deref(), Some("Trà đá"));

        let n = Notification::from_event(&CartEvent::CartCleared);
        assert_eq!(n.title, "Đã làm trống giỏ hàng");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Notification::from_event(&CartEvent::CartCleared);
        let b = Notification::from_event(&CartEvent::CartCleared);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_recording_sink_drain() {
        let sink = RecordingSink::new();
        sink.notify(Notification::from_event(&CartEvent::CartCleared));
        assert_eq!(sink.len(), 1);

        let drained = sink.drain();
        assert_eq!(drained.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_serialization_omits_missing_description() {
        let n = Notification::new(NotificationKind::Plain, "Xin chào", None);
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["kind"], "plain");
        assert!(json.get("description").is_none());
    }
}
