use chrono::Utc;
use railix_shared::models::events::{ChangeOp, ChangedTable, RowChangeEvent};
use tokio::sync::broadcast;

/// Fan-out of row-level change notifications to dashboard observers.
///
/// Repositories publish after each commit; subscribers that fall behind the
/// channel capacity lag and miss events, which is acceptable for a refresh
/// channel that is not part of correctness.
#[derive(Clone)]
pub struct ChangeBroadcaster {
    tx: broadcast::Sender<RowChangeEvent>,
}

impl ChangeBroadcaster {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RowChangeEvent> {
        self.tx.subscribe()
    }

    pub fn publish(
        &self,
        table: ChangedTable,
        op: ChangeOp,
        before: Option<serde_json::Value>,
        after: serde_json::Value,
    ) {
        let event = RowChangeEvent {
            table,
            op,
            before,
            after,
            timestamp: Utc::now().timestamp(),
        };
        // Err means no subscriber is listening right now; fine.
        let _ = self.tx.send(event);
    }
}
