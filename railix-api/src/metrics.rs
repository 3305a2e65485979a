use axum::extract::State;
use crate::state::AppState;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Per-process booking metrics, exposed at `GET /metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub bookings_created: IntCounter,
    pub bookings_cancelled: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let bookings_created = IntCounter::new(
            "railix_bookings_created_total",
            "Booking rows created (one per passenger)",
        )?;
        let bookings_cancelled = IntCounter::new(
            "railix_bookings_cancelled_total",
            "Bookings transitioned to CANCELLED",
        )?;

        registry.register(Box::new(bookings_created.clone()))?;
        registry.register(Box::new(bookings_cancelled.clone()))?;

        Ok(Self {
            registry,
            bookings_created,
            bookings_cancelled,
        })
    }

    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {e}");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// GET /metrics
pub async fn export_metrics(State(state): State<AppState>) -> String {
    state.metrics.export()
}
