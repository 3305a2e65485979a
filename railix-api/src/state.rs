use crate::metrics::Metrics;
use railix_booking::{BookingRepository, BookingService};
use railix_core::repository::{RevenueRepository, TrainRepository};
use railix_store::ChangeBroadcaster;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub trains: Arc<dyn TrainRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub revenue: Arc<dyn RevenueRepository>,
    pub booking_service: Arc<BookingService>,
    pub changes: ChangeBroadcaster,
    pub metrics: Metrics,
}
