pub mod memory;
pub mod models;
pub mod planner;
pub mod refund;
pub mod repository;
pub mod service;

pub use models::{BookingGroupPlan, BookingRequest, BookingView, CancellationPlan, PassengerDetails};
pub use repository::{BookingRepository, CancelOutcome};
pub use service::{BookingError, BookingService};
