pub mod booking;
pub mod repository;
pub mod train;
