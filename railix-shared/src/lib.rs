pub mod masked;
pub mod models;
pub mod pnr;

pub use masked::Masked;
pub use pnr::Pnr;
