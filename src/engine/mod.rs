pub mod booking;
pub mod fare;
pub mod progress;
pub mod receipt;
pub mod session;
pub mod ticker;
