pub mod auth_gateway;
pub mod booking_manager;
pub mod chat_service;
pub mod dependencies;
pub mod errors;
pub mod hotel_store;
pub mod lifecycle;
pub mod locks;
pub mod review_manager;
pub mod user_store;

pub use auth_gateway::SignedIn;
pub use dependencies::{BookingPolicy, ServiceDependencies};
pub use errors::{Result, ServiceError};
pub use hotel_store::ImportReport;
pub use lifecycle::{StartupError, initialize, shutdown};
pub use locks::{EntityLocks, LockKey};
