pub mod booking_repository;
pub mod chat_repository;
pub mod hotel_repository;
pub mod review_repository;
pub mod session_store;
pub mod user_repository;

pub use booking_repository::BookingRepository;
pub use chat_repository::ChatRepository;
pub use hotel_repository::HotelRepository;
pub use review_repository::ReviewRepository;
pub use session_store::SessionStore;
pub use user_repository::UserRepository;
