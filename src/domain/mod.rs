pub mod booking;
pub mod catalog;
pub mod chat;
pub mod commands;
mod double_option;
pub mod errors;
pub mod hotel;
pub mod review;
pub mod user;
pub mod value_objects;

pub use booking::BookingStatus;
pub use errors::*;
pub use value_objects::*;
