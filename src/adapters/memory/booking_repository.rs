use crate::domain::{BookingId, HotelId, UserId, booking::Booking};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// BookingRepositoryのインメモリ実装
#[derive(Default)]
pub struct BookingRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        self.bookings
            .write()
            .await
            .insert(booking.booking_id, booking);
        Ok(())
    }

    async fn update(&self, booking: Booking) -> Result<bool> {
        let mut bookings = self.bookings.write().await;
        match bookings.get_mut(&booking.booking_id) {
            Some(slot) => {
                *slot = booking;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.read().await.get(&booking_id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_hotel(&self, hotel_id: HotelId) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}
