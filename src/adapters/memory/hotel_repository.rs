use crate::domain::{HotelId, hotel::Hotel};
use crate::ports::hotel_repository::{HotelRepository as HotelRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// HotelRepositoryのインメモリ実装
#[derive(Default)]
pub struct HotelRepository {
    hotels: RwLock<HashMap<HotelId, Hotel>>,
}

impl HotelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepositoryTrait for HotelRepository {
    async fn insert(&self, hotel: Hotel) -> Result<()> {
        self.hotels.write().await.insert(hotel.hotel_id, hotel);
        Ok(())
    }

    async fn update(&self, hotel: Hotel) -> Result<bool> {
        let mut hotels = self.hotels.write().await;
        match hotels.get_mut(&hotel.hotel_id) {
            Some(slot) => {
                *slot = hotel;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, hotel_id: HotelId) -> Result<Option<Hotel>> {
        Ok(self.hotels.read().await.get(&hotel_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Hotel>> {
        Ok(self.hotels.read().await.values().cloned().collect())
    }

    async fn delete(&self, hotel_id: HotelId) -> Result<bool> {
        Ok(self.hotels.write().await.remove(&hotel_id).is_some())
    }
}
