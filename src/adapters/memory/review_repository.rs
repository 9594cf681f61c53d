use crate::domain::{BookingId, HotelId, UserId, review::Review};
use crate::ports::review_repository::{Result, ReviewRepository as ReviewRepositoryTrait};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// ReviewRepositoryのインメモリ実装
///
/// 投稿順を保つため Vec に追記する。
#[derive(Default)]
pub struct ReviewRepository {
    reviews: RwLock<Vec<Review>>,
}

impl ReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find<F>(&self, predicate: F) -> Vec<Review>
    where
        F: Fn(&Review) -> bool,
    {
        let reviews = self.reviews.read().await;
        reviews.iter().filter(|r| predicate(*r)).cloned().collect()
    }
}

#[async_trait]
impl ReviewRepositoryTrait for ReviewRepository {
    async fn insert(&self, review: Review) -> Result<()> {
        self.reviews.write().await.push(review);
        Ok(())
    }

    async fn find_by_hotel(&self, hotel_id: HotelId) -> Result<Vec<Review>> {
        Ok(self.find(|r| r.hotel_id == hotel_id).await)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Review>> {
        Ok(self.find(|r| r.user_id == user_id).await)
    }

    async fn find_by_booking(&self, booking_id: BookingId) -> Result<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .find(|r| r.booking_id == Some(booking_id))
            .cloned())
    }
}
