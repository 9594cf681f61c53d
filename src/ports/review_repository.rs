use crate::domain::{BookingId, HotelId, UserId, review::Review};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// レビューリポジトリポート
///
/// 検索結果は投稿順（古い順）で返す。
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: Review) -> Result<()>;

    async fn find_by_hotel(&self, hotel_id: HotelId) -> Result<Vec<Review>>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Review>>;

    /// 予約に紐付いたレビュー（予約1件につき最大1件）
    async fn find_by_booking(&self, booking_id: BookingId) -> Result<Option<Review>>;
}
