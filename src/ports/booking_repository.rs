use crate::domain::{BookingId, HotelId, UserId, booking::Booking};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約リポジトリポート
///
/// 予約は削除しない（キャンセルもステータス更新として保存する）。
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// 予約を置き換える。存在しなかった場合は false。
    async fn update(&self, booking: Booking) -> Result<bool>;

    async fn get(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 利用者の全予約（順序は保証しない）
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Booking>>;

    /// ホテルの全予約（順序は保証しない）
    async fn find_by_hotel(&self, hotel_id: HotelId) -> Result<Vec<Booking>>;
}
