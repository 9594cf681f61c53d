use crate::domain::{HotelId, hotel::Hotel};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ホテルリポジトリポート
///
/// Hotel集約の正本を所有する。関連（予約・レビュー）は保持しない。
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn insert(&self, hotel: Hotel) -> Result<()>;

    /// ホテルを置き換える。存在しなかった場合は false。
    async fn update(&self, hotel: Hotel) -> Result<bool>;

    async fn get(&self, hotel_id: HotelId) -> Result<Option<Hotel>>;

    async fn list(&self) -> Result<Vec<Hotel>>;

    /// 削除する。存在しなかった場合は false。
    async fn delete(&self, hotel_id: HotelId) -> Result<bool>;
}
