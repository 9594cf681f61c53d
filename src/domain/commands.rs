use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookingId, HotelId, UserId};

/// コマンド：宿泊を予約する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub hotel_id: HotelId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
}

/// コマンド：レビューを投稿する
///
/// rating は範囲検証前の生の値。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReview {
    pub user_id: UserId,
    pub hotel_id: HotelId,
    pub booking_id: Option<BookingId>,
    pub rating: i64,
    pub comment: String,
}

/// コマンド：メッセージを送信する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
}
