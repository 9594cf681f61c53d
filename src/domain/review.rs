use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, HotelId, ReviewId, ReviewRating, UserId, ValidationError, booking::Booking,
    commands::AddReview,
};

/// Review集約
///
/// 作成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub hotel_id: HotelId,
    pub booking_id: Option<BookingId>,
    pub rating: ReviewRating,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// 純粋関数：レビューを作成する
///
/// ビジネスルール：
/// - 評価は1〜5の整数
/// - 予約を紐付ける場合、その予約は同じ利用者・同じホテルのものであること
///
/// `booking` はコマンドの booking_id で取得した予約。存在確認は呼び出し側で行う。
pub fn write_review(
    cmd: &AddReview,
    booking: Option<&Booking>,
    timestamp: DateTime<Utc>,
) -> Result<Review, ValidationError> {
    let rating = ReviewRating::try_from(cmd.rating)?;

    if let Some(booking) = booking {
        if booking.user_id != cmd.user_id || booking.hotel_id != cmd.hotel_id {
            return Err(ValidationError::BookingMismatch);
        }
    }

    Ok(Review {
        review_id: ReviewId::new(),
        user_id: cmd.user_id,
        hotel_id: cmd.hotel_id,
        booking_id: booking.map(|b| b.booking_id),
        rating,
        comment: cmd.comment.trim().to_string(),
        timestamp,
    })
}
