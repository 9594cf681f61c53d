use crate::domain::{self, HotelId, UserId, commands::AddReview, review::Review};
use chrono::Utc;

use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};
use super::locks::LockKey;

/// 新しい順に並べる
///
/// リポジトリは挿入順で返すため、先に反転してから安定ソートすると
/// 同時刻のレビューも後から投稿されたものが先頭になる。
fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.reverse();
    reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    reviews
}

/// レビューを投稿する
///
/// ビジネスルール：
/// - 利用者とホテルが存在すること（`NotFound`）
/// - 評価は1〜5の整数（`InvalidArgument`）
/// - booking_id を指定する場合、その予約が存在し同じ利用者・ホテルのものであること（`InvalidArgument`）
/// - 1つの予約に対するレビューは1件まで（`InvalidState`）
pub async fn add_review(deps: &ServiceDependencies, cmd: AddReview) -> Result<Review> {
    // 予約を紐付ける場合は同じ予約へのレビューを直列化する
    let _guard = match cmd.booking_id {
        Some(booking_id) => Some(deps.locks.acquire(LockKey::Booking(booking_id)).await),
        None => None,
    };

    if deps
        .users
        .get(cmd.user_id)
        .await
        .map_err(ServiceError::Repository)?
        .is_none()
    {
        return Err(ServiceError::not_found("user", cmd.user_id));
    }
    if deps
        .hotels
        .get(cmd.hotel_id)
        .await
        .map_err(ServiceError::Repository)?
        .is_none()
    {
        return Err(ServiceError::not_found("hotel", cmd.hotel_id));
    }

    let booking = match cmd.booking_id {
        Some(booking_id) => {
            let booking = deps
                .bookings
                .get(booking_id)
                .await
                .map_err(ServiceError::Repository)?
                .ok_or_else(|| {
                    ServiceError::InvalidArgument(format!("booking {booking_id} does not exist"))
                })?;
            Some(booking)
        }
        None => None,
    };

    let review = domain::review::write_review(&cmd, booking.as_ref(), Utc::now())?;

    if let Some(booking_id) = review.booking_id {
        let existing = deps
            .reviews
            .find_by_booking(booking_id)
            .await
            .map_err(ServiceError::Repository)?;
        if existing.is_some() {
            return Err(ServiceError::InvalidState(format!(
                "booking {booking_id} has already been reviewed"
            )));
        }
    }

    deps.reviews
        .insert(review.clone())
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(
        review_id = %review.review_id.value(),
        hotel_id = %review.hotel_id,
        user_id = %review.user_id,
        "review added"
    );
    Ok(review)
}

/// ホテルのレビュー一覧（新しい順）
pub async fn get_hotel_reviews(
    deps: &ServiceDependencies,
    hotel_id: HotelId,
) -> Result<Vec<Review>> {
    let reviews = deps
        .reviews
        .find_by_hotel(hotel_id)
        .await
        .map_err(ServiceError::Repository)?;
    Ok(newest_first(reviews))
}

/// 利用者が投稿したレビュー一覧（新しい順）
pub async fn get_user_reviews(deps: &ServiceDependencies, user_id: UserId) -> Result<Vec<Review>> {
    let reviews = deps
        .reviews
        .find_by_user(user_id)
        .await
        .map_err(ServiceError::Repository)?;
    Ok(newest_first(reviews))
}
