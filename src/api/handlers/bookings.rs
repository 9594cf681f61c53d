use crate::application::{ServiceError, auth_gateway::require_self_or_admin, booking_manager};
use crate::domain::{BookingId, HotelId, UserId, booking::Booking, commands::CreateBooking};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{AppState, authenticate};
use crate::api::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    types::{BookingResponse, CreateBookingRequest},
};

/// 予約を取得し、呼び出し元が本人または管理者か確認する
async fn owned_booking(
    state: &AppState,
    caller: UserId,
    booking_id: BookingId,
) -> Result<Booking, ApiError> {
    let booking = booking_manager::get_booking(&state.service_deps, booking_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("booking", booking_id))?;

    require_self_or_admin(&state.service_deps, caller, booking.user_id).await?;
    Ok(booking)
}

/// POST /bookings - 予約を作成
///
/// 強制されるビジネスルール:
/// - 利用者とホテルが存在すること
/// - チェックイン日がチェックアウト日より前であること
/// - 他人の予約を作成できるのは管理者のみ
///
/// total_price を省略した場合は見積もり額を使う。
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let user_id = req.user_id.map(UserId::from_uuid).unwrap_or(caller.user_id);
    require_self_or_admin(&state.service_deps, caller.user_id, user_id).await?;

    let hotel_id = HotelId::from_uuid(req.hotel_id);
    let total_price = match req.total_price {
        Some(price) => price,
        None => {
            booking_manager::quote_stay(&state.service_deps, hotel_id, req.check_in, req.check_out)
                .await?
        }
    };

    let cmd = CreateBooking {
        user_id,
        hotel_id,
        check_in: req.check_in,
        check_out: req.check_out,
        total_price,
    };

    let booking = booking_manager::create_booking(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// GET /bookings/:id - 予約詳細（本人または管理者）
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(booking_id): ApiPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let booking = owned_booking(&state, caller.user_id, BookingId::from_uuid(booking_id)).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// POST /bookings/:id/cancel - 予約をキャンセル（本人または管理者）
///
/// キャンセル済みの予約は 409。レコードは削除されない。
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(booking_id): ApiPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let booking_id = BookingId::from_uuid(booking_id);

    owned_booking(&state, caller.user_id, booking_id).await?;

    let booking = booking_manager::cancel_booking(&state.service_deps, booking_id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// POST /bookings/:id/confirm - 予約を確定（管理者専用）
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(booking_id): ApiPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let booking = booking_manager::confirm_booking(
        &state.service_deps,
        caller.user_id,
        BookingId::from_uuid(booking_id),
    )
    .await?;
    Ok(Json(BookingResponse::from(booking)))
}
