use crate::application::{
    ImportReport, ServiceError, auth_gateway::require_self_or_admin, booking_manager, hotel_store,
    review_manager,
};
use crate::domain::{
    BookingId,
    HotelId,
    UserId,
    catalog::CatalogEntry,
    commands::AddReview,
    hotel::{HotelFilter, HotelPatch, NewHotel},
};
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
    extract::{ApiJson, ApiPath, ApiQuery},
    types::{
        AddReviewRequest, BookingResponse, HotelResponse, HotelSearchQuery, QuoteQuery,
        QuoteResponse, ReviewResponse, to_responses,
    },
};

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /hotels - ホテル一覧・検索
///
/// クエリパラメータ（すべてオプション）:
/// - location: 所在地の部分一致
/// - min_price / max_price: 1泊料金の範囲
/// - min_rating: 評価の下限
/// - features: 必須の設備（カンマ区切り）
pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<HotelSearchQuery>,
) -> Result<Json<Vec<HotelResponse>>, ApiError> {
    let filter = query.into_filter();

    let hotels = if filter == HotelFilter::default() {
        hotel_store::list_hotels(&state.service_deps).await?
    } else {
        hotel_store::search_hotels(&state.service_deps, &filter).await?
    };

    Ok(Json(to_responses(hotels)))
}

/// GET /hotels/:id - ホテル詳細
pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    ApiPath(hotel_id): ApiPath<Uuid>,
) -> Result<Json<HotelResponse>, ApiError> {
    let hotel_id = HotelId::from_uuid(hotel_id);

    let hotel = hotel_store::get_hotel_by_id(&state.service_deps, hotel_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("hotel", hotel_id))?;

    Ok(Json(HotelResponse::from(hotel)))
}

/// GET /hotels/:id/quote - 宿泊料金の見積もり
pub async fn quote_stay(
    State(state): State<Arc<AppState>>,
    ApiPath(hotel_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<QuoteQuery>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let total_price = booking_manager::quote_stay(
        &state.service_deps,
        HotelId::from_uuid(hotel_id),
        query.check_in,
        query.check_out,
    )
    .await?;

    Ok(Json(QuoteResponse {
        hotel_id,
        check_in: query.check_in,
        check_out: query.check_out,
        total_price,
    }))
}

/// GET /hotels/:id/reviews - ホテルのレビュー（新しい順）
pub async fn hotel_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(hotel_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews =
        review_manager::get_hotel_reviews(&state.service_deps, HotelId::from_uuid(hotel_id))
            .await?;
    Ok(Json(to_responses(reviews)))
}

/// GET /hotels/:id/bookings - ホテルの予約一覧（管理者専用）
pub async fn hotel_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(hotel_id): ApiPath<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let bookings = booking_manager::get_hotel_bookings(
        &state.service_deps,
        caller.user_id,
        HotelId::from_uuid(hotel_id),
    )
    .await?;
    Ok(Json(to_responses(bookings)))
}

// ============================================================================
// Command handlers (POST / PATCH / DELETE)
// ============================================================================

/// POST /hotels - ホテルを登録（管理者専用）
pub async fn add_hotel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<NewHotel>,
) -> Result<(StatusCode, Json<HotelResponse>), ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let hotel = hotel_store::add_hotel(&state.service_deps, caller.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(HotelResponse::from(hotel))))
}

/// PATCH /hotels/:id - ホテルを部分更新（管理者専用）
pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(hotel_id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<HotelPatch>,
) -> Result<Json<HotelResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let hotel = hotel_store::update_hotel(
        &state.service_deps,
        caller.user_id,
        HotelId::from_uuid(hotel_id),
        patch,
    )
    .await?;
    Ok(Json(HotelResponse::from(hotel)))
}

/// DELETE /hotels/:id - ホテルを削除（管理者専用）
///
/// 有効な予約が残っている場合は 409。
pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(hotel_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    hotel_store::delete_hotel(
        &state.service_deps,
        caller.user_id,
        HotelId::from_uuid(hotel_id),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /hotels/import - カタログを取り込む（管理者専用）
pub async fn import_catalog(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(entries): ApiJson<Vec<CatalogEntry>>,
) -> Result<Json<ImportReport>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let report = hotel_store::import_catalog(&state.service_deps, caller.user_id, entries).await?;
    Ok(Json(report))
}

/// POST /hotels/:id/reviews - レビューを投稿
///
/// user_id を省略した場合は呼び出し元本人。他人として投稿できるのは管理者のみ。
pub async fn add_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(hotel_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<AddReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let user_id = req.user_id.map(UserId::from_uuid).unwrap_or(caller.user_id);
    require_self_or_admin(&state.service_deps, caller.user_id, user_id).await?;

    let cmd = AddReview {
        user_id,
        hotel_id: HotelId::from_uuid(hotel_id),
        booking_id: req.booking_id.map(BookingId::from_uuid),
        rating: req.rating,
        comment: req.comment,
    };

    let review = review_manager::add_review(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}
