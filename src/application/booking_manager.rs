use crate::domain::{
    self, BookingId, HotelId, StayPeriod, UserId, booking::Booking, commands::CreateBooking,
};
use chrono::{NaiveDate, Utc};
use futures::future::try_join;

use super::auth_gateway::require_admin;
use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};
use super::locks::LockKey;

/// チェックイン日の昇順（同日は作成順）
fn sort_by_check_in(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        a.check_in_date
            .cmp(&b.check_in_date)
            .then(a.created_at.cmp(&b.created_at))
    });
}

/// 予約を作成する
///
/// ビジネスルール：
/// - 利用者とホテルが存在すること（`NotFound`）
/// - チェックイン日 < チェックアウト日、合計金額 ≥ 0（`InvalidArgument`）
/// - 初期状態はpending（ポリシーで自動確定可）
///
/// 利用者・ホテルのロックを保持したまま存在確認と保存を行うため、
/// 同時に実行された利用者・ホテルの削除と競合しない。
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<Booking> {
    let _guard = deps
        .locks
        .acquire_all([LockKey::User(cmd.user_id), LockKey::Hotel(cmd.hotel_id)])
        .await;

    let (user, hotel) = try_join(deps.users.get(cmd.user_id), deps.hotels.get(cmd.hotel_id))
        .await
        .map_err(ServiceError::Repository)?;

    if user.is_none() {
        return Err(ServiceError::not_found("user", cmd.user_id));
    }
    if hotel.is_none() {
        return Err(ServiceError::not_found("hotel", cmd.hotel_id));
    }

    let booking = domain::booking::create_booking(&cmd, deps.policy.auto_confirm, Utc::now())?;

    deps.bookings
        .insert(booking.clone())
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(
        booking_id = %booking.booking_id,
        user_id = %booking.user_id,
        hotel_id = %booking.hotel_id,
        status = %booking.status,
        "booking created"
    );
    Ok(booking)
}

/// IDで予約を取得する
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
) -> Result<Option<Booking>> {
    deps.bookings
        .get(booking_id)
        .await
        .map_err(ServiceError::Repository)
}

/// 利用者の予約一覧（チェックイン日の昇順）
pub async fn get_user_bookings(
    deps: &ServiceDependencies,
    user_id: UserId,
) -> Result<Vec<Booking>> {
    let mut bookings = deps
        .bookings
        .find_by_user(user_id)
        .await
        .map_err(ServiceError::Repository)?;
    sort_by_check_in(&mut bookings);
    Ok(bookings)
}

/// ホテルの予約一覧（管理者専用、チェックイン日の昇順）
pub async fn get_hotel_bookings(
    deps: &ServiceDependencies,
    actor: UserId,
    hotel_id: HotelId,
) -> Result<Vec<Booking>> {
    require_admin(deps, actor).await?;

    let mut bookings = deps
        .bookings
        .find_by_hotel(hotel_id)
        .await
        .map_err(ServiceError::Repository)?;
    sort_by_check_in(&mut bookings);
    Ok(bookings)
}

/// 宿泊料金を見積もる（1泊料金 × 泊数）
pub async fn quote_stay(
    deps: &ServiceDependencies,
    hotel_id: HotelId,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<f64> {
    let hotel = deps
        .hotels
        .get(hotel_id)
        .await
        .map_err(ServiceError::Repository)?
        .ok_or_else(|| ServiceError::not_found("hotel", hotel_id))?;

    let stay = StayPeriod::new(check_in, check_out)?;
    let total = domain::booking::quote_stay(hotel.price, &stay)?;
    Ok(total.value())
}

/// 予約の状態遷移を1件ずつ直列に適用する
///
/// 予約単位のロック内で「読み取り → 遷移 → 保存」を行うため、
/// 同じ予約への同時キャンセルは1件だけが成功し、残りは `InvalidState` になる。
async fn transition<F>(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    apply: F,
) -> Result<Booking>
where
    F: FnOnce(&Booking) -> Result<Booking>,
{
    let _guard = deps.locks.acquire(LockKey::Booking(booking_id)).await;

    let booking = get_booking(deps, booking_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("booking", booking_id))?;

    let updated = apply(&booking)?;

    let written = deps
        .bookings
        .update(updated.clone())
        .await
        .map_err(ServiceError::Repository)?;
    if !written {
        return Err(ServiceError::not_found("booking", booking_id));
    }

    Ok(updated)
}

/// 予約をキャンセルする
///
/// - 存在しない場合は `NotFound`
/// - キャンセル済みの場合は `InvalidState`
///
/// レコードは削除しない。
pub async fn cancel_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    let cancelled = transition(deps, booking_id, |booking| {
        Ok(domain::booking::cancel_booking(booking, Utc::now())?)
    })
    .await?;

    tracing::info!(booking_id = %booking_id, "booking cancelled");
    Ok(cancelled)
}

/// 予約を確定する（管理者専用）
///
/// pending 以外からは `InvalidState`。
pub async fn confirm_booking(
    deps: &ServiceDependencies,
    actor: UserId,
    booking_id: BookingId,
) -> Result<Booking> {
    require_admin(deps, actor).await?;

    let confirmed = transition(deps, booking_id, |booking| {
        Ok(domain::booking::confirm_booking(booking, Utc::now())?)
    })
    .await?;

    tracing::info!(booking_id = %booking_id, actor = %actor, "booking confirmed");
    Ok(confirmed)
}
