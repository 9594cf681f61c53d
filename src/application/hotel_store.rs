use crate::domain::{
    self,
    HotelId,
    UserId,
    catalog::CatalogEntry,
    hotel::{Hotel, HotelFilter, HotelPatch, NewHotel},
};
use serde::Serialize;

use super::auth_gateway::require_admin;
use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};
use super::locks::LockKey;

/// カタログ取り込みの結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

fn sort_by_name(hotels: &mut [Hotel]) {
    hotels.sort_by(|a, b| a.name.cmp(&b.name).then(a.hotel_id.cmp(&b.hotel_id)));
}

/// 全ホテルを名前順で取得する
pub async fn list_hotels(deps: &ServiceDependencies) -> Result<Vec<Hotel>> {
    let mut hotels = deps.hotels.list().await.map_err(ServiceError::Repository)?;
    sort_by_name(&mut hotels);
    Ok(hotels)
}

/// ホテルを条件で検索する（名前順）
pub async fn search_hotels(deps: &ServiceDependencies, filter: &HotelFilter) -> Result<Vec<Hotel>> {
    let mut hotels: Vec<Hotel> = deps
        .hotels
        .list()
        .await
        .map_err(ServiceError::Repository)?
        .into_iter()
        .filter(|h| filter.matches(h))
        .collect();
    sort_by_name(&mut hotels);

    tracing::debug!(results = hotels.len(), "hotel search");
    Ok(hotels)
}

/// IDでホテルを取得する
///
/// 存在しない場合は None を返し、扱いは呼び出し側に委ねる。
pub async fn get_hotel_by_id(
    deps: &ServiceDependencies,
    hotel_id: HotelId,
) -> Result<Option<Hotel>> {
    deps.hotels
        .get(hotel_id)
        .await
        .map_err(ServiceError::Repository)
}

/// ホテルを登録する（管理者専用）
///
/// ビジネスルール：
/// - 料金は0以上、評価は0〜5
pub async fn add_hotel(
    deps: &ServiceDependencies,
    actor: UserId,
    input: NewHotel,
) -> Result<Hotel> {
    require_admin(deps, actor).await?;

    let hotel = domain::hotel::create_hotel(input)?;
    deps.hotels
        .insert(hotel.clone())
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(hotel_id = %hotel.hotel_id, actor = %actor, "hotel added");
    Ok(hotel)
}

/// ホテルを部分更新する（管理者専用）
pub async fn update_hotel(
    deps: &ServiceDependencies,
    actor: UserId,
    hotel_id: HotelId,
    patch: HotelPatch,
) -> Result<Hotel> {
    require_admin(deps, actor).await?;

    let _guard = deps.locks.acquire(LockKey::Hotel(hotel_id)).await;

    let hotel = get_hotel_by_id(deps, hotel_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("hotel", hotel_id))?;

    let updated = domain::hotel::apply_patch(&hotel, patch)?;

    let written = deps
        .hotels
        .update(updated.clone())
        .await
        .map_err(ServiceError::Repository)?;
    if !written {
        return Err(ServiceError::not_found("hotel", hotel_id));
    }

    tracing::info!(hotel_id = %hotel_id, actor = %actor, "hotel updated");
    Ok(updated)
}

/// ホテルを削除する（管理者専用）
///
/// キャンセルされていない予約が残っている場合は `Conflict` で拒否する。
/// 過去の予約・レビューは参照IDを保ったまま残す。
/// ホテル単位のロックにより、同じホテルへの予約作成とは直列化される。
pub async fn delete_hotel(
    deps: &ServiceDependencies,
    actor: UserId,
    hotel_id: HotelId,
) -> Result<()> {
    require_admin(deps, actor).await?;

    let _guard = deps.locks.acquire(LockKey::Hotel(hotel_id)).await;

    if get_hotel_by_id(deps, hotel_id).await?.is_none() {
        return Err(ServiceError::not_found("hotel", hotel_id));
    }

    let active = deps
        .bookings
        .find_by_hotel(hotel_id)
        .await
        .map_err(ServiceError::Repository)?
        .iter()
        .filter(|b| b.status.is_active())
        .count();

    if active > 0 {
        tracing::warn!(hotel_id = %hotel_id, active, "hotel deletion blocked by bookings");
        return Err(ServiceError::Conflict(format!(
            "hotel {hotel_id} has {active} active booking(s)"
        )));
    }

    deps.hotels
        .delete(hotel_id)
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(hotel_id = %hotel_id, actor = %actor, "hotel deleted");
    Ok(())
}

/// カタログを取り込む（管理者専用）
pub async fn import_catalog(
    deps: &ServiceDependencies,
    actor: UserId,
    entries: Vec<CatalogEntry>,
) -> Result<ImportReport> {
    require_admin(deps, actor).await?;
    load_catalog(deps, entries).await
}

/// カタログを取り込む（起動時の初期投入にも使用）
///
/// 不正なエントリは警告を出してスキップする。
pub(crate) async fn load_catalog(
    deps: &ServiceDependencies,
    entries: Vec<CatalogEntry>,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for entry in entries {
        let name = entry.name.clone();
        match domain::hotel::create_hotel(entry.into_new_hotel()) {
            Ok(hotel) => {
                deps.hotels
                    .insert(hotel)
                    .await
                    .map_err(ServiceError::Repository)?;
                report.imported += 1;
            }
            Err(e) => {
                tracing::warn!(hotel = %name, error = %e, "skipping catalog entry");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "catalog imported"
    );
    Ok(report)
}
