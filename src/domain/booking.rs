use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    BookingId, BookingTransitionError, HotelId, Price, StayPeriod, UserId, ValidationError,
    commands::CreateBooking,
};

/// 予約ステータス
///
/// 遷移は一方向のみ：
/// - pending → confirmed
/// - pending → cancelled
/// - confirmed → cancelled
///
/// cancelled から抜ける遷移は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// 仮予約
    Pending,
    /// 確定
    Confirmed,
    /// キャンセル済み
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// キャンセルされていない（ホテル・利用者の削除を妨げる）
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Booking集約 - 1利用者による1ホテルの1回の宿泊予約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub booking_id: BookingId,

    // 他の集約への参照（IDのみ）
    pub user_id: UserId,
    pub hotel_id: HotelId,

    // 宿泊内容
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: Price,
    pub status: BookingStatus,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 純粋関数：予約を作成する
///
/// ビジネスルール：
/// - チェックイン日 < チェックアウト日
/// - 合計金額は0以上
/// - 初期状態はpending（auto_confirmの場合はconfirmed）
///
/// 参照先（利用者・ホテル）の存在確認はアプリケーション層の責務。
pub fn create_booking(
    cmd: &CreateBooking,
    auto_confirm: bool,
    created_at: DateTime<Utc>,
) -> Result<Booking, ValidationError> {
    let stay = StayPeriod::new(cmd.check_in, cmd.check_out)?;
    let total_price = Price::try_from(cmd.total_price)?;

    let status = if auto_confirm {
        BookingStatus::Confirmed
    } else {
        BookingStatus::Pending
    };

    Ok(Booking {
        booking_id: BookingId::new(),
        user_id: cmd.user_id,
        hotel_id: cmd.hotel_id,
        check_in_date: stay.check_in(),
        check_out_date: stay.check_out(),
        total_price,
        status,
        created_at,
        updated_at: created_at,
    })
}

/// 純粋関数：予約を確定する
///
/// pending のみ受け付ける。
pub fn confirm_booking(
    booking: &Booking,
    confirmed_at: DateTime<Utc>,
) -> Result<Booking, BookingTransitionError> {
    match booking.status {
        BookingStatus::Pending => Ok(Booking {
            status: BookingStatus::Confirmed,
            updated_at: confirmed_at,
            ..booking.clone()
        }),
        BookingStatus::Cancelled => Err(BookingTransitionError::AlreadyCancelled),
        other => Err(BookingTransitionError::NotPending(other)),
    }
}

/// 純粋関数：予約をキャンセルする
///
/// レコードは削除せずステータスのみ変更する（監査証跡として残す）。
pub fn cancel_booking(
    booking: &Booking,
    cancelled_at: DateTime<Utc>,
) -> Result<Booking, BookingTransitionError> {
    if !booking.status.is_active() {
        return Err(BookingTransitionError::AlreadyCancelled);
    }

    Ok(Booking {
        status: BookingStatus::Cancelled,
        updated_at: cancelled_at,
        ..booking.clone()
    })
}

/// 純粋関数：宿泊料金の見積もり（1泊料金 × 泊数）
///
/// 積が有限の値に収まらない場合は `NegativePrice` で拒否する。
pub fn quote_stay(nightly: Price, stay: &StayPeriod) -> Result<Price, ValidationError> {
    Price::try_from(nightly.value() * stay.nights() as f64)
}
