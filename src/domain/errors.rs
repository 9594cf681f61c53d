use chrono::NaiveDate;
use std::fmt;

use super::BookingStatus;

/// 入力値のバリデーションエラー
///
/// 値オブジェクトの生成や純粋関数の事前条件で発生する。
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// メールアドレスの形式が不正
    InvalidEmail(String),
    /// 必須項目が空
    EmptyField(&'static str),
    /// 金額が負数または非有限
    NegativePrice(f64),
    /// ホテル評価が範囲外（0〜5）
    HotelRatingOutOfRange(f64),
    /// レビュー評価が範囲外（1〜5）
    ReviewRatingOutOfRange(i64),
    /// チェックアウトがチェックイン以前
    InvalidStayPeriod {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    /// 予約の利用者・ホテルがレビューと一致しない
    BookingMismatch,
    /// 自分自身へのメッセージ
    SelfMessage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(raw) => write!(f, "invalid email address: {raw:?}"),
            ValidationError::EmptyField(field) => write!(f, "{field} must not be empty"),
            ValidationError::NegativePrice(value) => {
                write!(f, "price must be a non-negative number, got {value}")
            }
            ValidationError::HotelRatingOutOfRange(value) => {
                write!(f, "hotel rating must be within [0, 5], got {value}")
            }
            ValidationError::ReviewRatingOutOfRange(value) => {
                write!(
                    f,
                    "review rating must be an integer within [1, 5], got {value}"
                )
            }
            ValidationError::InvalidStayPeriod {
                check_in,
                check_out,
            } => write!(
                f,
                "check-out ({check_out}) must be after check-in ({check_in})"
            ),
            ValidationError::BookingMismatch => {
                f.write_str("booking does not belong to the reviewing user and hotel")
            }
            ValidationError::SelfMessage => f.write_str("sender and receiver must differ"),
        }
    }
}

/// 予約ステータス遷移のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTransitionError {
    /// 既にキャンセル済み
    AlreadyCancelled,
    /// 確定はpendingからのみ可能
    NotPending(BookingStatus),
}

impl fmt::Display for BookingTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingTransitionError::AlreadyCancelled => f.write_str("booking is already cancelled"),
            BookingTransitionError::NotPending(status) => {
                write!(
                    f,
                    "only pending bookings can be confirmed (status: {status})"
                )
            }
        }
    }
}
