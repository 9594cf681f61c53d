use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    booking::Booking, chat::ChatMessage, hotel::Hotel, hotel::HotelFilter, review::Review,
    user::User,
};

// ============================================================================
// Auth
// ============================================================================

/// サインアップのリクエスト
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// サインインのリクエスト
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// サインインのレスポンス（トークンはここでのみ返す）
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Users
// ============================================================================

/// 利用者レスポンス
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.value(),
            username: user.username,
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
            profile_image: user.profile_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// Hotels
// ============================================================================

/// ホテルレスポンス
#[derive(Debug, Serialize)]
pub struct HotelResponse {
    pub hotel_id: Uuid,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub rating: f64,
    pub description: String,
    pub image_url: Option<String>,
    pub features: Vec<String>,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            hotel_id: hotel.hotel_id.value(),
            name: hotel.name,
            location: hotel.location,
            price: hotel.price.value(),
            rating: hotel.rating.value(),
            description: hotel.description,
            image_url: hotel.image_url,
            features: hotel.features.into_iter().collect(),
        }
    }
}

/// ホテル検索のクエリパラメータ
///
/// features はカンマ区切り（例: `features=Wifi,Spa`）。
#[derive(Debug, Default, Deserialize)]
pub struct HotelSearchQuery {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub features: Option<String>,
}

impl HotelSearchQuery {
    pub fn into_filter(self) -> HotelFilter {
        HotelFilter {
            location: self.location,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            features: self
                .features
                .map(|raw| raw.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// 予約作成のリクエスト
///
/// user_id を省略した場合は呼び出し元本人。
/// total_price を省略した場合は見積もり額（1泊料金 × 泊数）を使う。
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: Option<Uuid>,
    pub hotel_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: Option<f64>,
}

/// 見積もりのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// 見積もりのレスポンス
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub hotel_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
}

/// 予約レスポンス
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.booking_id.value(),
            user_id: booking.user_id.value(),
            hotel_id: booking.hotel_id.value(),
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            total_price: booking.total_price.value(),
            status: booking.status.as_str().to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

/// レビュー投稿のリクエスト（ホテルはパスで指定）
#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    pub user_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// レビューレスポンス
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.review_id.value(),
            user_id: review.user_id.value(),
            hotel_id: review.hotel_id.value(),
            booking_id: review.booking_id.map(|id| id.value()),
            rating: review.rating.value(),
            comment: review.comment,
            timestamp: review.timestamp,
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// メッセージ送信のリクエスト（送信者は呼び出し元本人）
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Uuid,
    pub text: String,
}

/// メッセージレスポンス
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            message_id: message.message_id.value(),
            sender_id: message.sender_id.value(),
            receiver_id: message.receiver_id.value(),
            text: message.text,
            timestamp: message.timestamp,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// 一覧をレスポンス型に変換する
pub fn to_responses<T, R>(items: Vec<T>) -> Vec<R>
where
    R: From<T>,
{
    items.into_iter().map(R::from).collect()
}
