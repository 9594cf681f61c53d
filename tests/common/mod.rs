#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use hotel_booking_ddd::application::{BookingPolicy, ServiceDependencies, auth_gateway};
use hotel_booking_ddd::domain::{
    BookingId, Email, HotelId, UserId, booking::Booking, hotel::Hotel, hotel::NewHotel, user::User,
};
use hotel_booking_ddd::ports::{
    BookingRepository, Credentials, HotelRepository, UserRepository, UserWrite,
};
use std::sync::Arc;

type PortResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// テスト用の依存関係（インメモリ、予約はpendingで作成）
pub fn deps() -> ServiceDependencies {
    ServiceDependencies::in_memory(BookingPolicy::default())
}

/// 読み取りのたびにスケジューラへ制御を返す依存関係
///
/// インメモリのストアは await 中に中断しないため、このままでは
/// 「読み取り → 書き込み」の間に他のタスクが割り込まない。
/// 読み取り後に yield させて、ロックがなければ競合が起きる状況を作る。
pub fn yielding_deps() -> ServiceDependencies {
    let base = deps();
    ServiceDependencies {
        users: Arc::new(YieldingUsers(base.users.clone())),
        hotels: Arc::new(YieldingHotels(base.hotels.clone())),
        bookings: Arc::new(YieldingBookings(base.bookings.clone())),
        ..base
    }
}

struct YieldingUsers(Arc<dyn UserRepository>);

#[async_trait]
impl UserRepository for YieldingUsers {
    async fn insert(&self, user: User, password_hash: String) -> PortResult<UserWrite> {
        self.0.insert(user, password_hash).await
    }

    async fn update(&self, user: User) -> PortResult<UserWrite> {
        self.0.update(user).await
    }

    async fn get(&self, user_id: UserId) -> PortResult<Option<User>> {
        let user = self.0.get(user_id).await;
        tokio::task::yield_now().await;
        user
    }

    async fn credentials(&self, email: &Email) -> PortResult<Option<Credentials>> {
        self.0.credentials(email).await
    }

    async fn list(&self) -> PortResult<Vec<User>> {
        self.0.list().await
    }

    async fn delete(&self, user_id: UserId) -> PortResult<bool> {
        self.0.delete(user_id).await
    }
}

struct YieldingHotels(Arc<dyn HotelRepository>);

#[async_trait]
impl HotelRepository for YieldingHotels {
    async fn insert(&self, hotel: Hotel) -> PortResult<()> {
        self.0.insert(hotel).await
    }

    async fn update(&self, hotel: Hotel) -> PortResult<bool> {
        self.0.update(hotel).await
    }

    async fn get(&self, hotel_id: HotelId) -> PortResult<Option<Hotel>> {
        let hotel = self.0.get(hotel_id).await;
        tokio::task::yield_now().await;
        hotel
    }

    async fn list(&self) -> PortResult<Vec<Hotel>> {
        self.0.list().await
    }

    async fn delete(&self, hotel_id: HotelId) -> PortResult<bool> {
        self.0.delete(hotel_id).await
    }
}

struct YieldingBookings(Arc<dyn BookingRepository>);

#[async_trait]
impl BookingRepository for YieldingBookings {
    async fn insert(&self, booking: Booking) -> PortResult<()> {
        self.0.insert(booking).await
    }

    async fn update(&self, booking: Booking) -> PortResult<bool> {
        self.0.update(booking).await
    }

    async fn get(&self, booking_id: BookingId) -> PortResult<Option<Booking>> {
        let booking = self.0.get(booking_id).await;
        tokio::task::yield_now().await;
        booking
    }

    async fn find_by_user(&self, user_id: UserId) -> PortResult<Vec<Booking>> {
        let bookings = self.0.find_by_user(user_id).await;
        tokio::task::yield_now().await;
        bookings
    }

    async fn find_by_hotel(&self, hotel_id: HotelId) -> PortResult<Vec<Booking>> {
        let bookings = self.0.find_by_hotel(hotel_id).await;
        tokio::task::yield_now().await;
        bookings
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 一般利用者を登録する
pub async fn sign_up(deps: &ServiceDependencies, name: &str) -> User {
    auth_gateway::sign_up(deps, &format!("{name}@example.com"), "pw", name)
        .await
        .expect("sign up")
}

/// 管理者を登録する
///
/// 管理者権限はサインアップでは付与できないため、リポジトリを直接更新する。
pub async fn admin(deps: &ServiceDependencies) -> User {
    let user = sign_up(deps, "admin").await;
    let admin = User {
        is_admin: true,
        ..user
    };

    let written = deps.users.update(admin.clone()).await.expect("update");
    assert_eq!(written, UserWrite::Written);
    admin
}

pub fn new_hotel(name: &str, price: f64) -> NewHotel {
    NewHotel {
        name: name.to_string(),
        location: "Marrakech".to_string(),
        price,
        rating: 4.0,
        description: String::new(),
        image_url: None,
        features: vec!["Wifi".to_string()],
    }
}

/// ホテルを登録する（管理者として）
pub async fn hotel(deps: &ServiceDependencies, admin: &User, name: &str, price: f64) -> Hotel {
    hotel_booking_ddd::application::hotel_store::add_hotel(
        deps,
        admin.user_id,
        new_hotel(name, price),
    )
    .await
    .expect("add hotel")
}
