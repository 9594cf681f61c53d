use crate::adapters::{memory, security::Argon2PasswordHasher};
use crate::ports::*;
use std::sync::Arc;

use super::locks::EntityLocks;

/// 予約の運用ポリシー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    /// trueなら予約をconfirmedで作成する（確定操作を省略）
    pub auto_confirm: bool,
}

/// サービスの依存関係
///
/// 振る舞いは持たず、各コンポーネントの関数に明示的に渡す。
/// ストレージの実装はポート（トレイト）の裏で差し替え可能。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub users: Arc<dyn UserRepository>,
    pub hotels: Arc<dyn HotelRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub messages: Arc<dyn ChatRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub locks: Arc<EntityLocks>,
    pub policy: BookingPolicy,
}

impl ServiceDependencies {
    /// インメモリのアダプターで依存関係を組み立てる
    pub fn in_memory(policy: BookingPolicy) -> Self {
        Self {
            users: Arc::new(memory::UserRepository::new()),
            hotels: Arc::new(memory::HotelRepository::new()),
            bookings: Arc::new(memory::BookingRepository::new()),
            reviews: Arc::new(memory::ReviewRepository::new()),
            messages: Arc::new(memory::ChatRepository::new()),
            sessions: Arc::new(memory::SessionStore::new()),
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            locks: Arc::new(EntityLocks::new()),
            policy,
        }
    }
}
