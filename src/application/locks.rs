use crate::domain::{BookingId, HotelId, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 排他制御の対象となるエンティティ
///
/// 複数のキーを獲得する場合は常にこの順序（User → Hotel → Booking）で獲得する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LockKey {
    User(UserId),
    Hotel(HotelId),
    Booking(BookingId),
}

type Slots = Arc<StdMutex<HashMap<LockKey, Arc<Mutex<()>>>>>;

/// エンティティIDごとの排他ロック
///
/// 同じIDへの書き込みを直列化する。読み取りはロックを取らない。
/// スロットは保持者・待機者がいなくなった時点で取り除かれる。
#[derive(Default)]
pub struct EntityLocks {
    slots: Slots,
}

/// 獲得したロック。drop で解放される。
pub struct EntityGuard {
    slots: Slots,
    keys: Vec<LockKey>,
    held: Vec<OwnedMutexGuard<()>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: LockKey) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key).or_default().clone()
    }

    /// 1つのエンティティをロックする
    pub async fn acquire(&self, key: LockKey) -> EntityGuard {
        self.acquire_all([key]).await
    }

    /// 複数のエンティティを一定の順序でロックする（デッドロック防止）
    pub async fn acquire_all<I>(&self, keys: I) -> EntityGuard
    where
        I: IntoIterator<Item = LockKey>,
    {
        let mut keys: Vec<LockKey> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();

        // 獲得の途中で future が破棄されても guard の drop でスロットを片付ける
        let mut guard = EntityGuard {
            slots: self.slots.clone(),
            keys: keys.clone(),
            held: Vec::with_capacity(keys.len()),
        };
        for key in keys {
            guard.held.push(self.slot(key).lock_owned().await);
        }
        guard
    }

    /// 現在保持しているスロット数
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for EntityGuard {
    fn drop(&mut self) {
        self.held.clear();

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for key in &self.keys {
            // マップ以外に参照がなければ、保持者も待機者もいない
            if slots
                .get(key)
                .is_some_and(|slot| Arc::strong_count(slot) == 1)
            {
                slots.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(EntityLocks::new());
        let key = LockKey::Hotel(HotelId::new());

        let guard = locks.acquire(key).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(key).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = EntityLocks::new();
        let _a = locks.acquire(LockKey::User(UserId::new())).await;
        let _b = locks.acquire(LockKey::User(UserId::new())).await;
    }

    #[tokio::test]
    async fn test_acquire_all_dedups_keys() {
        let locks = EntityLocks::new();
        let key = LockKey::Booking(BookingId::new());
        // 同じキーを2回渡しても自己デッドロックしない
        let _guard = locks.acquire_all([key, key]).await;
    }

    #[tokio::test]
    async fn test_released_slots_are_removed() {
        let locks = EntityLocks::new();

        for _ in 0..1_000 {
            let _guard = locks.acquire(LockKey::Booking(BookingId::new())).await;
        }
        let pair = locks
            .acquire_all([
                LockKey::User(UserId::new()),
                LockKey::Hotel(HotelId::new()),
            ])
            .await;
        assert_eq!(locks.len(), 2);

        drop(pair);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_slot_survives_while_contended() {
        let locks = Arc::new(EntityLocks::new());
        let key = LockKey::User(UserId::new());

        let guard = locks.acquire(key).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(key).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // 待機者がいるので解放後もスロットは残り、待機者に引き継がれる
        drop(guard);
        assert_eq!(locks.len(), 1);

        contender.await.unwrap();
        assert!(locks.is_empty());
    }
}
