use crate::domain::{Email, UserId, user::User};
use crate::ports::user_repository::{
    Credentials, Result, UserRepository as UserRepositoryTrait, UserWrite,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, Credentials>,
    by_email: HashMap<Email, UserId>,
}

/// UserRepositoryのインメモリ実装
///
/// メールアドレスの索引を同じロックの内側で管理し、一意性判定と書き込みを原子的に行う。
#[derive(Default)]
pub struct UserRepository {
    inner: RwLock<Inner>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn insert(&self, user: User, password_hash: String) -> Result<UserWrite> {
        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&user.email) {
            return Ok(UserWrite::EmailTaken);
        }

        inner.by_email.insert(user.email.clone(), user.user_id);
        inner.users.insert(
            user.user_id,
            Credentials {
                user,
                password_hash,
            },
        );
        Ok(UserWrite::Written)
    }

    async fn update(&self, user: User) -> Result<UserWrite> {
        let mut inner = self.inner.write().await;

        let old_email = match inner.users.get(&user.user_id) {
            Some(stored) => stored.user.email.clone(),
            None => return Ok(UserWrite::Missing),
        };

        if old_email != user.email {
            if inner.by_email.contains_key(&user.email) {
                return Ok(UserWrite::EmailTaken);
            }
            inner.by_email.remove(&old_email);
            inner.by_email.insert(user.email.clone(), user.user_id);
        }

        if let Some(stored) = inner.users.get_mut(&user.user_id) {
            stored.user = user;
        }
        Ok(UserWrite::Written)
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).map(|stored| stored.user.clone()))
    }

    async fn credentials(&self, email: &Email) -> Result<Option<Credentials>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().map(|s| s.user.clone()).collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.user_id.cmp(&b.user_id))
        });
        Ok(users)
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.remove(&user_id) {
            Some(stored) => {
                inner.by_email.remove(&stored.user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
