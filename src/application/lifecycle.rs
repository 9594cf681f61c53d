use crate::config::{AdminSeed, AppConfig};
use crate::domain::catalog::CatalogEntry;
use crate::ports::UserWrite;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::auth_gateway::sign_up;
use super::dependencies::ServiceDependencies;
use super::errors::ServiceError;
use super::hotel_store::{ImportReport, load_catalog};

/// 起動処理のエラー
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read hotel catalog {path:?}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("hotel catalog {path:?} is not valid JSON")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to seed the administrator account")]
    AdminSeed(#[source] ServiceError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// 設定から依存関係を組み立て、初期データを投入する
///
/// - ADMIN_EMAIL / ADMIN_PASSWORD があれば管理者を作成する
/// - HOTEL_CATALOG_PATH があればホテルカタログを取り込む
pub async fn initialize(config: &AppConfig) -> Result<ServiceDependencies, StartupError> {
    let deps = ServiceDependencies::in_memory(config.booking_policy);

    if let Some(seed) = &config.admin {
        seed_admin(&deps, seed).await?;
    }

    if let Some(path) = &config.catalog_path {
        let report = import_catalog_file(&deps, path).await?;
        tracing::info!(
            path = %path.display(),
            imported = report.imported,
            skipped = report.skipped,
            "catalog loaded at startup"
        );
    }

    tracing::info!(
        auto_confirm = config.booking_policy.auto_confirm,
        "services initialized"
    );
    Ok(deps)
}

/// 終了処理：すべてのセッションを破棄する
pub async fn shutdown(deps: &ServiceDependencies) -> Result<(), ServiceError> {
    deps.sessions
        .clear()
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!("services shut down");
    Ok(())
}

async fn seed_admin(deps: &ServiceDependencies, seed: &AdminSeed) -> Result<(), StartupError> {
    let user = match sign_up(deps, &seed.email, &seed.password, &seed.username).await {
        Ok(user) => user,
        Err(ServiceError::DuplicateEmail) => {
            tracing::info!("administrator already exists");
            return Ok(());
        }
        Err(e) => return Err(StartupError::AdminSeed(e)),
    };

    let admin = crate::domain::user::User {
        is_admin: true,
        ..user
    };

    match deps
        .users
        .update(admin.clone())
        .await
        .map_err(|e| StartupError::AdminSeed(ServiceError::Repository(e)))?
    {
        UserWrite::Written => {
            tracing::info!(user_id = %admin.user_id, "administrator seeded");
            Ok(())
        }
        UserWrite::EmailTaken => Err(StartupError::AdminSeed(ServiceError::DuplicateEmail)),
        UserWrite::Missing => Err(StartupError::AdminSeed(ServiceError::not_found(
            "user",
            admin.user_id,
        ))),
    }
}

async fn import_catalog_file(
    deps: &ServiceDependencies,
    path: &Path,
) -> Result<ImportReport, StartupError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&raw).map_err(|source| StartupError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(load_catalog(deps, entries).await?)
}
