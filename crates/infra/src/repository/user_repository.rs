//! # UserRepository
//!
//! ユーザー情報の読み取りを担当するリポジトリ。
//! ユーザーの作成・更新はこのサービスの責務外のため、検索のみを提供する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use support_desk_domain::user::{Email, User, UserId, UserName};
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// ID でユーザーを検索
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
   id:         Uuid,
   name:       String,
   email:      String,
   created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
   type Error = InfraError;

   fn try_from(row: UserRow) -> Result<Self, Self::Error> {
      let name = UserName::new(row.name).map_err(|e| InfraError::invalid_row("users", row.id, e))?;
      let email =
         Email::new(row.email).map_err(|e| InfraError::invalid_row("users", row.id, e))?;

      Ok(User::new(
         UserId::from_uuid(row.id),
         name,
         email,
         row.created_at,
      ))
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }
}
