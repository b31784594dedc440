//! # TicketRepository
//!
//! サポートチケットの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - 所有者チェックはユースケース層の責務。リポジトリは ID だけで検索・更新する
//! - 一覧は作成順（`created_at ASC`）で返す
//! - `update` / `delete` は対象行が存在したかを `bool` で返し、
//!   所有者チェック後に並行して削除された場合をユースケース層で検出できるようにする

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use support_desk_domain::{
   DomainError,
   ticket::{Description, Product, Ticket, TicketId, TicketStatus},
   user::UserId,
};
use uuid::Uuid;

use crate::error::InfraError;

/// チケットリポジトリトレイト
#[async_trait]
pub trait TicketRepository: Send + Sync {
   /// 所有者のチケットを作成順で取得する
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, InfraError>;

   /// ID でチケットを検索する
   async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, InfraError>;

   /// チケットを挿入する
   async fn insert(&self, ticket: &Ticket) -> Result<(), InfraError>;

   /// チケットの可変フィールドを更新する
   ///
   /// 所有者（`user_id`）と作成日時は更新しない。
   /// 対象が存在しなかった場合は `Ok(false)` を返す。
   async fn update(&self, ticket: &Ticket) -> Result<bool, InfraError>;

   /// チケットを削除する
   ///
   /// 対象が存在しなかった場合は `Ok(false)` を返す。
   async fn delete(&self, id: &TicketId) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の TicketRepository
#[derive(Debug, Clone)]
pub struct PostgresTicketRepository {
   pool: PgPool,
}

impl PostgresTicketRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

/// `tickets` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
   id:          Uuid,
   user_id:     Uuid,
   product:     String,
   description: String,
   status:      String,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
   type Error = InfraError;

   fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
      let invalid = |e: DomainError| InfraError::invalid_row("tickets", row.id, e);

      let product = Product::new(row.product.as_str()).map_err(invalid)?;
      let description = Description::new(row.description.as_str()).map_err(invalid)?;
      let status = TicketStatus::new(row.status.as_str()).map_err(invalid)?;

      Ok(Ticket::from_db(
         TicketId::from_uuid(row.id),
         UserId::from_uuid(row.user_id),
         product,
         description,
         status,
         row.created_at,
         row.updated_at,
      ))
   }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, InfraError> {
      let rows = sqlx::query_as::<_, TicketRow>(
         r#"
            SELECT id, user_id, product, description, status, created_at, updated_at
            FROM tickets
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
      )
      .bind(user_id.as_uuid())
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(Ticket::try_from).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, InfraError> {
      let row = sqlx::query_as::<_, TicketRow>(
         r#"
            SELECT id, user_id, product, description, status, created_at, updated_at
            FROM tickets
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(Ticket::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %ticket.id()))]
   async fn insert(&self, ticket: &Ticket) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO tickets (id, user_id, product, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
      )
      .bind(ticket.id().as_uuid())
      .bind(ticket.user().as_uuid())
      .bind(ticket.product().as_str())
      .bind(ticket.description().as_str())
      .bind(ticket.status().as_str())
      .bind(ticket.created_at())
      .bind(ticket.updated_at())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %ticket.id()))]
   async fn update(&self, ticket: &Ticket) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
            UPDATE tickets
            SET product = $2, description = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
      )
      .bind(ticket.id().as_uuid())
      .bind(ticket.product().as_str())
      .bind(ticket.description().as_str())
      .bind(ticket.status().as_str())
      .bind(ticket.updated_at())
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &TicketId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
